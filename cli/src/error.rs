use std::{fmt::Display, io};

use wdi::WdiError;

pub enum CliError {
    IO(io::Error),
    Wdi(WdiError),
    Config(String),
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        CliError::IO(value)
    }
}

impl From<WdiError> for CliError {
    fn from(value: WdiError) -> Self {
        CliError::Wdi(value)
    }
}

impl From<toml::de::Error> for CliError {
    fn from(value: toml::de::Error) -> Self {
        CliError::Config(value.to_string())
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::IO(err) => write!(f, "IO error: {err}"),
            CliError::Wdi(err) => write!(f, "Driver installer error: {err}"),
            CliError::Config(err) => write!(f, "Configuration error: {err}"),
        }
    }
}
