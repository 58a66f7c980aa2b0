use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=LIBWDI_DIR");
    println!("cargo:rerun-if-env-changed=LIBWDI_STATIC");

    // libwdi only exists on Windows; elsewhere the declarations stay unlinked
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    if let Ok(dir) = env::var("LIBWDI_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }

    // MSVC builds produce libwdi.lib, MinGW builds produce libwdi.a
    let lib_name = match env::var("CARGO_CFG_TARGET_ENV").as_deref() {
        Ok("msvc") => "libwdi",
        _ => "wdi",
    };

    if env::var_os("LIBWDI_STATIC").is_some() {
        println!("cargo:rustc-link-lib=static={lib_name}");
        let system_libs =
            ["setupapi", "newdev", "ole32", "advapi32", "shell32"];
        for system_lib in system_libs {
            println!("cargo:rustc-link-lib=dylib={system_lib}");
        }
    } else {
        println!("cargo:rustc-link-lib=dylib={lib_name}");
    }
}
