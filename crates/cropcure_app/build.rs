use std::env;

fn main() {
    let version = env::var("CROPCURE_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rerun-if-env-changed=CROPCURE_VERSION");
    println!("cargo:rustc-env=CROPCURE_VERSION={version}");
}
