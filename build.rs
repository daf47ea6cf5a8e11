//! Build script for fuzzstress
//!
//! Embeds version and target information for the CLI's --version output.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(version) = env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=FUZZSTRESS_VERSION={}", version);
    }

    if let Ok(target) = env::var("TARGET") {
        println!("cargo:rustc-env=FUZZSTRESS_TARGET={}", target);
    }
}
