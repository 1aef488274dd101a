use std::env;

fn main() {
    // Man pages are only generated in release builds or on request;
    // the full generation happens at runtime via a hidden command.
    if env::var("PROFILE").unwrap_or_default() != "release" && env::var("GENERATE_MAN").is_err() {
        return;
    }

    println!("cargo:rerun-if-changed=src/cli/mod.rs");
}
