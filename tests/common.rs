#![allow(dead_code)]

use std::process::{Command, Output};

/// Config path that never exists, so runs use built-in defaults.
pub const NO_CONFIG: &str = "/nonexistent/portfolio-tui/config.toml";

/// Run the binary with `args` and the default configuration.
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_portfolio-tui"))
        .arg("--config")
        .arg(NO_CONFIG)
        .args(args)
        .env("RUST_LOG", "portfolio_tui=debug")
        .output()
        .expect("Failed to spawn portfolio-tui")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
