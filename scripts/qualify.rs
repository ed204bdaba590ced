#!/usr/bin/env rust-script
//! Runs the checks that must pass before a release.
//!
//! ```cargo
//! [dependencies]
//! yansi = "0.5"
//! ```
extern crate yansi;
use std::process::{Command, Stdio};

fn command(line: &str) -> Command {
    println!("\n> {}", yansi::Paint::yellow(line));
    let mut parts = line.split(' ');
    let mut command = Command::new(parts.next().unwrap());
    command.args(parts);
    command
}

fn run(line: &str) {
    if !command(line).status().unwrap().success() {
        println!("> {}", yansi::Paint::red("qualify terminates due to error"));
        std::process::exit(-1);
    }
}

fn main() {
    println!("Qualify tg_logger");

    run("cargo fmt");

    std::fs::remove_file("Cargo.lock").ok();
    for features in ["--no-default-features", "--all-features", "--features compress"] {
        run(&format!("cargo build {features}"));
        run(&format!("cargo clippy --all-targets {features} -- -D warnings"));
        run(&format!("cargo test {features}"));
    }
    run("cargo +1.85.0 build --all-features");
    run("cargo +nightly doc --all-features --no-deps");

    let output = command("git status -s")
        .stdout(Stdio::piped())
        .output()
        .unwrap();
    if !output.stdout.is_empty() {
        println!("> {}", yansi::Paint::red("there are uncommitted files"));
        std::process::exit(-1);
    }
    println!("\n> all done :-)  Ready for \"git push\" and \"cargo publish\"");
}
