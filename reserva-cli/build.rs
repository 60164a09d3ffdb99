//! Build script for reserva-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here by hand.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs and src/commands/.
fn build_cli() -> Command {
    let format = || {
        Arg::new("format")
            .long("format")
            .help("Output format")
            .value_parser(["table", "json"])
            .default_value("table")
    };

    Command::new("reserva")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reload and inspect name reservations")
        .long_about(
            "Command-line tool that validates names, saves them as reservations, \
             and atomically clears and reloads the reservation store",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("RESERVA_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("RESERVA_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file as well")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("reload")
                .about("Clear all reservations and reload the seed names")
                .long_about(
                    "Delete every reservation, save the configured names through the \
                     validation pipeline, and print the resulting contents",
                )
                .arg(
                    Arg::new("names")
                        .long("names")
                        .value_name("NAMES")
                        .help("Comma-separated names to reload instead of the configured ones"),
                )
                .arg(
                    Arg::new("no-transaction")
                        .long("no-transaction")
                        .help("Run the clear and save phases without a surrounding transaction")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("validation")
                        .long("validation")
                        .value_name("MODE")
                        .value_parser(["pre-save", "post-save"])
                        .help("When to validate names relative to their save"),
                )
                .arg(
                    Arg::new("concurrency")
                        .long("concurrency")
                        .value_name("N")
                        .help("Maximum number of saves in flight"),
                ),
            Command::new("list")
                .about("List all reservations")
                .arg(format()),
            Command::new("find")
                .about("Find reservations by name")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true))
                .arg(format()),
            Command::new("save")
                .about("Validate and save names without clearing")
                .arg(Arg::new("names").value_name("NAME").num_args(1..).required(true)),
            Command::new("clear").about("Delete every reservation"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("reserva.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
