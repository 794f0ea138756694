use clap::Parser;
use restconfig::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
