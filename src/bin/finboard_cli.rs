use std::process;

use clap::Parser;
use finboard::{cli::Cli, init};

fn main() {
    init();

    let cli = Cli::parse();
    if let Err(err) = finboard::cli::run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
