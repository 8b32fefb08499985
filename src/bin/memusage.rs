use std::process;

use anyhow::Result;
use clap::Parser;
use hoststat::memory;
use log::error;

/// Report the percentage of system memory currently in use.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {}

fn main() {
    std::env::set_var("RUST_LOG", "info");
    env_logger::init();
    let _args = Args::parse();

    if let Err(e) = run() {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let usage = memory::usage_percent()?;
    println!("Memory Usage: {:.2}%", usage);
    Ok(())
}
