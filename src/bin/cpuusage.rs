use std::process;

use anyhow::Result;
use clap::Parser;
use hoststat::cpu;
use log::error;

/// Report CPU utilization over a one-second window.
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
    let usage = cpu::usage_percent()?;
    println!("CPU Utilization: {:.2}%", usage);
    Ok(())
}
