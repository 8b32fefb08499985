use std::path::Path;
use std::process;

use anyhow::Result;
use clap::Parser;
use hoststat::disk;
use log::error;

/// Report used space on the root filesystem.
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
    let usage = disk::usage_percent(Path::new("/"))?;
    println!("Disk usage: {:.2}%", usage);
    Ok(())
}
