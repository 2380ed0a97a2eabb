// src/bin/cli.rs
use gushi_scrape::cli;

fn main() {
    if let Err(e) = color_eyre::install().and_then(|_| cli::run()) {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}
