//! bookshelf CLI entry point
//!
//! Parses arguments and hands off to `cli::run`; errors go to stderr with exit code 1.

use bookshelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
