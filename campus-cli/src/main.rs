//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use campus_cli::run;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("campus: {err}");
        std::process::exit(1);
    }
}
