//! timview-bundle - packages the TIM Viewer application into a standalone executable.
//!
//! Installs the Python requirements, freezes the entry script with PyInstaller
//! and verifies the resulting artifact before reporting success.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match timview_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
