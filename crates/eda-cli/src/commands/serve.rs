//! Serve command - run the HTTP quality service.

use colored::Colorize;
use eda::ProfilerConfig;

use crate::server::{AppState, run_server};

pub fn run(host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(ProfilerConfig::default());

    println!(
        "{} {}",
        "Starting".cyan().bold(),
        "dataset quality service".white()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(state, &host, port))?;

    println!("{}", "Server stopped".yellow());
    Ok(())
}
