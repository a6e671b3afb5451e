//! Main application entry point (native).

use clap::Parser;
use plandraft_app::Cli;

fn main() {
    env_logger::init();
    log::info!("Starting PlanDraft");

    let cli = Cli::parse();
    if let Err(e) = plandraft_app::run(cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
