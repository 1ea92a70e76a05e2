mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            bag,
            queries,
            get,
            snapshot,
        } => {
            let query_refs: Vec<&str> = queries.iter().map(String::as_str).collect();
            commands::resolve(&bag, &query_refs, get, snapshot)
        }
        Commands::Args {
            bag,
            user_agent,
            scroll_bounce,
            program,
        } => commands::launch_args(&bag, user_agent, scroll_bounce, &program),
        Commands::WebPrefs { bag } => commands::web_prefs(&bag),
    }
}
