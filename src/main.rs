use clap::Parser;
use stripwatch::Settings;
use stripwatch::cli::Cli;
use stripwatch::cli::commands::watch::{self, WatchArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet, so configuration problems go to stderr
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        eprintln!("Using default configuration.");
        Settings::default()
    });

    stripwatch::logging::init_with_config(&settings.logging);

    let directory = settings.resolve_directory(cli.directory);
    watch::run(WatchArgs { directory }).await
}
