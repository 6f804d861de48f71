//! Watch command - merge once, then rebuild on every change until interrupted.

use std::path::PathBuf;

use anyhow::Context;

use crate::watcher::{DirectoryWatcher, MergeHandler};

/// Arguments for the watch command.
pub struct WatchArgs {
    pub directory: PathBuf,
}

/// Run the watch command.
///
/// The first merge happens before the subscription exists, so no event can
/// race it. A failure there is fatal; later failures are only logged.
pub async fn run(args: WatchArgs) -> anyhow::Result<()> {
    let WatchArgs { directory } = args;

    // Registered first so a signal arriving during startup is not fatal
    let shutdown = Shutdown::install().context("Failed to listen for shutdown signal")?;

    crate::log_event!("watcher", "watching", "{}", directory.display());

    let handler = MergeHandler::new(&directory);
    handler
        .merge_now()
        .with_context(|| format!("Initial merge of {} failed", directory.display()))?;

    let running = DirectoryWatcher::builder()
        .dir(&directory)
        .handler(handler)
        .build()?
        .start()
        .with_context(|| format!("Cannot watch {}", directory.display()))?;

    shutdown
        .wait()
        .await
        .context("Failed to listen for shutdown signal")?;

    crate::log_event!("watcher", "stopping");
    running.stop()?;
    Ok(())
}

/// Ctrl-C, plus SIGTERM on Unix.
struct Shutdown {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl Shutdown {
    fn install() -> std::io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            Ok(Self {
                terminate: signal(SignalKind::terminate())?,
            })
        }

        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    async fn wait(mut self) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            tokio::select! {
                res = tokio::signal::ctrl_c() => res,
                _ = self.terminate.recv() => Ok(()),
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await
        }
    }
}
