//! Process-level operations

use std::env;

use anyhow::Context;
use tokio::process::Command;
use tracing::info;

/// Spawn a fresh copy of the current executable with the same arguments.
/// The caller is expected to quit afterwards; the replacement takes over.
pub async fn restart_process() -> anyhow::Result<()> {
    let exe = env::current_exe().context("Failed to resolve current executable")?;
    let args: Vec<String> = env::args().skip(1).collect();

    info!("Restarting: spawning {} {:?}", exe.display(), args);

    Command::new(&exe)
        .args(&args)
        .spawn()
        .with_context(|| format!("Failed to spawn {}", exe.display()))?;

    Ok(())
}
