//! Launch-at-login registration

use std::{env, fs, path::PathBuf};

use anyhow::Context;
use tracing::info;

/// OS-level launch-at-login registration. All operations are best-effort;
/// callers log failures and carry on.
pub trait AutostartRegistrar: Send + Sync {
    fn is_enabled(&self) -> bool;
    fn enable(&self) -> anyhow::Result<()>;
    fn disable(&self) -> anyhow::Result<()>;
}

/// XDG autostart registration via a `.desktop` entry pointing at the
/// current executable
#[derive(Debug, Default)]
pub struct DesktopEntryAutostart;

impl DesktopEntryAutostart {
    pub fn new() -> Self {
        Self
    }

    fn entry_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("autostart").join("look-away.desktop"))
    }
}

impl AutostartRegistrar for DesktopEntryAutostart {
    fn is_enabled(&self) -> bool {
        Self::entry_path().map(|path| path.exists()).unwrap_or(false)
    }

    fn enable(&self) -> anyhow::Result<()> {
        let path = Self::entry_path().context("No config directory available")?;
        let exe = env::current_exe().context("Failed to resolve current executable")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let entry = format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Look Away\n\
             Comment=Periodic eye break reminder\n\
             Exec={}\n\
             X-GNOME-Autostart-enabled=true\n",
            exe.display()
        );
        fs::write(&path, entry)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Auto-start enabled via {}", path.display());
        Ok(())
    }

    fn disable(&self) -> anyhow::Result<()> {
        let path = Self::entry_path().context("No config directory available")?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            info!("Auto-start disabled, removed {}", path.display());
        }
        Ok(())
    }
}
