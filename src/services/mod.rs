//! External collaborators module
//!
//! This module contains the thin I/O surfaces the scheduler drives: the
//! overlay presenter, launch-at-login registration and process restart.

pub mod autostart;
pub mod overlay;
pub mod system;

// Re-export main types
pub use autostart::{AutostartRegistrar, DesktopEntryAutostart};
pub use overlay::{NotificationPresenter, OverlayHandle, OverlayPresenter};
pub use system::restart_process;
