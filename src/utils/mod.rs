//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod net;
pub mod signals;

// Re-export main functions
pub use net::bind_with_retry;
pub use signals::shutdown_signal;
