//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Insight commands (analyze, propose)
//! - `common` - Shared utilities (open_dataset, load_config)
//! - `describe` - Inspection commands (describe, config)

pub mod analyze;
pub mod common;
pub mod describe;

// Re-export command functions for main.rs
pub use analyze::*;
pub use common::*;
pub use describe::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
