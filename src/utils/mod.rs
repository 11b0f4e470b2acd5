//! Utility modules for common functionality
//!
//! - `logging`: tracing subscriber setup
//! - `progress`: spinners shown while talking to Postmark

pub mod logging;
pub mod progress;
