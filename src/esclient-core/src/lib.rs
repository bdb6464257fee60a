//! esclient Core Library
//!
//! Network-free building blocks for the esclient search client:
//! - Connection configuration
//! - Request/response models
//! - JSON body helpers
//! - The scroll cursor state machine

pub mod config;
pub mod error;
pub mod json;
pub mod models;
pub mod scroll;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::*;
pub use scroll::{ScrollSession, ScrollState};
