//! Generate light and dark variants of a folder of icons.
//!
//! The light variant is a verbatim copy of each icon. The dark variant has its
//! RGB channels complemented (`v -> 255 - v`) with any alpha channel kept as-is.

pub mod config;
pub mod dark;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;

pub use config::{FailurePolicy, GeneratorConfig, UnsupportedPolicy};
pub use error::{Error, Result};
pub use generator::{FileFailure, IconVariantGenerator, Progress, RunReport};
