//! Configuration model and layered resolution for picfit.
//!
//! This crate owns the picfit config schema and the merge pipeline that
//! layers programmatic defaults, `PICFIT_*` environment variables, and an
//! explicit file or inline JSON source into one immutable [`Config`].

mod error;
mod loader;
mod model;

/// Public error type returned by config loading APIs.
pub use error::ConfigError;
/// Resolution context and source format selection.
pub use loader::{Resolver, SourceFormat};
/// Configuration schema models and default constants.
pub use model::*;
