//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use loopkit_errors::prelude::*;
//!
//! fn steps(count: u32) -> Result<u32> {
//!     if count == 0 {
//!         return Err(ValidationError::constraint("steps must be at least 1").into());
//!     }
//!     Ok(count)
//! }
//!
//! assert!(steps(0).is_err());
//! ```

pub use crate::{
    Result,
    common::{ErrorCategory, ErrorSeverity, LoopKitError},
    validation::ValidationError,
};
