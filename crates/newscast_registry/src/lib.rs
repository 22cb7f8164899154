//! # Show Registry
//!
//! This crate holds the declarative table of broadcast shows that inline
//! queries are resolved against.
//!
//! A registry is plain JSON data: every show lists its keyword aliases, the
//! feed variants ("qualities") it is published in, the default variant and
//! whether results should be sent as a bare link. The table is validated once
//! on load and is immutable afterwards.

mod domain;
mod registry;

pub use domain::{Quality, ShowDefinition};
pub use registry::{RegistryError, ShowRegistry};
