#![doc = include_str!("../README.md")]

mod error;
mod loader;
mod registry;

pub mod decode;
pub mod list;

pub use crate::decode::{decode, InputEncoding};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::list::{list, Category};
pub use crate::loader::{Config, Schema};
pub use crate::registry::{MessageResolver, Registry};

// Re-exported so callers can implement `MessageResolver` without naming the
// crate version themselves.
pub use prost_reflect;
