//! Resolution of fully-qualified message names to empty dynamic messages.

use log::trace;
use prost_reflect::{DescriptorPool, DynamicMessage};

use crate::{Error, Result};

/// Produces an empty, mutable message for a fully-qualified type name.
///
/// The decoder only depends on this capability, so it can be driven by any
/// schema backend.
pub trait MessageResolver {
    /// Returns a new, empty message of the type named `name`.
    ///
    /// `name` is dotted and package-qualified, e.g. `geometry.Point`. A leading
    /// `.` is accepted. Unknown names fail with [`ErrorKind::Resolve`](crate::ErrorKind::Resolve).
    fn resolve(&self, name: &str) -> Result<DynamicMessage>;
}

impl<T> MessageResolver for &T
where
    T: MessageResolver + ?Sized,
{
    fn resolve(&self, name: &str) -> Result<DynamicMessage> {
        (**self).resolve(name)
    }
}

/// The message types declared by a set of loaded `.proto` files.
#[derive(Debug, Clone)]
pub struct Registry {
    pool: DescriptorPool,
}

impl Registry {
    /// Creates a registry over every message declared in `pool`.
    pub fn new(pool: DescriptorPool) -> Registry {
        Registry { pool }
    }

    /// The descriptor pool backing this registry.
    pub fn pool(&self) -> &DescriptorPool {
        &self.pool
    }

    /// Fully-qualified names of every registered message, nested ones included.
    pub fn message_names(&self) -> Vec<String> {
        self.pool
            .all_messages()
            .map(|message| message.full_name().to_owned())
            .collect()
    }
}

impl MessageResolver for Registry {
    fn resolve(&self, name: &str) -> Result<DynamicMessage> {
        let qualified = name.strip_prefix('.').unwrap_or(name);
        match self.pool.get_message_by_name(qualified) {
            Some(descriptor) => {
                trace!("resolved message: {:?}", descriptor.full_name());
                Ok(DynamicMessage::new(descriptor))
            }
            None => Err(Error::resolve(name)),
        }
    }
}
