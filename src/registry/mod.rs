//! Registration lookup.
//!
//! The `Registry` trait is the read side the resolver consumes. The crate
//! ships `InMemoryRegistry`; applications with their own configuration
//! source can implement the trait directly.

mod in_memory;
mod registration;

pub use in_memory::InMemoryRegistry;
#[cfg(feature = "serde")]
pub use in_memory::RegistrationSummary;
pub use registration::Registration;

use std::any::TypeId;
use std::sync::Arc;

/// Read-only lookup of registrations by message type.
///
/// Implementations must tolerate concurrent calls; lookups never mutate.
pub trait Registry: Send + Sync {
    fn registration_for(&self, message_type: TypeId) -> Option<&Registration>;
}

impl<R: Registry + ?Sized> Registry for Arc<R> {
    fn registration_for(&self, message_type: TypeId) -> Option<&Registration> {
        (**self).registration_for(message_type)
    }
}

impl<R: Registry + ?Sized> Registry for &R {
    fn registration_for(&self, message_type: TypeId) -> Option<&Registration> {
        (**self).registration_for(message_type)
    }
}
