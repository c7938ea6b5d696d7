//! Handler and stage instantiation.
//!
//! The resolver never constructs handlers itself. It asks a
//! `HandlerActivator` for fresh instances on every resolution, so nothing
//! is cached or shared between resolved handler chains.

mod factory;

pub use factory::FactoryActivator;

use std::sync::Arc;

use crate::error::ResolveError;
use crate::message::TypeKey;
use crate::pipeline::PipelineHandler;
use crate::registry::Registration;

/// Builds handler and pipeline stage instances.
pub trait HandlerActivator: Send + Sync {
    /// Instantiate every handler type of `registration` as shape `H`
    /// (e.g. `Box<dyn CommandHandler<C>>`), in registration order.
    fn activate_handlers<H: 'static>(&self, registration: &Registration) -> Result<Vec<H>, ResolveError>;

    /// Instantiate one pipeline stage of type `stage` wrapping `inner`.
    fn activate_stage(
        &self,
        stage: &TypeKey,
        inner: Box<dyn PipelineHandler>,
    ) -> Result<Box<dyn PipelineHandler>, ResolveError>;
}

impl<A: HandlerActivator> HandlerActivator for Arc<A> {
    fn activate_handlers<H: 'static>(&self, registration: &Registration) -> Result<Vec<H>, ResolveError> {
        (**self).activate_handlers(registration)
    }

    fn activate_stage(
        &self,
        stage: &TypeKey,
        inner: Box<dyn PipelineHandler>,
    ) -> Result<Box<dyn PipelineHandler>, ResolveError> {
        (**self).activate_stage(stage, inner)
    }
}
