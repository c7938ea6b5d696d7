//! Handler resolution - the core of the bus.
//!
//! `HandlerBuilder` turns "give me the handler for `T`" into a ready-to-call
//! chain:
//!
//! ```text
//! caller ──► Pipeline*Handler ──► stage N ──► … ──► stage 1 ──► *Stage ──► handler(s)
//! ```
//!
//! 1. Look up the registration for `T`.
//! 2. Activate fresh handler instances and merge them (exactly one for
//!    commands and queries, a multicast for events).
//! 3. Fold the registration's pipeline around the merged handler, first
//!    stage innermost.
//! 4. Convert the outermost stage back into the caller's handler shape.
//!
//! When `T` has no registration the builder resolves the handler for
//! `NoMatchingRegistrationEvent` instead and hands back an adapter that
//! notifies it. Only when that is missing too does resolution fail.

mod fallback;
mod strategy;

pub use fallback::{FallbackCommandHandler, FallbackEventHandler, FallbackQueryHandler};
pub use strategy::{CommandResolution, EventResolution, QueryResolution, Resolution};

use std::any::TypeId;

use crate::activator::HandlerActivator;
use crate::error::ResolveError;
use crate::handler::{CommandHandler, EventHandler, MulticastEventHandler, QueryHandler};
use crate::message::{Command, Event, NoMatchingRegistrationEvent, Query, TypeKey};
use crate::pipeline;
use crate::registry::Registry;

/// Resolves typed handler chains from a registry and an activator.
///
/// Holds no state of its own beyond its collaborators, so it can be shared
/// across threads (e.g. behind an `Arc`) and every call builds an
/// independent chain.
///
/// ## Example
///
/// ```
/// use microbus::{
///     Command, CommandHandler, FactoryActivator, HandlerBuilder, HandlerError, InMemoryRegistry,
///     Message,
/// };
///
/// struct Ping;
/// impl Message for Ping {}
/// impl Command for Ping {}
///
/// struct PingHandler;
///
/// impl CommandHandler<Ping> for PingHandler {
///     fn handle(&self, _: &Ping) -> Result<(), HandlerError> {
///         Ok(())
///     }
/// }
///
/// let builder = HandlerBuilder::new(
///     InMemoryRegistry::new().command::<Ping, PingHandler>(),
///     FactoryActivator::new().command::<Ping, PingHandler, _>(|| PingHandler),
/// );
///
/// let handler = builder.resolve_command_handler::<Ping>().unwrap();
/// handler.handle(&Ping).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HandlerBuilder<R, A> {
    registry: R,
    activator: A,
}

impl<R: Registry, A: HandlerActivator> HandlerBuilder<R, A> {
    pub fn new(registry: R, activator: A) -> Self {
        Self {
            registry,
            activator,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn activator(&self) -> &A {
        &self.activator
    }

    /// Resolve the handler chain for command `C`.
    pub fn resolve_command_handler<C: Command>(&self) -> Result<Box<dyn CommandHandler<C>>, ResolveError> {
        self.resolve::<CommandResolution<C>>()?
            .ok_or(ResolveError::NoRegistration {
                message_type: TypeKey::of::<C>(),
            })
    }

    /// Resolve the handler chain for query `Q`.
    pub fn resolve_query_handler<Q: Query>(&self) -> Result<Box<dyn QueryHandler<Q>>, ResolveError> {
        self.resolve::<QueryResolution<Q>>()?
            .ok_or(ResolveError::NoRegistration {
                message_type: TypeKey::of::<Q>(),
            })
    }

    /// Resolve the handler chain for event `E`.
    ///
    /// An event nobody subscribes to (and no fallback sink) resolves to a
    /// handler with zero subscribers rather than an error.
    pub fn resolve_event_handler<E: Event>(&self) -> Result<Box<dyn EventHandler<E>>, ResolveError> {
        match self.try_resolve_event_handler::<E>()? {
            Some(handler) => Ok(handler),
            None => {
                tracing::debug!(
                    message_type = TypeKey::of::<E>().short_name(),
                    "event has no subscribers"
                );
                Ok(Box::new(MulticastEventHandler::<E>::empty()))
            }
        }
    }

    /// Like `resolve_event_handler`, but reports absence as `None`.
    pub fn try_resolve_event_handler<E: Event>(&self) -> Result<Option<Box<dyn EventHandler<E>>>, ResolveError> {
        self.resolve::<EventResolution<E>>()
    }

    /// Run the resolution algorithm for strategy `S`.
    ///
    /// Returns `Ok(None)` when neither a registration nor a fallback sink
    /// exists; the entry points decide what absence means for their kind.
    pub fn resolve<S: Resolution>(&self) -> Result<Option<S::Handler>, ResolveError> {
        let message_type = TypeKey::of::<S::Message>();
        let Some(registration) = self.registry.registration_for(message_type.id()) else {
            return self.resolve_unregistered::<S>(message_type);
        };

        if registration.kind() != S::KIND {
            return Err(ResolveError::KindMismatch {
                message_type,
                registered: registration.kind(),
                requested: S::KIND,
            });
        }

        let handlers = self.activator.activate_handlers::<S::Handler>(registration)?;
        tracing::debug!(
            message_type = message_type.short_name(),
            kind = %S::KIND,
            handlers = handlers.len(),
            stages = registration.pipeline().len(),
            "resolving handler"
        );

        let merged = S::merge(message_type, handlers)?;
        let outermost = pipeline::compose(&self.activator, registration.pipeline(), S::into_stage(merged))?;
        Ok(Some(S::from_stage(outermost)))
    }

    fn resolve_unregistered<S: Resolution>(&self, message_type: TypeKey) -> Result<Option<S::Handler>, ResolveError> {
        // The fallback event never falls back to itself.
        if message_type.id() == TypeId::of::<NoMatchingRegistrationEvent>() {
            return Ok(None);
        }

        let fallback = self.resolve::<EventResolution<NoMatchingRegistrationEvent>>()?;
        Ok(fallback.map(|sink| {
            tracing::warn!(
                message_type = message_type.short_name(),
                kind = %S::KIND,
                "no registration, routing to fallback handler"
            );
            S::from_fallback(sink)
        }))
    }
}
