use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use super::HandlerActivator;
use crate::error::ResolveError;
use crate::handler::{CommandHandler, EventHandler, QueryHandler};
use crate::message::{Command, Event, Query, TypeKey};
use crate::pipeline::PipelineHandler;
use crate::registry::Registration;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;
type StageFactory = Box<dyn Fn(Box<dyn PipelineHandler>) -> Box<dyn PipelineHandler> + Send + Sync>;

/// Activator backed by registered factory closures.
///
/// Handler factories are keyed by handler type and the shape they produce,
/// so one handler type can serve several messages. Every call to a factory
/// must return a fresh instance.
///
/// ## Example
///
/// ```
/// use microbus::{Command, CommandHandler, FactoryActivator, HandlerError, Message};
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
/// let activator = FactoryActivator::new().command::<Ping, PingHandler, _>(|| PingHandler);
/// ```
#[derive(Default)]
pub struct FactoryActivator {
    handlers: HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
    stages: HashMap<TypeId, StageFactory>,
}

impl FactoryActivator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory for handler `H` of command `C`.
    pub fn command<C, H, F>(self, factory: F) -> Self
    where
        C: Command,
        H: CommandHandler<C> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let factory: Factory<Box<dyn CommandHandler<C>>> =
            Box::new(move || -> Box<dyn CommandHandler<C>> { Box::new(factory()) });
        self.insert::<H, _>(factory)
    }

    /// Register the factory for handler `H` of event `E`.
    pub fn event<E, H, F>(self, factory: F) -> Self
    where
        E: Event,
        H: EventHandler<E> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let factory: Factory<Box<dyn EventHandler<E>>> =
            Box::new(move || -> Box<dyn EventHandler<E>> { Box::new(factory()) });
        self.insert::<H, _>(factory)
    }

    /// Register the factory for handler `H` of query `Q`.
    pub fn query<Q, H, F>(self, factory: F) -> Self
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let factory: Factory<Box<dyn QueryHandler<Q>>> =
            Box::new(move || -> Box<dyn QueryHandler<Q>> { Box::new(factory()) });
        self.insert::<H, _>(factory)
    }

    /// Register the factory for pipeline stage `S`, given the handler it wraps.
    pub fn stage<S, F>(mut self, factory: F) -> Self
    where
        S: PipelineHandler + 'static,
        F: Fn(Box<dyn PipelineHandler>) -> S + Send + Sync + 'static,
    {
        let factory: StageFactory =
            Box::new(move |inner: Box<dyn PipelineHandler>| -> Box<dyn PipelineHandler> {
                Box::new(factory(inner))
            });
        self.stages.insert(TypeId::of::<S>(), factory);
        self
    }

    fn insert<H: 'static, T: 'static>(mut self, factory: Factory<T>) -> Self {
        self.handlers
            .insert((TypeId::of::<H>(), TypeId::of::<T>()), Box::new(factory));
        self
    }
}

impl HandlerActivator for FactoryActivator {
    fn activate_handlers<H: 'static>(&self, registration: &Registration) -> Result<Vec<H>, ResolveError> {
        registration
            .handler_types()
            .iter()
            .map(|handler_type| {
                self.handlers
                    .get(&(handler_type.id(), TypeId::of::<H>()))
                    .and_then(|factory| factory.downcast_ref::<Factory<H>>())
                    .map(|factory| factory())
                    .ok_or(ResolveError::ActivationFailed {
                        type_name: handler_type.name(),
                    })
            })
            .collect()
    }

    fn activate_stage(
        &self,
        stage: &TypeKey,
        inner: Box<dyn PipelineHandler>,
    ) -> Result<Box<dyn PipelineHandler>, ResolveError> {
        let factory = self
            .stages
            .get(&stage.id())
            .ok_or(ResolveError::ActivationFailed {
                type_name: stage.name(),
            })?;
        Ok(factory(inner))
    }
}

impl fmt::Debug for FactoryActivator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryActivator")
            .field("handlers", &self.handlers.len())
            .field("stages", &self.stages.len())
            .finish()
    }
}
