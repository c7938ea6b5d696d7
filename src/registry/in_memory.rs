//! In-memory registry built at configuration time.

use std::any::TypeId;
use std::collections::HashMap;

use super::{Registration, Registry};
use crate::message::{Command, Event, MessageKind, Query, TypeKey};
use crate::pipeline::Pipeline;

/// Registry backed by a `HashMap`, configured with a consuming builder.
///
/// Registering several handlers for one message appends them in call order.
/// The kind of the first registration for a message type sticks; the last
/// pipeline given for a message type wins.
///
/// ## Example
///
/// ```
/// use microbus::{Event, InMemoryRegistry, Message, Pipeline};
///
/// struct OrderPlaced;
/// impl Message for OrderPlaced {}
/// impl Event for OrderPlaced {}
///
/// struct SendReceipt;
/// struct UpdateStock;
///
/// let registry = InMemoryRegistry::new()
///     .event::<OrderPlaced, SendReceipt>()
///     .event::<OrderPlaced, UpdateStock>();
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    registrations: HashMap<TypeId, Registration>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prepared registration, replacing any previous one for the
    /// same message type.
    pub fn register(mut self, registration: Registration) -> Self {
        self.registrations
            .insert(registration.message_type().id(), registration);
        self
    }

    /// Register handler type `H` for command `C`.
    pub fn command<C: Command, H: 'static>(self) -> Self {
        self.add(TypeKey::of::<C>(), MessageKind::Command, TypeKey::of::<H>(), None)
    }

    /// Register handler type `H` for command `C`, wrapped in `pipeline`.
    pub fn command_with<C: Command, H: 'static>(self, pipeline: Pipeline) -> Self {
        self.add(
            TypeKey::of::<C>(),
            MessageKind::Command,
            TypeKey::of::<H>(),
            Some(pipeline),
        )
    }

    /// Subscribe handler type `H` to event `E`.
    pub fn event<E: Event, H: 'static>(self) -> Self {
        self.add(TypeKey::of::<E>(), MessageKind::Event, TypeKey::of::<H>(), None)
    }

    /// Subscribe handler type `H` to event `E`, wrapped in `pipeline`.
    pub fn event_with<E: Event, H: 'static>(self, pipeline: Pipeline) -> Self {
        self.add(
            TypeKey::of::<E>(),
            MessageKind::Event,
            TypeKey::of::<H>(),
            Some(pipeline),
        )
    }

    /// Register handler type `H` for query `Q`.
    pub fn query<Q: Query, H: 'static>(self) -> Self {
        self.add(TypeKey::of::<Q>(), MessageKind::Query, TypeKey::of::<H>(), None)
    }

    /// Register handler type `H` for query `Q`, wrapped in `pipeline`.
    pub fn query_with<Q: Query, H: 'static>(self, pipeline: Pipeline) -> Self {
        self.add(
            TypeKey::of::<Q>(),
            MessageKind::Query,
            TypeKey::of::<H>(),
            Some(pipeline),
        )
    }

    fn add(
        mut self,
        message_type: TypeKey,
        kind: MessageKind,
        handler: TypeKey,
        pipeline: Option<Pipeline>,
    ) -> Self {
        let registration = self
            .registrations
            .entry(message_type.id())
            .or_insert_with(|| Registration::new(message_type, kind));
        registration.push_handler(handler);
        if let Some(pipeline) = pipeline {
            registration.set_pipeline(pipeline);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registered message types, sorted by name.
    pub fn message_types(&self) -> Vec<TypeKey> {
        let mut types: Vec<TypeKey> = self
            .registrations
            .values()
            .map(Registration::message_type)
            .collect();
        types.sort_by_key(|key| key.name());
        types
    }

    /// Serialisable view of every registration, sorted by message type name.
    #[cfg(feature = "serde")]
    pub fn describe(&self) -> Vec<RegistrationSummary> {
        let mut summaries: Vec<RegistrationSummary> = self
            .registrations
            .values()
            .map(RegistrationSummary::from)
            .collect();
        summaries.sort_by(|a, b| a.message_type.cmp(&b.message_type));
        summaries
    }

    /// `describe()` rendered as pretty JSON.
    #[cfg(feature = "serde")]
    pub fn describe_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.describe())
    }
}

impl Registry for InMemoryRegistry {
    fn registration_for(&self, message_type: TypeId) -> Option<&Registration> {
        self.registrations.get(&message_type)
    }
}

/// Type names of one registration, for diagnostics and configuration dumps.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RegistrationSummary {
    pub message_type: String,
    pub kind: MessageKind,
    pub handlers: Vec<String>,
    pub pipeline: Vec<String>,
}

#[cfg(feature = "serde")]
impl From<&Registration> for RegistrationSummary {
    fn from(registration: &Registration) -> Self {
        Self {
            message_type: registration.message_type().name().to_string(),
            kind: registration.kind(),
            handlers: registration
                .handler_types()
                .iter()
                .map(|h| h.name().to_string())
                .collect(),
            pipeline: registration
                .pipeline()
                .stages()
                .iter()
                .map(|s| s.name().to_string())
                .collect(),
        }
    }
}
