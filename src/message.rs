//! Message markers and type identity.
//!
//! A message is any `'static` type that opts into one of three kinds by
//! implementing `Command`, `Query` or `Event`. The concrete type is the
//! message's identity; `TypeKey` captures it together with a readable name
//! for diagnostics.

use std::any::{type_name, Any, TypeId};
use std::fmt;

/// Marker for every value dispatched through the bus.
pub trait Message: Any {}

/// A message handled by exactly one handler, producing no value.
pub trait Command: Message {}

/// A message handled by any number of handlers (including none).
pub trait Event: Message {}

/// A message handled by exactly one handler, producing `Self::Result`.
pub trait Query: Message {
    type Result: Send + 'static;
}

/// The three message kinds and their multiplicity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum MessageKind {
    Command,
    Event,
    Query,
}

impl MessageKind {
    /// Whether a registration of this kind must resolve to exactly one handler.
    pub fn requires_single_handler(self) -> bool {
        !matches!(self, MessageKind::Event)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Command => write!(f, "command"),
            MessageKind::Event => write!(f, "event"),
            MessageKind::Query => write!(f, "query"),
        }
    }
}

/// Identity of a message, handler or pipeline stage type.
///
/// Equality and hashing only look at the `TypeId`; the name is carried for
/// error messages and logs.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `my_app::orders::PlaceOrder`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, e.g. `PlaceOrder`.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        let start = base.rfind("::").map(|i| i + 2).unwrap_or(0);
        &self.name[start..]
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Published when a message is dispatched that has no registration.
///
/// Register a handler for this event to turn "unhandled message" into a
/// notification instead of a resolution error. It is never itself subject
/// to a fallback: if it has no registration, resolving it yields nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatchingRegistrationEvent {
    message_type: TypeKey,
    kind: MessageKind,
}

impl NoMatchingRegistrationEvent {
    pub fn new(message_type: TypeKey, kind: MessageKind) -> Self {
        Self { message_type, kind }
    }

    /// Build the notification for message type `M`.
    pub fn for_message<M: Message>(kind: MessageKind) -> Self {
        Self::new(TypeKey::of::<M>(), kind)
    }

    /// The message type that had no registration.
    pub fn message_type(&self) -> TypeKey {
        self.message_type
    }

    /// The kind the message was requested as.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}

impl Message for NoMatchingRegistrationEvent {}
impl Event for NoMatchingRegistrationEvent {}

#[cfg(feature = "serde")]
impl serde::Serialize for NoMatchingRegistrationEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("NoMatchingRegistrationEvent", 2)?;
        state.serialize_field("message_type", self.message_type.name())?;
        state.serialize_field("kind", &self.kind)?;
        state.end()
    }
}
