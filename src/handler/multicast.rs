use super::EventHandler;
use crate::error::HandlerError;
use crate::message::Event;

/// Composite event handler invoking every subscriber in registration order.
///
/// Subscribers run sequentially; the first error stops the fan-out and is
/// returned. An empty composite is a valid no-op.
pub struct MulticastEventHandler<E: Event> {
    handlers: Vec<Box<dyn EventHandler<E>>>,
}

impl<E: Event> MulticastEventHandler<E> {
    pub fn new(handlers: Vec<Box<dyn EventHandler<E>>>) -> Self {
        Self { handlers }
    }

    /// A composite with no subscribers.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Event> EventHandler<E> for MulticastEventHandler<E> {
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        for handler in &self.handlers {
            handler.handle(event)?;
        }
        Ok(())
    }
}
