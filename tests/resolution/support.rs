//! Shared messages, handlers and stages for resolution tests.
//!
//! Everything records into a `Journal` so tests can assert on call order.

use std::sync::{Arc, Mutex};

use microbus::{
    Command, CommandHandler, Envelope, Event, EventHandler, FactoryActivator, HandlerError, Message,
    NoMatchingRegistrationEvent, PipelineHandler, Query, QueryHandler, Reply,
};

// ============================================================================
// Journal
// ============================================================================

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

// ============================================================================
// Messages
// ============================================================================

pub struct OpenAccount {
    pub owner: String,
}
impl Message for OpenAccount {}
impl Command for OpenAccount {}

pub struct Deposit {
    pub amount: u64,
}
impl Message for Deposit {}
impl Command for Deposit {}

/// Never registered anywhere.
pub struct CloseAccount;
impl Message for CloseAccount {}
impl Command for CloseAccount {}

pub struct AccountOpened {
    pub owner: String,
}
impl Message for AccountOpened {}
impl Event for AccountOpened {}

/// Never registered anywhere.
pub struct AccountFrozen;
impl Message for AccountFrozen {}
impl Event for AccountFrozen {}

pub struct GetBalance {
    pub owner: String,
}
impl Message for GetBalance {}
impl Query for GetBalance {
    type Result = u64;
}

/// Never registered anywhere.
pub struct GetStatement;
impl Message for GetStatement {}
impl Query for GetStatement {
    type Result = Vec<String>;
}

// ============================================================================
// Handlers
// ============================================================================

pub struct OpenAccountHandler {
    pub journal: Journal,
}

impl CommandHandler<OpenAccount> for OpenAccountHandler {
    fn handle(&self, command: &OpenAccount) -> Result<(), HandlerError> {
        self.journal.record(format!("open {}", command.owner));
        Ok(())
    }
}

/// A second handler for `OpenAccount`, used to trip the multiplicity check.
pub struct MirrorAccountHandler {
    pub journal: Journal,
}

impl CommandHandler<OpenAccount> for MirrorAccountHandler {
    fn handle(&self, command: &OpenAccount) -> Result<(), HandlerError> {
        self.journal.record(format!("mirror {}", command.owner));
        Ok(())
    }
}

pub struct DepositHandler {
    pub journal: Journal,
}

impl CommandHandler<Deposit> for DepositHandler {
    fn handle(&self, command: &Deposit) -> Result<(), HandlerError> {
        if command.amount == 0 {
            return Err(HandlerError::Rejected("deposit must be positive".into()));
        }
        self.journal.record(format!("deposit {}", command.amount));
        Ok(())
    }
}

pub struct WelcomeEmail {
    pub journal: Journal,
}

impl EventHandler<AccountOpened> for WelcomeEmail {
    fn handle(&self, event: &AccountOpened) -> Result<(), HandlerError> {
        self.journal.record(format!("welcome {}", event.owner));
        Ok(())
    }
}

pub struct AuditTrail {
    pub journal: Journal,
}

impl EventHandler<AccountOpened> for AuditTrail {
    fn handle(&self, event: &AccountOpened) -> Result<(), HandlerError> {
        self.journal.record(format!("audit {}", event.owner));
        Ok(())
    }
}

pub struct BalanceHandler {
    pub journal: Journal,
}

impl QueryHandler<GetBalance> for BalanceHandler {
    fn handle(&self, query: &GetBalance) -> Result<u64, HandlerError> {
        self.journal.record(format!("balance {}", query.owner));
        Ok(250)
    }
}

/// Records every unhandled message it is told about.
pub struct UnhandledRecorder {
    pub journal: Journal,
}

impl EventHandler<NoMatchingRegistrationEvent> for UnhandledRecorder {
    fn handle(&self, event: &NoMatchingRegistrationEvent) -> Result<(), HandlerError> {
        self.journal.record(format!(
            "unhandled {} {}",
            event.kind(),
            event.message_type().short_name()
        ));
        Ok(())
    }
}

// ============================================================================
// Pipeline stages
// ============================================================================

macro_rules! recording_stage {
    ($name:ident, $label:literal) => {
        pub struct $name {
            inner: Box<dyn PipelineHandler>,
            journal: Journal,
        }

        impl PipelineHandler for $name {
            fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
                self.journal.record(concat!("enter ", $label));
                let reply = self.inner.handle(envelope);
                self.journal.record(concat!("leave ", $label));
                reply
            }
        }
    };
}

recording_stage!(StageA, "A");
recording_stage!(StageB, "B");
recording_stage!(StageC, "C");

/// Answers every message itself without delegating inward.
pub struct Gate {
    #[allow(dead_code)]
    inner: Box<dyn PipelineHandler>,
    journal: Journal,
}

impl PipelineHandler for Gate {
    fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
        self.journal
            .record(format!("gate {}", envelope.message_type().short_name()));
        match envelope.downcast_ref::<GetBalance>() {
            Some(_) => Ok(Box::new(999u64)),
            None => Ok(Box::new(())),
        }
    }
}

/// Registered in the registry but never given a factory.
pub struct Unbuildable;

impl PipelineHandler for Unbuildable {
    fn handle(&self, _envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
        Ok(Box::new(()))
    }
}

// ============================================================================
// Activator
// ============================================================================

/// Activator knowing every handler and stage above, all writing to `journal`.
pub fn activator(journal: &Journal) -> FactoryActivator {
    let j = journal.clone();
    let activator = FactoryActivator::new().command::<OpenAccount, OpenAccountHandler, _>(move || {
        OpenAccountHandler { journal: j.clone() }
    });
    let j = journal.clone();
    let activator = activator.command::<OpenAccount, MirrorAccountHandler, _>(move || {
        MirrorAccountHandler { journal: j.clone() }
    });
    let j = journal.clone();
    let activator = activator
        .command::<Deposit, DepositHandler, _>(move || DepositHandler { journal: j.clone() });
    let j = journal.clone();
    let activator = activator
        .event::<AccountOpened, WelcomeEmail, _>(move || WelcomeEmail { journal: j.clone() });
    let j = journal.clone();
    let activator = activator
        .event::<AccountOpened, AuditTrail, _>(move || AuditTrail { journal: j.clone() });
    let j = journal.clone();
    let activator = activator
        .query::<GetBalance, BalanceHandler, _>(move || BalanceHandler { journal: j.clone() });
    let j = journal.clone();
    let activator = activator.event::<NoMatchingRegistrationEvent, UnhandledRecorder, _>(move || {
        UnhandledRecorder { journal: j.clone() }
    });

    let j = journal.clone();
    let activator = activator.stage::<StageA, _>(move |inner| StageA {
        inner,
        journal: j.clone(),
    });
    let j = journal.clone();
    let activator = activator.stage::<StageB, _>(move |inner| StageB {
        inner,
        journal: j.clone(),
    });
    let j = journal.clone();
    let activator = activator.stage::<StageC, _>(move |inner| StageC {
        inner,
        journal: j.clone(),
    });
    let j = journal.clone();
    activator.stage::<Gate, _>(move |inner| Gate {
        inner,
        journal: j.clone(),
    })
}
