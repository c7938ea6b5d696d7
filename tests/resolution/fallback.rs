//! Unregistered messages and the `NoMatchingRegistrationEvent` sink.

use microbus::{
    FactoryActivator, HandlerBuilder, HandlerError, InMemoryRegistry, NoMatchingRegistrationEvent,
    Pipeline, Registration, ResolveError, TypeKey,
};

use crate::support::{
    activator, AccountFrozen, CloseAccount, GetStatement, Journal, StageA, UnhandledRecorder,
};

fn with_fallback(journal: &Journal) -> HandlerBuilder<InMemoryRegistry, FactoryActivator> {
    HandlerBuilder::new(
        InMemoryRegistry::new().event::<NoMatchingRegistrationEvent, UnhandledRecorder>(),
        activator(journal),
    )
}

#[test]
fn unregistered_command_routes_to_fallback() {
    let journal = Journal::new();
    let builder = with_fallback(&journal);

    let handler = builder.resolve_command_handler::<CloseAccount>().unwrap();
    assert!(journal.entries().is_empty());

    handler.handle(&CloseAccount).unwrap();
    assert_eq!(journal.entries(), vec!["unhandled command CloseAccount"]);
}

#[test]
fn unregistered_event_routes_to_fallback() {
    let journal = Journal::new();
    let builder = with_fallback(&journal);

    let handler = builder
        .try_resolve_event_handler::<AccountFrozen>()
        .unwrap()
        .expect("fallback sink is registered");
    handler.handle(&AccountFrozen).unwrap();

    assert_eq!(journal.entries(), vec!["unhandled event AccountFrozen"]);
}

#[test]
fn unregistered_query_notifies_but_yields_no_result() {
    let journal = Journal::new();
    let builder = with_fallback(&journal);

    let handler = builder.resolve_query_handler::<GetStatement>().unwrap();
    let err = handler.handle(&GetStatement).unwrap_err();

    assert!(matches!(err, HandlerError::NoMatchingRegistration(ref name) if name == "GetStatement"));
    assert_eq!(journal.entries(), vec!["unhandled query GetStatement"]);
}

#[test]
fn fallback_runs_through_its_own_pipeline() {
    let journal = Journal::new();
    let builder = HandlerBuilder::new(
        InMemoryRegistry::new().event_with::<NoMatchingRegistrationEvent, UnhandledRecorder>(
            Pipeline::new().then::<StageA>(),
        ),
        activator(&journal),
    );

    let handler = builder.resolve_command_handler::<CloseAccount>().unwrap();
    handler.handle(&CloseAccount).unwrap();

    assert_eq!(
        journal.entries(),
        vec!["enter A", "unhandled command CloseAccount", "leave A"]
    );
}

#[test]
fn no_fallback_means_no_registration() {
    let builder = HandlerBuilder::new(InMemoryRegistry::new(), activator(&Journal::new()));

    let err = builder.resolve_command_handler::<CloseAccount>().err().unwrap();

    assert_eq!(
        err,
        ResolveError::NoRegistration {
            message_type: TypeKey::of::<CloseAccount>(),
        }
    );
}

#[test]
fn fallback_registration_without_subscribers_still_counts() {
    let builder = HandlerBuilder::new(
        InMemoryRegistry::new().register(Registration::event::<NoMatchingRegistrationEvent>()),
        activator(&Journal::new()),
    );

    let handler = builder.resolve_command_handler::<CloseAccount>().unwrap();
    assert!(handler.handle(&CloseAccount).is_ok());
}

#[test]
fn fallback_event_itself_never_recurses() {
    let journal = Journal::new();
    let builder = HandlerBuilder::new(InMemoryRegistry::new(), activator(&journal));

    let resolved = builder
        .try_resolve_event_handler::<NoMatchingRegistrationEvent>()
        .unwrap();
    assert!(resolved.is_none());

    let handler = builder
        .resolve_event_handler::<NoMatchingRegistrationEvent>()
        .unwrap();
    handler
        .handle(&NoMatchingRegistrationEvent::for_message::<CloseAccount>(
            microbus::MessageKind::Command,
        ))
        .unwrap();
    assert!(journal.entries().is_empty());
}

#[test]
fn fallback_activation_errors_propagate() {
    let builder = HandlerBuilder::new(
        InMemoryRegistry::new().event::<NoMatchingRegistrationEvent, UnhandledRecorder>(),
        FactoryActivator::new(),
    );

    let err = builder.resolve_command_handler::<CloseAccount>().err().unwrap();

    assert!(matches!(err, ResolveError::ActivationFailed { .. }));
}
