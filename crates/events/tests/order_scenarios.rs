use std::sync::{Arc, Mutex};

use serde_json::{Value as JsonValue, json};

use eda_events::{DispatchError, Dispatcher, Event, Handler, HandlerRef, NamedEvent};

#[derive(Default)]
struct OrderLog {
    calls: Mutex<Vec<(u32, JsonValue)>>,
}

struct OrderHandler {
    id: u32,
    log: Arc<OrderLog>,
}

impl Handler<NamedEvent> for OrderHandler {
    fn handle(&self, event: &NamedEvent) {
        self.log
            .calls
            .lock()
            .unwrap()
            .push((self.id, event.payload().clone()));
    }
}

fn handler(id: u32, log: &Arc<OrderLog>) -> HandlerRef<NamedEvent> {
    HandlerRef::new(OrderHandler {
        id,
        log: Arc::clone(log),
    })
}

#[test]
fn order_created_reaches_both_handlers_in_order() {
    let log = Arc::new(OrderLog::default());
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("order_created", handler(1, &log)).unwrap();
    dispatcher.register("order_created", handler(2, &log)).unwrap();

    let report = dispatcher.dispatch(&NamedEvent::new("order_created", json!({ "orderId": 42 })));

    let calls = log.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(1, json!({ "orderId": 42 })), (2, json!({ "orderId": 42 }))]
    );
    assert_eq!(report.invoked, 2);
}

#[test]
fn clear_forgets_handlers_of_every_event() {
    let log = Arc::new(OrderLog::default());
    let h1 = handler(1, &log);
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("a", h1.clone()).unwrap();
    dispatcher.register("b", h1.clone()).unwrap();

    dispatcher.clear();

    assert!(!dispatcher.has("a", &h1));
    assert!(!dispatcher.has("b", &h1));
    dispatcher.dispatch(&NamedEvent::new("a", JsonValue::Null));
    assert!(log.calls.lock().unwrap().is_empty());
}

#[test]
fn duplicate_registration_is_reported_to_the_caller() {
    let log = Arc::new(OrderLog::default());
    let h1 = handler(1, &log);
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("order_created", h1.clone()).unwrap();

    match dispatcher.register("order_created", h1.clone()) {
        Err(DispatchError::AlreadyRegistered { event_name, handler }) => {
            assert_eq!(event_name, "order_created");
            assert_eq!(handler, h1.id());
        }
        other => panic!("expected AlreadyRegistered, got {other:?}"),
    }
    assert_eq!(dispatcher.handlers()["order_created"].len(), 1);
}

#[test]
fn typed_events_dispatch_through_their_own_dispatcher() {
    #[derive(Debug)]
    struct Shipped {
        tracking: &'static str,
    }

    impl Event for Shipped {
        type Payload = str;

        fn name(&self) -> &str {
            "order_shipped"
        }

        fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
            chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
        }

        fn payload(&self) -> &str {
            self.tracking
        }
    }

    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    let mut dispatcher = Dispatcher::<Shipped>::new();
    dispatcher
        .register(
            "order_shipped",
            HandlerRef::new(move |e: &Shipped| sink.lock().unwrap().push(e.payload().to_string())),
        )
        .unwrap();

    dispatcher.dispatch(&Shipped { tracking: "1Z999" });

    assert_eq!(*seen.lock().unwrap(), vec!["1Z999".to_string()]);
}
