//! Wires two handlers to `order_created` and dispatches one order.
//!
//! Run with `RUST_LOG=debug EDA_LOG_FORMAT=compact` to see registry activity.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use eda_events::{Dispatcher, DispatcherConfig, Event, Handler, HandlerRef, NamedEvent};

/// Keeps a running total of order amounts.
#[derive(Default)]
struct Revenue {
    cents: AtomicU64,
}

impl Handler<NamedEvent> for Revenue {
    fn handle(&self, event: &NamedEvent) {
        let cents = event.payload()["amountCents"].as_u64().unwrap_or(0);
        self.cents.fetch_add(cents, Ordering::Relaxed);
    }

    fn name(&self) -> &str {
        "revenue"
    }
}

fn main() -> anyhow::Result<()> {
    eda_observability::init();

    let mut dispatcher: Dispatcher = Dispatcher::with_config(DispatcherConfig::from_env());

    let revenue = Arc::new(Revenue::default());
    dispatcher.register("order_created", HandlerRef::from_arc(Arc::clone(&revenue)))?;
    dispatcher.register(
        "order_created",
        HandlerRef::new(|e: &NamedEvent| {
            info!(order_id = %e.payload()["orderId"], at = %e.timestamp(), "send confirmation email");
        }),
    )?;

    let report = dispatcher.dispatch(&NamedEvent::new(
        "order_created",
        json!({ "orderId": 42, "amountCents": 1999 }),
    ));

    info!(
        invoked = report.invoked,
        revenue_cents = revenue.cents.load(Ordering::Relaxed),
        "order processed"
    );
    Ok(())
}
