//! `reconerp-ledger` — quantity reconciliation over fulfillment history.
//!
//! Cumulative fulfilled quantity for an order line is the sum across
//! **all** fulfillment events that reference it, never a single event's
//! quantity field: a line may be fulfilled across several partial
//! deliveries and invoices, arriving out of order. Reconciliation is
//! recomputed fresh from the event history on every derivation call.

pub mod fulfillment;

pub use fulfillment::{FulfillmentEvent, FulfillmentKind, LineReconciliation, reconcile};
