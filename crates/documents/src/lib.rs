//! `reconerp-documents` — collaborator record shapes.
//!
//! Read-only input records owned by the surrounding application: sales
//! orders, quotations, deliveries, existing invoice lines, purchase
//! orders, and item master data. The derivation engine consumes these and
//! never mutates them.

pub mod delivery;
pub mod invoice;
pub mod item;
pub mod order;
pub mod pricing_fields;
pub mod purchase;
pub mod quote;

pub use delivery::{Delivery, DeliveryLine};
pub use invoice::InvoiceLineRecord;
pub use item::Item;
pub use order::{OrderLine, SalesOrder};
pub use pricing_fields::PricingFields;
pub use purchase::{PurchaseOrder, PurchaseOrderLine};
pub use quote::{QuoteLine, Quotation};
