//! In-memory collaborator implementations.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use reconerp_core::{
    DeliveryId, DomainError, DomainResult, ItemId, OrderId, OrderLineId, PurchaseOrderId, QuoteId,
    UserId,
};
use reconerp_documents::{
    Delivery, DeliveryLine, InvoiceLineRecord, Item, OrderLine, PurchaseOrder, PurchaseOrderLine,
    QuoteLine, Quotation, SalesOrder,
};
use reconerp_ledger::FulfillmentEvent;

use crate::document::DerivedDocument;
use crate::storage::{DerivedDocumentStore, ItemMaster, PersistFailure, SourceStore};

fn poisoned(_: impl core::fmt::Debug) -> DomainError {
    DomainError::fatal("store lock poisoned")
}

#[derive(Debug, Default)]
struct SourceData {
    orders: HashMap<OrderId, SalesOrder>,
    order_lines: HashMap<OrderId, Vec<OrderLine>>,
    quotes: HashMap<QuoteId, Quotation>,
    quote_lines: HashMap<QuoteId, Vec<QuoteLine>>,
    deliveries: HashMap<DeliveryId, Delivery>,
    delivery_lines: HashMap<DeliveryId, Vec<DeliveryLine>>,
    purchase_orders: HashMap<PurchaseOrderId, PurchaseOrder>,
    purchase_order_lines: HashMap<PurchaseOrderId, Vec<PurchaseOrderLine>>,
    events: Vec<FulfillmentEvent>,
}

/// In-memory upstream document store.
#[derive(Debug, Default)]
pub struct InMemorySourceStore {
    inner: RwLock<SourceData>,
}

impl InMemorySourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_sales_order(&self, order: SalesOrder, lines: Vec<OrderLine>) {
        if let Ok(mut data) = self.inner.write() {
            data.order_lines.insert(order.id, lines);
            data.orders.insert(order.id, order);
        }
    }

    pub fn put_quotation(&self, quote: Quotation, lines: Vec<QuoteLine>) {
        if let Ok(mut data) = self.inner.write() {
            data.quote_lines.insert(quote.id, lines);
            data.quotes.insert(quote.id, quote);
        }
    }

    /// Register a delivery; its lines with an order-line reference are
    /// recorded as fulfillment events.
    pub fn put_delivery(&self, delivery: Delivery, lines: Vec<DeliveryLine>) {
        if let Ok(mut data) = self.inner.write() {
            for line in &lines {
                if line.order_line_id.is_some() {
                    data.events.push(FulfillmentEvent::from_delivery_line(&delivery, line));
                }
            }
            data.delivery_lines.insert(delivery.id, lines);
            data.deliveries.insert(delivery.id, delivery);
        }
    }

    pub fn put_purchase_order(&self, order: PurchaseOrder, lines: Vec<PurchaseOrderLine>) {
        if let Ok(mut data) = self.inner.write() {
            data.purchase_order_lines.insert(order.id, lines);
            data.purchase_orders.insert(order.id, order);
        }
    }

    /// Record an already-persisted invoice line as fulfillment history.
    pub fn record_invoice_line(&self, record: &InvoiceLineRecord, occurred_at: DateTime<Utc>) {
        if let Ok(mut data) = self.inner.write() {
            data.events.push(FulfillmentEvent::from_invoice_line(record, occurred_at));
        }
    }
}

impl SourceStore for InMemorySourceStore {
    fn sales_order(&self, id: OrderId) -> DomainResult<Option<SalesOrder>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.orders.get(&id).cloned())
    }

    fn order_lines(&self, order_id: OrderId) -> DomainResult<Vec<OrderLine>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.order_lines.get(&order_id).cloned().unwrap_or_default())
    }

    fn quotation(&self, id: QuoteId) -> DomainResult<Option<Quotation>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.quotes.get(&id).cloned())
    }

    fn quote_lines(&self, quote_id: QuoteId) -> DomainResult<Vec<QuoteLine>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.quote_lines.get(&quote_id).cloned().unwrap_or_default())
    }

    fn delivery(&self, id: DeliveryId) -> DomainResult<Option<Delivery>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.deliveries.get(&id).cloned())
    }

    fn delivery_lines(&self, delivery_id: DeliveryId) -> DomainResult<Vec<DeliveryLine>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.delivery_lines.get(&delivery_id).cloned().unwrap_or_default())
    }

    fn purchase_order(&self, id: PurchaseOrderId) -> DomainResult<Option<PurchaseOrder>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.purchase_orders.get(&id).cloned())
    }

    fn purchase_order_lines(&self, id: PurchaseOrderId) -> DomainResult<Vec<PurchaseOrderLine>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data.purchase_order_lines.get(&id).cloned().unwrap_or_default())
    }

    fn fulfillment_events(&self, order_line_id: OrderLineId) -> DomainResult<Vec<FulfillmentEvent>> {
        let data = self.inner.read().map_err(poisoned)?;
        Ok(data
            .events
            .iter()
            .filter(|e| e.order_line_id == Some(order_line_id))
            .cloned()
            .collect())
    }
}

/// In-memory item master with placeholder minting.
#[derive(Debug, Default)]
pub struct InMemoryItemMaster {
    items: RwLock<HashMap<ItemId, Item>>,
    placeholder_seq: AtomicU64,
}

impl InMemoryItemMaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, item: Item) {
        if let Ok(mut items) = self.items.write() {
            items.insert(item.id, item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ItemMaster for InMemoryItemMaster {
    fn find(&self, id: ItemId) -> DomainResult<Option<Item>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(&id).cloned())
    }

    fn create_placeholder(&self, description: &str) -> DomainResult<Item> {
        let seq = self.placeholder_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let item = Item {
            id: ItemId::new(),
            description: description.to_string(),
            barcode: Some(format!("AUTO-{seq:06}")),
            supplier_code: Some(format!("AUTO-SUP-{seq:06}")),
        };

        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(item.id, item.clone());
        Ok(item)
    }
}

#[derive(Debug, Default)]
struct DerivedData {
    documents: Vec<DerivedDocument>,
    numbers: HashSet<String>,
}

/// In-memory derived document sink.
///
/// Persists header + lines as one unit (a single vector push), and can
/// simulate a dangling created-by reference for exercising the audit
/// retry path.
#[derive(Debug, Default)]
pub struct InMemoryDerivedStore {
    inner: RwLock<DerivedData>,
    missing_users: RwLock<HashSet<UserId>>,
}

impl InMemoryDerivedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `user` as nonexistent: persisting a document whose
    /// created-by points at it fails with an audit-reference violation.
    pub fn mark_user_missing(&self, user: UserId) {
        if let Ok(mut users) = self.missing_users.write() {
            users.insert(user);
        }
    }

    pub fn documents(&self) -> Vec<DerivedDocument> {
        self.inner.read().map(|data| data.documents.clone()).unwrap_or_default()
    }
}

impl DerivedDocumentStore for InMemoryDerivedStore {
    fn persist(&self, document: &DerivedDocument) -> Result<(), PersistFailure> {
        if let Some(user) = document.created_by {
            let missing = self
                .missing_users
                .read()
                .map_err(|_| PersistFailure::Io("store lock poisoned".to_string()))?;
            if missing.contains(&user) {
                return Err(PersistFailure::AuditReference(format!(
                    "created_by user {user} does not exist"
                )));
            }
        }

        let mut data = self
            .inner
            .write()
            .map_err(|_| PersistFailure::Io("store lock poisoned".to_string()))?;

        if !data.numbers.insert(document.number.as_str().to_string()) {
            return Err(PersistFailure::UniqueNumber(document.number.as_str().to_string()));
        }

        data.documents.push(document.clone());
        Ok(())
    }
}
