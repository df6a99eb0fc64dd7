//! Document derivation orchestrator.
//!
//! Top-level workflow: select source lines, borrow descriptions and
//! pricing from related documents, reconcile quantities against the full
//! fulfillment history, compute line financials, and persist a freshly
//! numbered header + line set as one unit.
//!
//! Line-level problems degrade gracefully (skip, fall back, synthesize a
//! placeholder) to maximize the chance of producing a usable document
//! from imperfect upstream data; header-level and persistence problems
//! fail fast with full rollback.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reconerp_core::{
    CustomerId, DeliveryId, DocumentKind, DocumentRef, DomainError, DomainResult, ItemId, OrderId,
    OrderLineId, QuoteId, QuoteLineId, SupplierId, UserId, round_unit_cost,
};
use reconerp_documents::{Item, OrderLine, QuoteLine, Quotation, SalesOrder};
use reconerp_ledger::reconcile;
use reconerp_numbering::{NumberGenerator, NumberStore};
use reconerp_pricing::{
    AncestorPricing, PricingSource, compute_resolved, match_upstream_line, resolve,
};

use crate::document::{
    DerivedDocument, DerivedDocumentType, DerivedLine, DerivedStatus, DocumentTotals,
};
use crate::storage::{DerivedDocumentStore, ItemMaster, PersistFailure, SourceStore};
use crate::warnings::DataQualityWarning;

/// Partitioning criterion for multi-source derivations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Supplier,
}

/// One derivation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivationRequest {
    pub sources: Vec<DocumentRef>,
    pub target: DerivedDocumentType,
    pub group_by: Option<GroupBy>,
    /// Restrict processing to these source line ids (delivery, order, or
    /// quote line ids depending on the source kind).
    pub selected_line_ids: Option<HashSet<Uuid>>,
    /// Audit trail actor; dropped (with a warning) if storage rejects it.
    pub created_by: Option<UserId>,
    /// Currency override; defaults to the first source document's currency.
    pub currency: Option<String>,
}

impl DerivationRequest {
    pub fn new(sources: Vec<DocumentRef>, target: DerivedDocumentType) -> Self {
        Self {
            sources,
            target,
            group_by: None,
            selected_line_ids: None,
            created_by: None,
            currency: None,
        }
    }
}

/// Result of a derivation call: the persisted documents plus every
/// data-quality finding collected along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivationOutcome {
    pub documents: Vec<DerivedDocument>,
    pub warnings: Vec<DataQualityWarning>,
}

/// A selected source line, ready for item resolution, pricing, and
/// computation.
struct PendingLine {
    item_id: Option<ItemId>,
    order_line_id: Option<OrderLineId>,
    quote_line_id: Option<QuoteLineId>,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    candidates: Vec<AncestorPricing>,
}

/// The derivation engine, generic over its storage collaborators.
pub struct DerivationEngine<S, I, D, N> {
    sources: S,
    items: I,
    store: D,
    numbers: NumberGenerator<N>,
}

impl<S, I, D, N> DerivationEngine<S, I, D, N>
where
    S: SourceStore,
    I: ItemMaster,
    D: DerivedDocumentStore,
    N: NumberStore,
{
    pub fn new(sources: S, items: I, store: D, numbers: NumberGenerator<N>) -> Self {
        Self { sources, items, store, numbers }
    }

    /// Derive one or more documents from the requested sources.
    pub fn derive(&self, request: &DerivationRequest) -> DomainResult<DerivationOutcome> {
        if request.sources.is_empty() {
            return Err(DomainError::validation("derivation request has no source documents"));
        }

        match request.target {
            DerivedDocumentType::Invoice => self.derive_invoice(request),
            DerivedDocumentType::PurchaseOrder => self.derive_purchase_orders(request),
        }
    }

    fn derive_invoice(&self, request: &DerivationRequest) -> DomainResult<DerivationOutcome> {
        let mut warnings = Vec::new();
        let mut pending = Vec::new();
        let mut seen = HashSet::new();
        let mut currency = request.currency.clone();
        let mut customer = None;

        for source in &request.sources {
            match source.kind {
                DocumentKind::Delivery => self.collect_from_delivery(
                    DeliveryId::from_uuid(source.id),
                    request,
                    &mut seen,
                    &mut pending,
                    &mut currency,
                    &mut customer,
                    &mut warnings,
                )?,
                DocumentKind::SalesOrder => self.collect_from_order(
                    OrderId::from_uuid(source.id),
                    request,
                    &mut seen,
                    &mut pending,
                    &mut currency,
                    &mut customer,
                    &mut warnings,
                )?,
                other => {
                    return Err(DomainError::validation(format!(
                        "cannot derive an invoice from a {} source",
                        other.as_str()
                    )));
                }
            }
        }

        let lines = self.assemble_lines(pending, &mut warnings)?;
        if lines.is_empty() {
            return Err(DomainError::validation("no processable lines in invoice derivation"));
        }

        let currency = currency
            .ok_or_else(|| DomainError::validation("invoice derivation resolved no currency"))?;
        let document = self.finalize(
            request,
            DerivedDocumentType::Invoice,
            currency,
            None,
            customer,
            request.sources.clone(),
            lines,
            &mut warnings,
        )?;

        Ok(DerivationOutcome { documents: vec![document], warnings })
    }

    fn collect_from_delivery(
        &self,
        delivery_id: DeliveryId,
        request: &DerivationRequest,
        seen: &mut HashSet<OrderLineId>,
        pending: &mut Vec<PendingLine>,
        currency: &mut Option<String>,
        customer: &mut Option<CustomerId>,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<()> {
        let delivery = self.sources.delivery(delivery_id)?.ok_or_else(|| {
            DomainError::missing_reference(format!("delivery {delivery_id} not found"))
        })?;
        let order_id = delivery.order_id.ok_or_else(|| {
            DomainError::missing_reference(format!("delivery {delivery_id} has no linked order"))
        })?;
        let order = self.sources.sales_order(order_id)?.ok_or_else(|| {
            DomainError::missing_reference(format!(
                "order {order_id} linked by delivery {delivery_id} not found"
            ))
        })?;
        let order_lines = self.sources.order_lines(order_id)?;
        let (quote, quote_lines) = self.load_quotation(order.quotation_id)?;

        let (purchase_order, po_lines) = match delivery.purchase_order_id {
            Some(id) => match self.sources.purchase_order(id)? {
                Some(po) => (Some(po), self.sources.purchase_order_lines(id)?),
                None => (None, Vec::new()),
            },
            None => (None, Vec::new()),
        };

        currency.get_or_insert_with(|| order.currency.clone());
        if customer.is_none() {
            *customer = order.customer_id;
        }

        let delivery_lines = self.sources.delivery_lines(delivery_id)?;
        if delivery_lines.is_empty() {
            // No lower-level lines yet: synthesize virtual lines from the
            // parent order.
            tracing::debug!(%delivery_id, %order_id, "delivery has no lines; using order lines");
            return self.collect_order_lines(
                &order,
                &order_lines,
                quote.as_ref(),
                &quote_lines,
                request,
                seen,
                pending,
                warnings,
            );
        }

        for (position, dline) in delivery_lines.iter().enumerate() {
            if !is_selected(request, *dline.id.as_uuid()) {
                continue;
            }

            let order_line =
                dline.order_line_id.and_then(|id| order_lines.iter().find(|l| l.id == id));
            if let Some(ol) = order_line {
                if !seen.insert(ol.id) {
                    // Another source already carried this order line;
                    // the aggregate quantity covered it.
                    continue;
                }
            }

            let quantity = match order_line {
                Some(ol) => {
                    let events = self.sources.fulfillment_events(ol.id)?;
                    if events.is_empty() {
                        dline.moved_quantity()
                    } else {
                        let recon = reconcile(ol.id, ol.quantity, &events);
                        if recon.is_clamped() {
                            warnings.push(DataQualityWarning::OverFulfillment {
                                order_line_id: ol.id,
                                ordered: recon.ordered,
                                delivered: recon.delivered,
                                invoiced: recon.invoiced,
                            });
                        }
                        recon.invoiceable()
                    }
                }
                None => dline.moved_quantity(),
            };
            if quantity <= Decimal::ZERO {
                warnings.push(DataQualityWarning::LineSkipped {
                    reference: dline.id.to_string(),
                    reason: "no invoiceable quantity".to_string(),
                });
                continue;
            }

            let description = dline
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .or_else(|| order_line.map(|l| l.description.clone()))
                .unwrap_or_default();
            let item_id = dline.item_id.or_else(|| order_line.and_then(|l| l.item_id));
            let line_number = order_line.and_then(|l| l.line_number);

            let quote_match =
                match_upstream_line(item_id, &description, line_number, position, &quote_lines);
            if let Some(m) = &quote_match {
                if m.strategy.is_low_confidence() {
                    warnings.push(DataQualityWarning::LowConfidenceMatch {
                        reference: dline.id.to_string(),
                        strategy: m.strategy,
                    });
                }
            }
            let po_match =
                match_upstream_line(item_id, &description, line_number, position, &po_lines);

            let mut unit_price = dline.unit_price.filter(|p| *p > Decimal::ZERO);
            if unit_price.is_none() {
                unit_price = order_line.map(|l| l.unit_price).filter(|p| *p > Decimal::ZERO);
            }
            if unit_price.is_none() {
                unit_price = quote_match
                    .as_ref()
                    .map(|m| m.line.unit_price)
                    .filter(|p| *p > Decimal::ZERO);
            }
            if unit_price.is_none() {
                unit_price =
                    po_match.as_ref().map(|m| m.line.unit_price).filter(|p| *p > Decimal::ZERO);
            }
            let Some(unit_price) = unit_price else {
                warnings.push(DataQualityWarning::LineSkipped {
                    reference: dline.id.to_string(),
                    reason: "no unit price resolvable".to_string(),
                });
                continue;
            };

            let mut candidates = Vec::new();
            if let Some(m) = &po_match {
                candidates.push(AncestorPricing::new(
                    PricingSource::PurchaseOrderLine,
                    m.line.pricing,
                ));
            }
            if let Some(m) = &quote_match {
                candidates.push(AncestorPricing::new(PricingSource::QuoteLine, m.line.pricing));
            }
            if let Some(ol) = order_line {
                candidates.push(AncestorPricing::new(PricingSource::OrderLine, ol.pricing));
            }
            if let Some(po) = &purchase_order {
                candidates.push(AncestorPricing::new(PricingSource::DocumentHeader, po.pricing));
            }
            if let Some(q) = &quote {
                candidates.push(AncestorPricing::new(PricingSource::DocumentHeader, q.pricing));
            }
            candidates.push(AncestorPricing::new(PricingSource::DocumentHeader, order.pricing));
            candidates.push(AncestorPricing::new(PricingSource::DeliveryLine, dline.pricing));

            pending.push(PendingLine {
                item_id,
                order_line_id: order_line.map(|l| l.id),
                quote_line_id: quote_match.map(|m| m.line.id),
                description,
                quantity,
                unit_price: round_unit_cost(unit_price),
                candidates,
            });
        }

        Ok(())
    }

    fn collect_from_order(
        &self,
        order_id: OrderId,
        request: &DerivationRequest,
        seen: &mut HashSet<OrderLineId>,
        pending: &mut Vec<PendingLine>,
        currency: &mut Option<String>,
        customer: &mut Option<CustomerId>,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<()> {
        let order = self.sources.sales_order(order_id)?.ok_or_else(|| {
            DomainError::missing_reference(format!("order {order_id} not found"))
        })?;
        let order_lines = self.sources.order_lines(order_id)?;
        let (quote, quote_lines) = self.load_quotation(order.quotation_id)?;

        currency.get_or_insert_with(|| order.currency.clone());
        if customer.is_none() {
            *customer = order.customer_id;
        }

        self.collect_order_lines(
            &order,
            &order_lines,
            quote.as_ref(),
            &quote_lines,
            request,
            seen,
            pending,
            warnings,
        )
    }

    fn collect_order_lines(
        &self,
        order: &SalesOrder,
        order_lines: &[OrderLine],
        quote: Option<&Quotation>,
        quote_lines: &[QuoteLine],
        request: &DerivationRequest,
        seen: &mut HashSet<OrderLineId>,
        pending: &mut Vec<PendingLine>,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<()> {
        for (position, line) in order_lines.iter().enumerate() {
            if !is_selected(request, *line.id.as_uuid()) {
                continue;
            }
            if !seen.insert(line.id) {
                continue;
            }
            if let Err(err) = line.validate() {
                warnings.push(DataQualityWarning::LineSkipped {
                    reference: line.id.to_string(),
                    reason: err.to_string(),
                });
                continue;
            }

            let events = self.sources.fulfillment_events(line.id)?;
            let recon = reconcile(line.id, line.quantity, &events);
            if recon.is_clamped() {
                warnings.push(DataQualityWarning::OverFulfillment {
                    order_line_id: line.id,
                    ordered: recon.ordered,
                    delivered: recon.delivered,
                    invoiced: recon.invoiced,
                });
            }
            let quantity = recon.invoiceable();
            if quantity <= Decimal::ZERO {
                warnings.push(DataQualityWarning::LineSkipped {
                    reference: line.id.to_string(),
                    reason: "no invoiceable quantity remaining".to_string(),
                });
                continue;
            }

            let quote_match = match_upstream_line(
                line.item_id,
                &line.description,
                line.line_number,
                position,
                quote_lines,
            );
            if let Some(m) = &quote_match {
                if m.strategy.is_low_confidence() {
                    warnings.push(DataQualityWarning::LowConfidenceMatch {
                        reference: line.id.to_string(),
                        strategy: m.strategy,
                    });
                }
            }

            let mut unit_price = Some(line.unit_price).filter(|p| *p > Decimal::ZERO);
            if unit_price.is_none() {
                unit_price = quote_match
                    .as_ref()
                    .map(|m| m.line.unit_price)
                    .filter(|p| *p > Decimal::ZERO);
            }
            let Some(unit_price) = unit_price else {
                warnings.push(DataQualityWarning::LineSkipped {
                    reference: line.id.to_string(),
                    reason: "no unit price resolvable".to_string(),
                });
                continue;
            };

            let mut candidates = Vec::new();
            if let Some(m) = &quote_match {
                candidates.push(AncestorPricing::new(PricingSource::QuoteLine, m.line.pricing));
            }
            candidates.push(AncestorPricing::new(PricingSource::OrderLine, line.pricing));
            if let Some(q) = quote {
                candidates.push(AncestorPricing::new(PricingSource::DocumentHeader, q.pricing));
            }
            candidates.push(AncestorPricing::new(PricingSource::DocumentHeader, order.pricing));

            pending.push(PendingLine {
                item_id: line.item_id,
                order_line_id: Some(line.id),
                quote_line_id: quote_match.map(|m| m.line.id),
                description: line.description.clone(),
                quantity,
                unit_price: round_unit_cost(unit_price),
                candidates,
            });
        }

        Ok(())
    }

    fn derive_purchase_orders(
        &self,
        request: &DerivationRequest,
    ) -> DomainResult<DerivationOutcome> {
        let mut warnings = Vec::new();

        let mut quotes: Vec<(Quotation, Vec<QuoteLine>)> = Vec::new();
        for source in &request.sources {
            match source.kind {
                DocumentKind::Quotation => {
                    let id = QuoteId::from_uuid(source.id);
                    let quote = self.sources.quotation(id)?.ok_or_else(|| {
                        DomainError::missing_reference(format!("quotation {id} not found"))
                    })?;
                    let lines = self.sources.quote_lines(id)?;
                    quotes.push((quote, lines));
                }
                other => {
                    return Err(DomainError::validation(format!(
                        "cannot derive a purchase order from a {} source",
                        other.as_str()
                    )));
                }
            }
        }

        // Partition contributing quotes by supplier (first-seen order)
        // before creating one document per group.
        let mut groups: Vec<(Option<SupplierId>, Vec<usize>)> = Vec::new();
        match request.group_by {
            Some(GroupBy::Supplier) => {
                for (idx, (quote, _)) in quotes.iter().enumerate() {
                    let supplier = quote.supplier_id.ok_or_else(|| {
                        DomainError::missing_reference(format!(
                            "quotation {} has no supplier for supplier grouping",
                            quote.id
                        ))
                    })?;
                    match groups.iter_mut().find(|(s, _)| *s == Some(supplier)) {
                        Some((_, members)) => members.push(idx),
                        None => groups.push((Some(supplier), vec![idx])),
                    }
                }
            }
            None => {
                let suppliers: HashSet<SupplierId> =
                    quotes.iter().filter_map(|(q, _)| q.supplier_id).collect();
                if suppliers.len() > 1 {
                    return Err(DomainError::validation(
                        "source quotations span multiple suppliers; request supplier grouping",
                    ));
                }
                groups.push((
                    quotes.first().and_then(|(q, _)| q.supplier_id),
                    (0..quotes.len()).collect(),
                ));
            }
        }

        let mut documents = Vec::new();
        for (supplier, members) in groups {
            let mut pending = Vec::new();
            for &idx in &members {
                let (quote, lines) = &quotes[idx];
                for line in lines {
                    if !is_selected(request, *line.id.as_uuid()) {
                        continue;
                    }
                    if line.quantity <= Decimal::ZERO {
                        warnings.push(DataQualityWarning::LineSkipped {
                            reference: line.id.to_string(),
                            reason: "no orderable quantity".to_string(),
                        });
                        continue;
                    }
                    if line.unit_price <= Decimal::ZERO {
                        warnings.push(DataQualityWarning::LineSkipped {
                            reference: line.id.to_string(),
                            reason: "no unit price resolvable".to_string(),
                        });
                        continue;
                    }
                    // Quotes carry no fulfillment history, so the quoted
                    // quantity is carried over as ordered.
                    pending.push(PendingLine {
                        item_id: line.item_id,
                        order_line_id: None,
                        quote_line_id: Some(line.id),
                        description: line.description.clone(),
                        quantity: line.quantity,
                        unit_price: round_unit_cost(line.unit_price),
                        candidates: vec![
                            AncestorPricing::new(PricingSource::QuoteLine, line.pricing),
                            AncestorPricing::new(PricingSource::DocumentHeader, quote.pricing),
                        ],
                    });
                }
            }

            let lines = self.assemble_lines(pending, &mut warnings)?;
            if lines.is_empty() {
                continue;
            }

            let currency = request
                .currency
                .clone()
                .unwrap_or_else(|| quotes[members[0]].0.currency.clone());
            let source_refs =
                members.iter().map(|&idx| DocumentRef::quotation(quotes[idx].0.id)).collect();

            let document = self.finalize(
                request,
                DerivedDocumentType::PurchaseOrder,
                currency,
                supplier,
                None,
                source_refs,
                lines,
                &mut warnings,
            )?;
            documents.push(document);
        }

        if documents.is_empty() {
            return Err(DomainError::validation(
                "no processable lines in purchase order derivation",
            ));
        }

        Ok(DerivationOutcome { documents, warnings })
    }

    fn assemble_lines(
        &self,
        pending: Vec<PendingLine>,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<Vec<DerivedLine>> {
        let mut lines = Vec::with_capacity(pending.len());
        for entry in pending {
            let item = self.resolve_item(entry.item_id, &entry.description, warnings)?;
            let description = if entry.description.trim().is_empty() {
                item.as_ref().map(|i| i.description.clone()).unwrap_or_default()
            } else {
                entry.description.clone()
            };

            let pricing = resolve(&entry.candidates);
            let amounts = compute_resolved(entry.quantity, entry.unit_price, &pricing);

            lines.push(DerivedLine {
                line_no: lines.len() as u32 + 1,
                item_id: item.map(|i| i.id).or(entry.item_id),
                order_line_id: entry.order_line_id,
                quote_line_id: entry.quote_line_id,
                description,
                quantity: entry.quantity,
                unit_price: entry.unit_price,
                pricing,
                amounts,
            });
        }
        Ok(lines)
    }

    /// Look up the referenced item, synthesizing a minimal placeholder
    /// when the reference is missing or dangling so the line survives.
    fn resolve_item(
        &self,
        item_id: Option<ItemId>,
        description: &str,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<Option<Item>> {
        if let Some(id) = item_id {
            if let Some(item) = self.items.find(id)? {
                return Ok(Some(item));
            }
        } else if description.trim().is_empty() {
            return Ok(None);
        }

        let item = self.items.create_placeholder(description)?;
        tracing::warn!(description, item_id = %item.id, "item reference missing or unresolvable; placeholder synthesized");
        warnings.push(DataQualityWarning::PlaceholderItem { description: description.to_string() });
        Ok(Some(item))
    }

    fn load_quotation(
        &self,
        id: Option<QuoteId>,
    ) -> DomainResult<(Option<Quotation>, Vec<QuoteLine>)> {
        match id {
            Some(id) => match self.sources.quotation(id)? {
                Some(quote) => {
                    let lines = self.sources.quote_lines(id)?;
                    Ok((Some(quote), lines))
                }
                // A dangling quotation reference degrades; pricing falls
                // through to the remaining tiers.
                None => Ok((None, Vec::new())),
            },
            None => Ok((None, Vec::new())),
        }
    }

    fn finalize(
        &self,
        request: &DerivationRequest,
        doc_type: DerivedDocumentType,
        currency: String,
        supplier_id: Option<SupplierId>,
        customer_id: Option<CustomerId>,
        source_refs: Vec<DocumentRef>,
        lines: Vec<DerivedLine>,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<DerivedDocument> {
        let folded = DocumentTotals::fold(&lines);
        if folded.recovered {
            tracing::warn!(
                grand_total = %folded.totals.grand_total,
                "line amounts inconsistent; grand total recomputed from line totals"
            );
            warnings.push(DataQualityWarning::TotalsRecovered {
                grand_total: folded.totals.grand_total,
            });
        }
        if !folded.totals.subtotal.is_positive() {
            return Err(DomainError::validation("derived document subtotal is zero or negative"));
        }

        let number = self.numbers.generate(doc_type.number_prefix())?;
        tracing::info!(
            number = number.as_str(),
            doc_type = doc_type.as_str(),
            lines = lines.len(),
            grand_total = %folded.totals.grand_total,
            "derived document assembled"
        );

        let document = DerivedDocument {
            number,
            doc_type,
            status: DerivedStatus::Draft,
            currency,
            supplier_id,
            customer_id,
            created_by: request.created_by,
            source_refs,
            totals: folded.totals,
            issued_at: Utc::now(),
            lines,
        };

        self.persist_with_retry(document, warnings)
    }

    /// Two-phase persist: a primary attempt, and on an audit-reference
    /// rejection a single fallback attempt with the created-by cleared.
    fn persist_with_retry(
        &self,
        document: DerivedDocument,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> DomainResult<DerivedDocument> {
        match self.store.persist(&document) {
            Ok(()) => Ok(document),
            Err(PersistFailure::AuditReference(msg)) => {
                tracing::warn!(%msg, "audit reference rejected; retrying with created_by cleared");
                let dropped = document.created_by;
                let mut retry = document;
                retry.created_by = None;
                match self.store.persist(&retry) {
                    Ok(()) => {
                        if let Some(user_id) = dropped {
                            warnings.push(DataQualityWarning::AuditReferenceDropped { user_id });
                        }
                        Ok(retry)
                    }
                    Err(failure) => Err(classify_persist_failure(failure)),
                }
            }
            Err(failure) => Err(classify_persist_failure(failure)),
        }
    }
}

fn classify_persist_failure(failure: PersistFailure) -> DomainError {
    match failure {
        PersistFailure::AuditReference(msg)
        | PersistFailure::UniqueNumber(msg)
        | PersistFailure::Io(msg) => DomainError::transient(msg),
        PersistFailure::MandatoryReference(msg) => DomainError::fatal(msg),
    }
}

fn is_selected(request: &DerivationRequest, id: Uuid) -> bool {
    match &request.selected_line_ids {
        Some(selected) => selected.contains(&id),
        None => true,
    }
}
