//! Upstream line matching.
//!
//! Sales-order lines rarely carry a foreign key to the quotation line
//! they originated from, so pairing is done through a degrading chain of
//! heuristics. The chain deliberately never gives up while candidates
//! exist: producing *some* pricing beats failing the whole derivation.
//! The strategy that produced a match is returned so low-confidence
//! pairings can be surfaced as data-quality warnings.

use serde::{Deserialize, Serialize};

use reconerp_core::ItemId;
use reconerp_documents::{PurchaseOrderLine, QuoteLine};

/// The heuristic that produced a match, ordered most to least reliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    ItemId,
    DescriptionExact,
    DescriptionContains,
    LineNumber,
    Position,
    FirstAvailable,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::ItemId => "item_id",
            MatchStrategy::DescriptionExact => "description_exact",
            MatchStrategy::DescriptionContains => "description_contains",
            MatchStrategy::LineNumber => "line_number",
            MatchStrategy::Position => "position",
            MatchStrategy::FirstAvailable => "first_available",
        }
    }

    /// Positional and first-available pairings carry no semantic signal.
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, MatchStrategy::Position | MatchStrategy::FirstAvailable)
    }
}

/// An upstream line that can be matched against a target line.
pub trait MatchableLine {
    fn item_id(&self) -> Option<ItemId>;
    fn description(&self) -> &str;
    fn line_number(&self) -> Option<u32>;
}

impl MatchableLine for QuoteLine {
    fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn line_number(&self) -> Option<u32> {
        self.line_number
    }
}

impl MatchableLine for PurchaseOrderLine {
    fn item_id(&self) -> Option<ItemId> {
        self.item_id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn line_number(&self) -> Option<u32> {
        self.line_number
    }
}

/// A matched upstream line and the strategy that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a, L> {
    pub line: &'a L,
    pub strategy: MatchStrategy,
}

/// Trim, lowercase, and collapse internal whitespace.
pub fn normalize_description(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Match a target line against upstream candidates.
///
/// `position` is the zero-based index of the target line within its own
/// document, used for the positional fallback.
pub fn match_upstream_line<'a, L: MatchableLine>(
    item_id: Option<ItemId>,
    description: &str,
    line_number: Option<u32>,
    position: usize,
    candidates: &'a [L],
) -> Option<LineMatch<'a, L>> {
    if candidates.is_empty() {
        return None;
    }

    if let Some(target_item) = item_id {
        if let Some(line) = candidates.iter().find(|c| c.item_id() == Some(target_item)) {
            return found(line, MatchStrategy::ItemId);
        }
    }

    let normalized = normalize_description(description);
    if !normalized.is_empty() {
        if let Some(line) = candidates
            .iter()
            .find(|c| normalize_description(c.description()) == normalized)
        {
            return found(line, MatchStrategy::DescriptionExact);
        }

        if let Some(line) = candidates.iter().find(|c| {
            let candidate = normalize_description(c.description());
            !candidate.is_empty()
                && (candidate.contains(&normalized) || normalized.contains(&candidate))
        }) {
            return found(line, MatchStrategy::DescriptionContains);
        }
    }

    if let Some(target_no) = line_number {
        if let Some(line) = candidates.iter().find(|c| c.line_number() == Some(target_no)) {
            return found(line, MatchStrategy::LineNumber);
        }
    }

    if let Some(line) = candidates.get(position) {
        return found(line, MatchStrategy::Position);
    }

    found(&candidates[0], MatchStrategy::FirstAvailable)
}

fn found<L: MatchableLine>(line: &L, strategy: MatchStrategy) -> Option<LineMatch<'_, L>> {
    tracing::debug!(strategy = strategy.as_str(), "upstream line matched");
    Some(LineMatch { line, strategy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconerp_core::{QuoteId, QuoteLineId};
    use reconerp_documents::PricingFields;
    use rust_decimal_macros::dec;

    fn quote_line(
        item_id: Option<ItemId>,
        description: &str,
        line_number: Option<u32>,
    ) -> QuoteLine {
        QuoteLine {
            id: QuoteLineId::new(),
            quote_id: QuoteId::new(),
            item_id,
            description: description.to_string(),
            line_number,
            quantity: dec!(1),
            unit_price: dec!(10.00),
            pricing: PricingFields::none(),
        }
    }

    #[test]
    fn item_id_match_beats_description() {
        let item = ItemId::new();
        let candidates = vec![
            quote_line(None, "Steel bolt M8", Some(1)),
            quote_line(Some(item), "Completely different", Some(2)),
        ];

        let m = match_upstream_line(Some(item), "Steel bolt M8", Some(1), 0, &candidates)
            .expect("match");
        assert_eq!(m.strategy, MatchStrategy::ItemId);
        assert_eq!(m.line.id, candidates[1].id);
    }

    #[test]
    fn description_match_is_case_and_whitespace_insensitive() {
        let candidates = vec![quote_line(None, "  Steel   Bolt M8 ", None)];

        let m = match_upstream_line(None, "steel bolt m8", None, 5, &candidates).expect("match");
        assert_eq!(m.strategy, MatchStrategy::DescriptionExact);
    }

    #[test]
    fn substring_match_degrades_from_exact() {
        let candidates = vec![quote_line(None, "Steel bolt M8 zinc plated", None)];

        let m = match_upstream_line(None, "steel bolt m8", None, 5, &candidates).expect("match");
        assert_eq!(m.strategy, MatchStrategy::DescriptionContains);
    }

    #[test]
    fn line_number_then_position_then_first() {
        let candidates = vec![
            quote_line(None, "Alpha", Some(1)),
            quote_line(None, "Beta", Some(2)),
        ];

        let by_number =
            match_upstream_line(None, "Gamma", Some(2), 0, &candidates).expect("match");
        assert_eq!(by_number.strategy, MatchStrategy::LineNumber);
        assert_eq!(by_number.line.id, candidates[1].id);

        let by_position =
            match_upstream_line(None, "Gamma", Some(9), 1, &candidates).expect("match");
        assert_eq!(by_position.strategy, MatchStrategy::Position);
        assert_eq!(by_position.line.id, candidates[1].id);

        let first = match_upstream_line(None, "Gamma", Some(9), 7, &candidates).expect("match");
        assert_eq!(first.strategy, MatchStrategy::FirstAvailable);
        assert_eq!(first.line.id, candidates[0].id);
        assert!(first.strategy.is_low_confidence());
    }

    #[test]
    fn no_candidates_means_no_match() {
        let candidates: Vec<QuoteLine> = Vec::new();
        assert!(match_upstream_line(None, "anything", None, 0, &candidates).is_none());
    }
}
