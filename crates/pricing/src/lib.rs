//! `reconerp-pricing` — pricing attribute resolution and line computation.
//!
//! Three pieces, used in sequence per derived line:
//!
//! 1. [`matching`] pairs a target line with its closest upstream line when
//!    no foreign key exists (degrading match chain).
//! 2. [`resolver`] merges the discount/VAT attributes of the assembled
//!    ancestors, first non-empty value winning independently per field.
//! 3. [`compute`] turns quantity, unit price, and resolved attributes into
//!    gross/discount/net/VAT/total amounts.

pub mod compute;
pub mod matching;
pub mod resolver;

pub use compute::{ComputedLine, compute, compute_resolved};
pub use matching::{LineMatch, MatchStrategy, MatchableLine, match_upstream_line};
pub use resolver::{AncestorPricing, PricingSource, Resolved, ResolvedPricing, resolve};
