//! Optional discount/VAT attributes carried by lines and headers.

use serde::{Deserialize, Serialize};

use reconerp_core::{Money, Percent};

/// The discount/VAT attribute quad every pricing ancestor may carry.
///
/// Any of the four may be absent; an upstream record that carries none of
/// them simply contributes nothing to resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingFields {
    pub discount_percent: Option<Percent>,
    pub discount_amount: Option<Money>,
    pub vat_percent: Option<Percent>,
    pub vat_amount: Option<Money>,
}

impl PricingFields {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.discount_percent.is_none()
            && self.discount_amount.is_none()
            && self.vat_percent.is_none()
            && self.vat_amount.is_none()
    }
}
