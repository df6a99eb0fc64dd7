use serde::{Deserialize, Serialize};

use reconerp_core::ItemId;

/// Item master record, used as a description/code fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub description: String,
    pub barcode: Option<String>,
    pub supplier_code: Option<String>,
}
