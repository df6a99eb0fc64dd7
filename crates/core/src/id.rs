//! Strongly-typed identifiers used across the engine.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $t:ident) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in
            /// tests for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s).map_err(|e| {
                    DomainError::invalid_id(format!("{}: {}", stringify!($t), e))
                })?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a sales order.
    OrderId
);
uuid_id!(
    /// Identifier of a sales order line.
    OrderLineId
);
uuid_id!(
    /// Identifier of a quotation (sales quote or supplier quote).
    QuoteId
);
uuid_id!(
    /// Identifier of a quotation line.
    QuoteLineId
);
uuid_id!(
    /// Identifier of a delivery note.
    DeliveryId
);
uuid_id!(
    /// Identifier of a delivery line.
    DeliveryLineId
);
uuid_id!(
    /// Identifier of an invoice.
    InvoiceId
);
uuid_id!(
    /// Identifier of an invoice line.
    InvoiceLineId
);
uuid_id!(
    /// Identifier of a purchase order (LPO).
    PurchaseOrderId
);
uuid_id!(
    /// Identifier of a purchase order line.
    PurchaseOrderLineId
);
uuid_id!(
    /// Identifier of an item master record.
    ItemId
);
uuid_id!(
    /// Identifier of a supplier.
    SupplierId
);
uuid_id!(
    /// Identifier of a customer.
    CustomerId
);
uuid_id!(
    /// Identifier of a user (audit trail actor).
    UserId
);
