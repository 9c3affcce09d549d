use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{OrderId, normalize_phone_to_e164};

/// Delivery state of an order as reported by the backend.
///
/// The wire values are lowercase strings; anything this build does not know
/// about decodes to [`OrderStatus::Unknown`] so a newer backend cannot break
/// rendering.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Delivering,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Human-readable label for the status column.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

/// Name and phone of a party attached to an order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub phone_contact: String,
}

impl Contact {
    /// Phone in E.164 when it parses, the raw backend string otherwise.
    pub fn display_phone(&self) -> String {
        normalize_phone_to_e164(&self.phone_contact)
            .unwrap_or_else(|_| self.phone_contact.clone())
    }
}

/// One row of the orders table.
///
/// Every field is rendered but never mutated by the dashboard. `id` can be
/// absent on the wire; such rows render but cannot be selected or opened.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub owner: Option<Contact>,
    #[serde(default)]
    pub driver: Option<Contact>,
    #[serde(default)]
    pub shipping_address: String,
    pub current_order_status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
