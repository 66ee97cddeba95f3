//! Domain records shared across the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use record_store_interface::Keyed;

/// A menu dish.
///
/// `id` is assigned by the server on create and never changes. `price`
/// is a non-negative integer at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

impl Keyed for Dish {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A customer order. `dishes` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<LineItem>,
}

impl Keyed for Order {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A dish reference plus requested quantity within an order.
///
/// The dish id is carried as submitted; it is not checked against the
/// dish store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub dish_id: Option<String>,
    pub quantity: i64,
}

/// Order lifecycle stage.
///
/// Updates may move an order between any of the non-terminal stages,
/// forward or backward. `Delivered` is terminal: once reached, the
/// order rejects further updates. Deletion is only allowed while
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "out-for-delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            _ => Err(()),
        }
    }
}
