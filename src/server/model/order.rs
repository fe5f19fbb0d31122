use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use crate::server::service::error::OrderError;
use crate::server::util::id::parse_id;

pub(crate) const INVALID_RESTAURANT_ID_MSG: &str = "Invalid restaurant ID";
pub(crate) const EMPTY_ORDER_MSG: &str = "Order must contain at least one item";
pub(crate) const INVALID_MENU_ITEM_ID_MSG: &str = "Invalid menu item ID(s)";
pub(crate) const INVALID_QUANTITY_MSG: &str = "Quantity must be a positive integer";

/// Body of `POST /orders`
///
/// Ids and the item list are kept loose so that absent, null or mistyped values reach
/// [`CreateOrderRequest::validate`] instead of failing body extraction.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateOrderRequest {
    #[serde(default)]
    pub restaurant_id: Option<Value>,
    pub customer_name: String,
    pub order_type: String,
    #[serde(default)]
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderItemRequest {
    #[serde(default)]
    pub menu_item_id: Option<Value>,
    pub quantity: i32,
}

/// only a JSON string can hold an id
fn id_of(value: &Option<Value>) -> Option<Uuid> {
    value.as_ref().and_then(Value::as_str).and_then(parse_id)
}

/// A create request whose identifiers and quantities have been checked.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderDraft {
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub order_type: String,
    pub items: Vec<DraftLine>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DraftLine {
    pub menu_item_id: Uuid,
    pub quantity: i32,
}

impl CreateOrderRequest {
    /// Check the request shape before any store access.
    ///
    /// Checks run in a fixed order so the first failing rule decides the message:
    /// restaurant id, non-empty items, menu item ids (all-or-nothing), then quantities.
    pub fn validate(self) -> Result<OrderDraft, OrderError> {
        let restaurant_id = id_of(&self.restaurant_id)
            .ok_or_else(|| OrderError::invalid(INVALID_RESTAURANT_ID_MSG))?;

        let requested = match self.items {
            Some(items) if !items.is_empty() => items,
            _ => return Err(OrderError::invalid(EMPTY_ORDER_MSG)),
        };

        let items = requested
            .iter()
            .map(|item| {
                id_of(&item.menu_item_id).map(|menu_item_id| DraftLine {
                    menu_item_id,
                    quantity: item.quantity,
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| OrderError::invalid(INVALID_MENU_ITEM_ID_MSG))?;

        if items.iter().any(|line| line.quantity < 1) {
            return Err(OrderError::invalid(INVALID_QUANTITY_MSG));
        }

        Ok(OrderDraft {
            restaurant_id,
            customer_name: self.customer_name,
            order_type: self.order_type,
            items,
        })
    }
}

/// One priced entry of an order; name and price are copied from the menu at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OrderLine {
    pub menu_item_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

/// An order ready to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrder {
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub order_type: String,
    pub items: Vec<OrderLine>,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn into_order(self, id: Uuid) -> Order {
        Order {
            id,
            restaurant_id: self.restaurant_id,
            customer_name: self.customer_name,
            order_type: self.order_type,
            created_at: self.created_at,
            items: self.items,
            total_price: self.total_price,
        }
    }
}

/// A persisted order, also the response body of both order endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub order_type: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
    pub total_price: i64,
}
