use uuid::Uuid;

/// A priced entry of a restaurant's menu, as read by the order flow.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MenuItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    /// price in the currency's minor unit
    pub price: i64,
    pub category: String,
    pub is_available: bool,
}
