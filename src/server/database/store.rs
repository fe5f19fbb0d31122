use async_trait::async_trait;
use uuid::Uuid;
use crate::server::model::menu_item::MenuItem;
use crate::server::model::order::{NewOrder, Order};

/// Read side of the menu catalog used by the order flow.
#[async_trait]
pub(crate) trait MenuCatalog: Send + Sync {
    /// Load the items whose id is in `ids`, that belong to `restaurant_id` and are available.
    async fn find_available(&self, restaurant_id: Uuid, ids: &[Uuid]) -> anyhow::Result<Vec<MenuItem>>;
}

#[async_trait]
pub(crate) trait OrderStore: Send + Sync {
    /// Write a new order and return it with its generated id.
    async fn insert(&self, order: NewOrder) -> anyhow::Result<Order>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>>;
}
