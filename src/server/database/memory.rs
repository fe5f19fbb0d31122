//! In-memory stores for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use anyhow::bail;
use async_trait::async_trait;
use uuid::Uuid;
use crate::server::database::store::{MenuCatalog, OrderStore};
use crate::server::model::menu_item::MenuItem;
use crate::server::model::order::{NewOrder, Order};

#[derive(Default)]
pub(crate) struct MemoryStore {
    menu: Mutex<Vec<MenuItem>>,
    orders: Mutex<HashMap<Uuid, Order>>,
    /// simulate the backend being down
    unavailable: AtomicBool,
    menu_queries: AtomicUsize,
}

impl MemoryStore {
    pub fn with_menu(items: Vec<MenuItem>) -> Self {
        Self {
            menu: Mutex::new(items),
            ..Default::default()
        }
    }

    /// change the price of a menu item in place
    pub fn reprice(&self, id: Uuid, price: i64) {
        for item in self.menu.lock().unwrap().iter_mut().filter(|i| i.id == id) {
            item.price = price;
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn menu_queries(&self) -> usize {
        self.menu_queries.load(Ordering::SeqCst)
    }

    fn check_up(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl MenuCatalog for MemoryStore {
    async fn find_available(&self, restaurant_id: Uuid, ids: &[Uuid]) -> anyhow::Result<Vec<MenuItem>> {
        self.check_up()?;
        self.menu_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .menu
            .lock()
            .unwrap()
            .iter()
            .filter(|item| ids.contains(&item.id) && item.restaurant_id == restaurant_id && item.is_available)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: NewOrder) -> anyhow::Result<Order> {
        self.check_up()?;
        let order = order.into_order(Uuid::new_v4());
        self.orders.lock().unwrap().insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        self.check_up()?;
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }
}
