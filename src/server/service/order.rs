use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use log::{debug, error, info};
use uuid::Uuid;
use crate::server::database::store::{MenuCatalog, OrderStore};
use crate::server::model::menu_item::MenuItem;
use crate::server::model::order::{CreateOrderRequest, DraftLine, NewOrder, Order, OrderLine};
use crate::server::service::error::OrderError;
use crate::server::util::id::parse_id;
use crate::server::util::time;

pub(crate) const UNAVAILABLE_ITEMS_MSG: &str = "One or more menu items do not exist or are not available";
pub(crate) const TOTAL_OUT_OF_RANGE_MSG: &str = "Order total is out of range";
pub(crate) const INVALID_ORDER_ID_MSG: &str = "Invalid order ID";
pub(crate) const ORDER_NOT_FOUND_MSG: &str = "Order not found";

/// Prices, persists and loads orders.
#[derive(Clone)]
pub(crate) struct OrderService {
    menu: Arc<dyn MenuCatalog>,
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(menu: Arc<dyn MenuCatalog>, orders: Arc<dyn OrderStore>) -> Self {
        Self { menu, orders }
    }

    /// Validate a create request, price it against the live menu and write it.
    ///
    /// Existence is checked against the distinct menu item ids, while every request line is
    /// priced on its own, so a repeated id yields repeated lines.
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        let draft = request.validate()?;

        let requested: HashSet<Uuid> = draft.items.iter().map(|line| line.menu_item_id).collect();
        let ids: Vec<Uuid> = requested.iter().copied().collect();

        let menu_items = self
            .menu
            .find_available(draft.restaurant_id, &ids)
            .await
            .map_err(|e| {
                error!("create_order failed to load menu items, {:#}", e);
                OrderError::Internal(e)
            })?;

        if menu_items.len() != requested.len() {
            return Err(OrderError::invalid(UNAVAILABLE_ITEMS_MSG));
        }

        let by_id: HashMap<Uuid, MenuItem> = menu_items.into_iter().map(|item| (item.id, item)).collect();
        let (items, total_price) = price_lines(&draft.items, &by_id)?;

        let order = self
            .orders
            .insert(NewOrder {
                restaurant_id: draft.restaurant_id,
                customer_name: draft.customer_name,
                order_type: draft.order_type,
                items,
                total_price,
                created_at: time::helper::get_utc_now(),
            })
            .await
            .map_err(|e| {
                error!("create_order failed to write order, {:#}", e);
                OrderError::Internal(e)
            })?;

        info!("order={} created for restaurant={}, total_price={}", order.id, order.restaurant_id, order.total_price);
        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, OrderError> {
        let id = parse_id(id).ok_or_else(|| OrderError::invalid(INVALID_ORDER_ID_MSG))?;
        match self.orders.find_by_id(id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) => Err(OrderError::not_found(ORDER_NOT_FOUND_MSG)),
            Err(e) => {
                error!("get_order failed, {:#}", e);
                Err(OrderError::Internal(e))
            }
        }
    }
}

/// Produce one line per request line, in request order, and their sum.
fn price_lines(lines: &[DraftLine], menu: &HashMap<Uuid, MenuItem>) -> Result<(Vec<OrderLine>, i64), OrderError> {
    let mut total_price: i64 = 0;
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let menu_item = menu
            .get(&line.menu_item_id)
            .filter(|item| item.is_available)
            .ok_or_else(|| OrderError::invalid(UNAVAILABLE_ITEMS_MSG))?;
        let total = menu_item
            .price
            .checked_mul(i64::from(line.quantity))
            .ok_or_else(|| OrderError::invalid(TOTAL_OUT_OF_RANGE_MSG))?;
        total_price = total_price
            .checked_add(total)
            .ok_or_else(|| OrderError::invalid(TOTAL_OUT_OF_RANGE_MSG))?;
        debug!("priced {} [{}] x{} = {}", menu_item.name, menu_item.category, line.quantity, total);
        items.push(OrderLine {
            menu_item_id: menu_item.id,
            name: menu_item.name.clone(),
            quantity: line.quantity,
            price: menu_item.price,
            total,
        });
    }
    Ok((items, total_price))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use super::*;
    use crate::server::database::memory::MemoryStore;
    use crate::server::model::order::{OrderItemRequest, EMPTY_ORDER_MSG, INVALID_MENU_ITEM_ID_MSG, INVALID_RESTAURANT_ID_MSG};

    struct Fixture {
        store: Arc<MemoryStore>,
        service: OrderService,
        restaurant: Uuid,
        other_restaurant: Uuid,
        /// price 300, available
        pizza: Uuid,
        /// price 60, unavailable
        coke: Uuid,
        /// price 150, other restaurant
        fries: Uuid,
    }

    fn item(restaurant_id: Uuid, name: &str, price: i64, is_available: bool) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            restaurant_id,
            name: name.to_string(),
            price,
            category: "Test".to_string(),
            is_available,
        }
    }

    fn fixture() -> Fixture {
        let (restaurant, other_restaurant) = (Uuid::new_v4(), Uuid::new_v4());
        let pizza = item(restaurant, "Margherita Pizza", 300, true);
        let coke = item(restaurant, "Coke", 60, false);
        let fries = item(other_restaurant, "French Fries", 150, true);
        let (pizza_id, coke_id, fries_id) = (pizza.id, coke.id, fries.id);
        let store = Arc::new(MemoryStore::with_menu(vec![pizza, coke, fries]));
        Fixture {
            service: OrderService::new(store.clone(), store.clone()),
            store,
            restaurant,
            other_restaurant,
            pizza: pizza_id,
            coke: coke_id,
            fries: fries_id,
        }
    }

    fn request(restaurant: Uuid, items: &[(Uuid, i32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            restaurant_id: Some(Value::from(restaurant.to_string())),
            customer_name: "Grace".to_string(),
            order_type: "dine-in".to_string(),
            items: Some(
                items
                    .iter()
                    .map(|(id, quantity)| OrderItemRequest {
                        menu_item_id: Some(Value::from(id.to_string())),
                        quantity: *quantity,
                    })
                    .collect(),
            ),
        }
    }

    fn invalid_msg(result: Result<Order, OrderError>) -> String {
        match result {
            Err(OrderError::InvalidInput(msg)) => msg,
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn prices_available_item() {
        let f = fixture();
        time::helper::set_utc_now(1_700_000_000);
        let order = f.service.create_order(request(f.restaurant, &[(f.pizza, 2)])).await.unwrap();
        assert_eq!(order.total_price, 600);
        assert_eq!(order.items.len(), 1);
        assert_eq!(
            order.items[0],
            OrderLine { menu_item_id: f.pizza, name: "Margherita Pizza".to_string(), quantity: 2, price: 300, total: 600 }
        );
        assert_eq!(order.restaurant_id, f.restaurant);
        assert_eq!(order.customer_name, "Grace");
        assert_eq!(order.order_type, "dine-in");
        assert_eq!(order.created_at.timestamp(), 1_700_000_000);
        assert_eq!(f.store.order_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_lines_are_not_merged() {
        let f = fixture();
        let order = f.service.create_order(request(f.restaurant, &[(f.pizza, 1), (f.pizza, 1)])).await.unwrap();
        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|line| line.quantity == 1 && line.total == 300));
        assert_eq!(order.total_price, 600);
    }

    #[tokio::test]
    async fn total_is_sum_of_lines() {
        let restaurant = Uuid::new_v4();
        let pepperoni = item(restaurant, "Pepperoni Pizza", 400, true);
        let bread = item(restaurant, "Garlic Bread", 150, true);
        let (pepperoni_id, bread_id) = (pepperoni.id, bread.id);
        let store = Arc::new(MemoryStore::with_menu(vec![pepperoni, bread]));
        let service = OrderService::new(store.clone(), store.clone());
        let order = service
            .create_order(request(restaurant, &[(pepperoni_id, 2), (bread_id, 3), (pepperoni_id, 1)]))
            .await
            .unwrap();
        let expected: i64 = order.items.iter().map(|l| l.price * i64::from(l.quantity)).sum();
        assert_eq!(order.total_price, expected);
        assert_eq!(order.total_price, 1650);
        assert_eq!(order.items.iter().map(|l| l.total).collect::<Vec<_>>(), vec![800, 450, 400]);
    }

    #[tokio::test]
    async fn unavailable_item_rejected() {
        let f = fixture();
        let msg = invalid_msg(f.service.create_order(request(f.restaurant, &[(f.coke, 1)])).await);
        assert_eq!(msg, UNAVAILABLE_ITEMS_MSG);
        assert_eq!(f.store.order_count(), 0);
    }

    #[tokio::test]
    async fn item_of_other_restaurant_rejected() {
        let f = fixture();
        let msg = invalid_msg(f.service.create_order(request(f.restaurant, &[(f.pizza, 1), (f.fries, 1)])).await);
        assert_eq!(msg, UNAVAILABLE_ITEMS_MSG);

        let msg = invalid_msg(f.service.create_order(request(f.other_restaurant, &[(f.pizza, 1)])).await);
        assert_eq!(msg, UNAVAILABLE_ITEMS_MSG);
        assert_eq!(f.store.order_count(), 0);
    }

    #[tokio::test]
    async fn unknown_item_rejected() {
        let f = fixture();
        let msg = invalid_msg(f.service.create_order(request(f.restaurant, &[(Uuid::new_v4(), 1)])).await);
        assert_eq!(msg, UNAVAILABLE_ITEMS_MSG);
    }

    #[tokio::test]
    async fn malformed_ids_rejected_before_store_access() {
        let f = fixture();
        let mut bad_restaurant = request(f.restaurant, &[(f.pizza, 1)]);
        bad_restaurant.restaurant_id = Some(Value::from("123"));
        assert_eq!(invalid_msg(f.service.create_order(bad_restaurant).await), INVALID_RESTAURANT_ID_MSG);

        let mut bad_item = request(f.restaurant, &[(f.pizza, 1)]);
        if let Some(items) = bad_item.items.as_mut() {
            items[0].menu_item_id = Some(Value::from("pizza"));
        }
        assert_eq!(invalid_msg(f.service.create_order(bad_item).await), INVALID_MENU_ITEM_ID_MSG);

        assert_eq!(invalid_msg(f.service.create_order(request(f.restaurant, &[])).await), EMPTY_ORDER_MSG);

        assert_eq!(f.store.menu_queries(), 0);
        assert_eq!(f.store.order_count(), 0);
    }

    #[test]
    fn pricing_refuses_unavailable_item() {
        let restaurant = Uuid::new_v4();
        let tea = item(restaurant, "Iced Tea", 80, false);
        let line = DraftLine { menu_item_id: tea.id, quantity: 1 };
        let menu = HashMap::from([(tea.id, tea)]);
        match price_lines(&[line], &menu) {
            Err(OrderError::InvalidInput(msg)) => assert_eq!(msg, UNAVAILABLE_ITEMS_MSG),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn overflowing_total_rejected() {
        let restaurant = Uuid::new_v4();
        let gold = item(restaurant, "Gold Leaf", i64::MAX / 2, true);
        let gold_id = gold.id;
        let store = Arc::new(MemoryStore::with_menu(vec![gold]));
        let service = OrderService::new(store.clone(), store.clone());
        let msg = invalid_msg(service.create_order(request(restaurant, &[(gold_id, 3)])).await);
        assert_eq!(msg, TOTAL_OUT_OF_RANGE_MSG);
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn line_price_is_frozen_at_creation() {
        let f = fixture();
        let order = f.service.create_order(request(f.restaurant, &[(f.pizza, 1)])).await.unwrap();
        f.store.reprice(f.pizza, 999);
        let loaded = f.service.get_order(&order.id.to_string()).await.unwrap();
        assert_eq!(loaded.items[0].price, 300);
        assert_eq!(loaded.total_price, 300);
    }

    #[tokio::test]
    async fn get_round_trips_created_order() {
        let f = fixture();
        let created = f.service.create_order(request(f.restaurant, &[(f.pizza, 2), (f.pizza, 1)])).await.unwrap();
        let loaded = f.service.get_order(&created.id.to_string()).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn get_rejects_malformed_id() {
        let f = fixture();
        match f.service.get_order("not-an-id").await {
            Err(OrderError::InvalidInput(msg)) => assert_eq!(msg, INVALID_ORDER_ID_MSG),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_missing_order_is_not_found() {
        let f = fixture();
        match f.service.get_order(&Uuid::new_v4().to_string()).await {
            Err(OrderError::NotFound(msg)) => assert_eq!(msg, ORDER_NOT_FOUND_MSG),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let f = fixture();
        f.store.set_unavailable(true);
        assert!(matches!(
            f.service.create_order(request(f.restaurant, &[(f.pizza, 1)])).await,
            Err(OrderError::Internal(_))
        ));
        assert!(matches!(
            f.service.get_order(&Uuid::new_v4().to_string()).await,
            Err(OrderError::Internal(_))
        ));
    }
}
