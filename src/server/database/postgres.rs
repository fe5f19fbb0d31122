use std::time::Duration;
use anyhow::{anyhow, Context};
use log::warn;
use async_trait::async_trait;
use tokio::time;
use tokio_postgres::types::{Json, ToSql};
use tokio_postgres::{Client, Row};
use uuid::Uuid;
use crate::server::database::connection::{connect_util, Connection};
use crate::server::database::pool::Pool;
use crate::server::database::pool_config::PoolConfig;
use crate::server::database::store::{MenuCatalog, OrderStore};
use crate::server::model::menu_item::MenuItem;
use crate::server::model::order::{NewOrder, Order, OrderLine};

const ORDER_COLUMNS: &str = "id, restaurant_id, customer_name, order_type, items, total_price, created_at";

/// Menu catalog and order store backed by the Postgres pool.
pub(crate) struct PgStore {
    pool: Pool<Client>,
    conn_str: String,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: Pool<Client>, config: &PoolConfig) -> Self {
        Self { pool, conn_str: config.conn_str.clone(), timeout: config.timeout }
    }

    /// Borrow a client, reconnecting it first if the server side went away.
    ///
    /// When reconnecting fails the closed client stays in the pool, so a later request retries.
    async fn acquire(&self) -> anyhow::Result<Connection<Client>> {
        let mut conn = self
            .pool
            .acquire(self.timeout)
            .await
            .ok_or_else(|| anyhow!("no connection available in pool={}", self.pool.name()))?;
        if conn.client().is_closed() {
            warn!("connection in pool={} is closed, reconnecting", self.pool.name());
            let fresh = time::timeout(self.timeout, connect_util::connect(&self.conn_str))
                .await
                .context("reconnect timed out")?
                .context("failed to reconnect")?;
            conn.replace_client(fresh);
        }
        Ok(conn)
    }

    async fn query(&self, stmt: &str, params: &[&(dyn ToSql + Sync)]) -> anyhow::Result<Vec<Row>> {
        let conn = self.acquire().await?;
        let rows = time::timeout(self.timeout, conn.client().query(stmt, params))
            .await
            .context("statement timed out")??;
        Ok(rows)
    }
}

fn menu_item_from_row(row: &Row) -> anyhow::Result<MenuItem> {
    Ok(MenuItem {
        id: row.try_get("id")?,
        restaurant_id: row.try_get("restaurant_id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        category: row.try_get("category")?,
        is_available: row.try_get("is_available")?,
    })
}

fn order_from_row(row: &Row) -> anyhow::Result<Order> {
    let Json(items) = row.try_get::<_, Json<Vec<OrderLine>>>("items")?;
    Ok(Order {
        id: row.try_get("id")?,
        restaurant_id: row.try_get("restaurant_id")?,
        customer_name: row.try_get("customer_name")?,
        order_type: row.try_get("order_type")?,
        created_at: row.try_get("created_at")?,
        items,
        total_price: row.try_get("total_price")?,
    })
}

#[async_trait]
impl MenuCatalog for PgStore {
    async fn find_available(&self, restaurant_id: Uuid, ids: &[Uuid]) -> anyhow::Result<Vec<MenuItem>> {
        let rows = self
            .query(
                r#"
                SELECT id, restaurant_id, name, price, category, is_available
                FROM menu_item
                WHERE id = ANY($1)
                AND restaurant_id = $2
                AND is_available
            "#,
                &[&ids, &restaurant_id],
            )
            .await
            .context("failed to query menu items")?;
        rows.iter().map(menu_item_from_row).collect()
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn insert(&self, order: NewOrder) -> anyhow::Result<Order> {
        let items = Json(&order.items);
        let params: &[&(dyn ToSql + Sync); 6] = &[
            &order.restaurant_id,
            &order.customer_name,
            &order.order_type,
            &items,
            &order.total_price,
            &order.created_at,
        ];
        let rows = self
            .query(
                r#"
                INSERT INTO "order"(restaurant_id, customer_name, order_type, items, total_price, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
            "#,
                params,
            )
            .await
            .context("failed to insert order")?;
        let id: Uuid = rows.first().context("insert returned no row")?.try_get("id")?;
        Ok(order.into_order(id))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let stmt = format!(r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE id = $1"#);
        let rows = self.query(&stmt, &[&id]).await.context("failed to query order")?;
        rows.first().map(order_from_row).transpose()
    }
}
