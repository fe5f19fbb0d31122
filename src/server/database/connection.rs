use anyhow::Context;
use log::{error, info};
use tokio::sync::OwnedSemaphorePermit;
use tokio::task::JoinSet;
use tokio_postgres::{Client, NoTls};
use crate::server::database::pool::Pool;
use crate::server::database::pool_config::PoolConfig;

/// A client borrowed from a [`Pool`], returned to it on drop.
pub(crate) struct Connection<C: Send + 'static> {
    client: Option<C>,
    pool: Pool<C>,
    _permit: OwnedSemaphorePermit,
}

impl<C: Send + 'static> Connection<C> {
    pub(crate) fn new(client: C, pool: Pool<C>, permit: OwnedSemaphorePermit) -> Self {
        Self { client: Some(client), pool, _permit: permit }
    }

    pub fn client(&self) -> &C {
        // only taken in drop
        self.client.as_ref().expect("client is present until drop")
    }

    /// Swap in a new client; the old one is returned to the caller and never goes back to the pool.
    pub fn replace_client(&mut self, client: C) -> Option<C> {
        self.client.replace(client)
    }
}

impl<C: Send + 'static> Drop for Connection<C> {
    fn drop(&mut self) {
        // the client goes back before the permit is released with the fields
        if let Some(client) = self.client.take() {
            self.pool.release(client);
        }
    }
}

pub(crate) mod connect_util {
    use super::*;

    pub async fn connect(conn_str: &str) -> anyhow::Result<Client> {
        let (client, conn) = tokio_postgres::connect(conn_str, NoTls)
            .await
            .context("failed to create connection")?;
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                error!("connection returned error and aborted, {}", e);
            }
        });
        Ok(client)
    }
}

impl Pool<Client> {
    /// Open `config.size` connections concurrently; any failure aborts the whole pool.
    pub async fn connect(config: &PoolConfig) -> anyhow::Result<Self> {
        let pool = Pool::new(config.name.clone());
        let mut set = JoinSet::new();
        for _ in 0..config.size {
            let conn_str = config.conn_str.clone();
            set.spawn(async move { connect_util::connect(&conn_str).await });
        }
        while let Some(res) = set.join_next().await {
            let client = res.context("connect task failed")??;
            info!("connection created for pool={}", pool.name());
            pool.push(client);
        }
        Ok(pool)
    }
}
