use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use log::warn;
use tokio::sync::Semaphore;
use tokio::time;
use crate::server::database::connection::Connection;

pub(crate) struct SharedPool<C> {
    /// pool name
    name: String,
    /// idle clients, handed out in a FIFO manner
    idle: Mutex<VecDeque<C>>,
    /// one permit per idle client
    available: Arc<Semaphore>,
}

/// A fixed set of database clients shared by every request.
pub(crate) struct Pool<C>(Arc<SharedPool<C>>);

impl<C> Clone for Pool<C> {
    fn clone(&self) -> Pool<C> {
        Pool(self.0.clone())
    }
}

impl<C: Send + 'static> Pool<C> {
    /// create an empty pool, clients are added with [`Pool::push`]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(SharedPool {
            name: name.into(),
            idle: Mutex::new(VecDeque::new()),
            available: Arc::new(Semaphore::new(0)),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn idle_count(&self) -> usize {
        self.idle().len()
    }

    /// hand a new client to the pool
    pub fn push(&self, client: C) {
        self.idle().push_back(client);
        self.0.available.add_permits(1);
    }

    /// acquire a connection, bail out with `None` once `timeout` elapses.
    pub async fn acquire(&self, timeout: Duration) -> Option<Connection<C>> {
        let sleep = time::sleep(timeout);
        tokio::pin!(sleep);
        tokio::select! {
            permit = self.0.available.clone().acquire_owned() => {
                let permit = permit.ok()?;
                let client = self.idle().pop_front()?;
                Some(Connection::new(client, self.clone(), permit))
            },
            _ = &mut sleep => {
                warn!("timed out to acquire a connection from pool={} after {:?}", self.name(), timeout);
                None
            },
        }
    }

    /// put a client back without touching the permits; the caller still holds one
    pub(crate) fn release(&self, client: C) {
        self.idle().push_back(client);
    }

    fn idle(&self) -> MutexGuard<'_, VecDeque<C>> {
        self.0.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
