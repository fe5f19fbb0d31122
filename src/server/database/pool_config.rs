use std::time::Duration;

pub(crate) const DEFAULT_POOL_SIZE: usize = 10;
pub(crate) const DEFAULT_DB_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone)]
pub(crate) struct PoolConfig {
    /// pool name, used in logs
    pub name: String,
    /// connection pool size
    pub size: usize,
    /// connection string
    pub conn_str: String,
    /// upper bound for acquiring a connection and for each statement
    pub timeout: Duration,
}

impl PoolConfig {
    pub fn new(name: impl Into<String>, conn_str: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: DEFAULT_POOL_SIZE,
            conn_str: conn_str.into(),
            timeout: Duration::from_secs(DEFAULT_DB_TIMEOUT_SECONDS),
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
