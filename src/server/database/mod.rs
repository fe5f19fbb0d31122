pub(crate) mod connection;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod pool;
pub(crate) mod pool_config;
pub(crate) mod postgres;
pub(crate) mod store;
