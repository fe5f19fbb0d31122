pub(crate) mod config;
pub(crate) mod menu_item;
pub(crate) mod order;
