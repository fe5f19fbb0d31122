use actix_web::web;
use crate::server::controller::order::{get_order, post_order};

/// Register the order endpoints
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(post_order).service(get_order);
}
