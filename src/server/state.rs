use crate::server::service::order::OrderService;

#[derive(Clone)]
pub(crate) struct AppState {
    order_service: OrderService,
}

impl AppState {
    pub fn new(order_service: OrderService) -> Self {
        Self {
            order_service,
        }
    }

    pub fn order_service(&self) -> &OrderService {
        &self.order_service
    }
}
