use actix_web::{get, post, web, HttpResponse, Responder};
use crate::server::model::order::CreateOrderRequest;
use crate::server::service::error::OrderError;
use crate::server::state::AppState;

#[post("/orders")]
/// create and price a new order
async fn post_order(body: web::Json<CreateOrderRequest>, data: web::Data<AppState>) -> Result<impl Responder, OrderError> {
    let order = data.order_service().create_order(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(order))
}

#[get("/orders/{id}")]
/// get an order by id
async fn get_order(id: web::Path<String>, data: web::Data<AppState>) -> Result<impl Responder, OrderError> {
    let order = data.order_service().get_order(&id.into_inner()).await?;
    Ok(web::Json(order))
}
