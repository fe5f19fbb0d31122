//! main file for the server

mod controller;
mod database;
pub(crate) mod model;
mod routes;
mod service;
mod state;
mod util;

use std::io;
use std::sync::Arc;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use tokio_postgres::Client;
use crate::server::controller::error::json_config;
use crate::server::database::pool::Pool;
use crate::server::database::postgres::PgStore;
use crate::server::model::config::ServerConfig;
use crate::server::service::order::OrderService;
use crate::server::state::AppState;

/// Run the server
pub(crate) async fn run(ServerConfig { addr, pool }: ServerConfig) -> io::Result<()> {
    // abort startup if the database is unreachable
    let db_pool = Pool::<Client>::connect(&pool).await.map_err(|e| {
        error!("failed to connect pool={}, {:#}", pool.name, e);
        io::Error::other(e)
    })?;
    info!("pool={} ready with {} connections", db_pool.name(), db_pool.idle_count());

    let store = Arc::new(PgStore::new(db_pool, &pool));
    let state = web::Data::new(AppState::new(OrderService::new(store.clone(), store)));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(json_config())
            .configure(routes::orders::configure)
    })
        .bind(addr)?
        .run()
        .await
}
