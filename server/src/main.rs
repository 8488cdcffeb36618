#[macro_use]
extern crate log;

use std::{env, io};

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

mod clock;
mod routes;
mod tests;

use crate::clock::{clock_data, SystemClock};
use crate::routes::{not_found, routes};
use db::{get_conn, new_pool, run_migrations};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

fn startup_error<E: ToString>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = new_pool().map_err(startup_error)?;
    let conn = get_conn(&pool).map_err(startup_error)?;
    run_migrations(&conn).map_err(startup_error)?;
    drop(conn);

    let clock = clock_data(SystemClock);
    let client_host = env::var("CLIENT_HOST").ok();
    let bind_address =
        env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

    info!(
        "Serving polls from {} on {}",
        db::database_url(),
        bind_address
    );

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
            .max_age(3600);
        if let Some(client_host) = &client_host {
            cors = cors.allowed_origin(client_host);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(Logger::new("%a %{User-Agent}i"))
            .app_data(web::Data::new(pool.clone()))
            .app_data(clock.clone())
            .configure(routes)
            .default_service(web::route().to(not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}
