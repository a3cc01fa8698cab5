pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::Storage;
pub use state::{AppState, Repositories};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::menu::list_menu,
        handlers::menu::get_menu_item,
        handlers::menu::create_menu_item,
        handlers::menu::update_menu_item,
        handlers::menu::delete_menu_item,
        handlers::menu::toggle_availability,
        handlers::orders::submit_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::checkout,
        handlers::orders::incomplete_submissions,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::payments::record_payment,
        handlers::payments::list_customer_payments,
    ),
    tags(
        (name = "menu", description = "Menu catalog"),
        (name = "orders", description = "Order submission and history"),
        (name = "customers", description = "Customer profiles"),
        (name = "payments", description = "Masked card payment records"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(handlers::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
