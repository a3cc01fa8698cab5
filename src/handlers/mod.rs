pub mod customers;
pub mod menu;
pub mod orders;
pub mod payments;

use actix_web::web;

use crate::errors::AppError;

/// Register every `/api` route. Malformed JSON bodies, including unknown
/// enum tags, are answered with 400 `{error}` like any other validation
/// failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {}", err);
        AppError::BadRequest(err.to_string()).into()
    }));
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/menu")
                    .route("", web::get().to(menu::list_menu))
                    .route("", web::post().to(menu::create_menu_item))
                    .route("/{id}", web::get().to(menu::get_menu_item))
                    .route("/{id}", web::put().to(menu::update_menu_item))
                    .route("/{id}", web::patch().to(menu::update_menu_item))
                    .route("/{id}", web::delete().to(menu::delete_menu_item))
                    .route("/{id}/toggle", web::patch().to(menu::toggle_availability)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(orders::submit_order))
                    .route("", web::get().to(orders::list_orders))
                    .route("/{id}", web::get().to(orders::get_order)),
            )
            .service(
                web::scope("/customers")
                    .route("", web::get().to(customers::list_customers))
                    .route("/{id}", web::get().to(customers::get_customer))
                    .route("/{id}/payments", web::get().to(payments::list_customer_payments)),
            )
            .route("/payment", web::post().to(payments::record_payment))
            .route("/checkout", web::post().to(orders::checkout))
            .route(
                "/submissions/incomplete",
                web::get().to(orders::incomplete_submissions),
            ),
    );
}
