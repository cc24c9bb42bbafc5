//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .service(
            web::resource("/post/{link:.*}")
                .name("post")
                .route(web::get().to(posts::show)),
        )
        .service(
            web::resource("/create")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create)),
        )
        .route("/health", web::get().to(health::health_check))
        .default_service(web::to(posts::not_found));
}
