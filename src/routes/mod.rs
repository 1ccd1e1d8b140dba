// Route exports
pub mod favorites;
pub mod tenders;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(tenders::health_check))
        .service(
            web::scope("/api")
                .configure(tenders::configure)
                .configure(favorites::configure),
        );
}
