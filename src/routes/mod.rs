// Route exports
pub mod error;
pub mod properties;

pub use error::ApiError;
pub use properties::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(error::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(error::handle_query_payload_error))
            .configure(properties::configure),
    );
}
