pub mod codec;
pub mod error;
pub mod handler;
pub mod negotiate;
pub mod response;

use actix_web::web;

pub use error::HttpError;
pub use handler::{BodyLimit, ProcessRegistry};

pub const PROCESS_PATH: &str = "/process";

/// Registers `/process` and the shared state it reads. Every method reaches the
/// handler, which rejects anything but POST itself.
pub fn routes(
    registry: web::Data<ProcessRegistry>,
    limit: BodyLimit,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(registry)
            .app_data(web::Data::new(limit))
            .service(web::resource(PROCESS_PATH).to(handler::process));
    }
}
