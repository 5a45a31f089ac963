use actix_web::web;

use crate::{
    constants::API_PREFIX,
    handlers::{home::home, system::health_check},
};

mod admin;
mod json_error;
mod seekers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(admin::config_routes)
            .configure(seekers::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
