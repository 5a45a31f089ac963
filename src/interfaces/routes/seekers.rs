use actix_web::web;

use crate::handlers::seekers;

/// `/seekers/me*` is registered before `/seekers/{seeker_id}*` so that
/// "me" is never parsed as an id.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(seekers::get_me)
        .service(seekers::update_me)
        .service(seekers::delete_me)
        .service(seekers::get_my_cv)
        .service(seekers::add_education)
        .service(seekers::delete_education)
        .service(seekers::add_experience)
        .service(seekers::delete_experience)
        .service(seekers::get_seeker)
        .service(seekers::get_seeker_profile)
        .service(seekers::get_seeker_cv);
}
