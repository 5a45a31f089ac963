use actix_web::{delete, web, HttpResponse};
use uuid::Uuid;

use crate::{errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[delete("/seekers/{seeker_id}")]
pub async fn delete_seeker(
    state: web::Data<AppState>,
    claims: AdminClaims,
    seeker_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let seeker_id = seeker_id.into_inner();
    let response = state.seeker_handler.delete_profile(&seeker_id).await?;

    tracing::info!(admin = %claims.0.sub, seeker_id = %seeker_id, "Admin removed seeker");
    Ok(HttpResponse::Ok().json(response))
}
