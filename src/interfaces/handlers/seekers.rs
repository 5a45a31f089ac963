use actix_web::{
    delete, get,
    http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType},
    patch, post, web, HttpResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    cv::PlainTextDocument,
    entities::{
        education::NewEducation,
        experience::NewExperience,
        profile::UpdateProfileRequest,
    },
    errors::AppError,
    use_cases::extractors::AuthClaims,
    AppState,
};

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CvFormat {
    #[default]
    Pdf,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct CvQuery {
    #[serde(default)]
    pub format: CvFormat,
}

#[get("/seekers/me")]
pub async fn get_me(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let seeker = state.seeker_handler.get_seeker_profile(&profile_id).await?;
    Ok(HttpResponse::Ok().json(seeker))
}

#[patch("/seekers/me")]
pub async fn update_me(
    state: web::Data<AppState>,
    claims: AuthClaims,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let profile = state
        .seeker_handler
        .update_profile(&profile_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[delete("/seekers/me")]
pub async fn delete_me(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let response = state.seeker_handler.delete_self(&profile_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/seekers/me/cv")]
pub async fn get_my_cv(
    state: web::Data<AppState>,
    claims: AuthClaims,
    query: web::Query<CvQuery>,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    cv_response(&state, &profile_id, query.format).await
}

#[post("/seekers/me/education")]
pub async fn add_education(
    state: web::Data<AppState>,
    claims: AuthClaims,
    payload: web::Json<NewEducation>,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let created = state
        .seeker_handler
        .add_education(&profile_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[delete("/seekers/me/education/{education_id}")]
pub async fn delete_education(
    state: web::Data<AppState>,
    claims: AuthClaims,
    education_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let response = state
        .seeker_handler
        .delete_education(&profile_id, &education_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/seekers/me/experience")]
pub async fn add_experience(
    state: web::Data<AppState>,
    claims: AuthClaims,
    payload: web::Json<NewExperience>,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let created = state
        .seeker_handler
        .add_experience(&profile_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[delete("/seekers/me/experience/{experience_id}")]
pub async fn delete_experience(
    state: web::Data<AppState>,
    claims: AuthClaims,
    experience_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let profile_id = claims.profile_id()?;
    let response = state
        .seeker_handler
        .delete_experience(&profile_id, &experience_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/seekers/{seeker_id}")]
pub async fn get_seeker(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    seeker_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let profile = state.seeker_handler.get_seeker(&seeker_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/seekers/{seeker_id}/profile")]
pub async fn get_seeker_profile(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    seeker_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let seeker = state
        .seeker_handler
        .get_seeker_profile(&seeker_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(seeker))
}

#[get("/seekers/{seeker_id}/cv")]
pub async fn get_seeker_cv(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    seeker_id: web::Path<Uuid>,
    query: web::Query<CvQuery>,
) -> Result<HttpResponse, AppError> {
    cv_response(&state, &seeker_id.into_inner(), query.format).await
}

async fn cv_response(
    state: &AppState,
    profile_id: &Uuid,
    format: CvFormat,
) -> Result<HttpResponse, AppError> {
    match format {
        CvFormat::Pdf => {
            let bytes = state.seeker_handler.generate_cv(profile_id).await?;
            tracing::info!(profile_id = %profile_id, size = bytes.len(), "CV generated");

            Ok(HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(format!("cv-{}.pdf", profile_id))],
                })
                .body(bytes))
        }
        CvFormat::Text => {
            let text = state
                .seeker_handler
                .generate_cv_with(profile_id, PlainTextDocument::new())
                .await?;

            Ok(HttpResponse::Ok()
                .insert_header(ContentType::plaintext())
                .body(text))
        }
    }
}
