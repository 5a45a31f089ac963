use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web,
};

use crate::errors::AppError;

/// Extractor failures answer with the same tagged body as every other error.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        json_payload_error(err).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        path_error(err).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        query_error(err).into()
    }));
}

fn json_payload_error(err: JsonPayloadError) -> AppError {
    tracing::warn!("Rejected JSON payload: {}", err);
    AppError::InvalidInput(format!("JSON payload error: {}", err))
}

fn path_error(err: PathError) -> AppError {
    tracing::warn!("Rejected path parameter: {}", err);
    AppError::InvalidInput("Invalid identifier in path".to_string())
}

fn query_error(err: QueryPayloadError) -> AppError {
    AppError::InvalidInput(format!("Query error: {}", err))
}
