#[macro_use]
mod test_utils;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn home_is_public() {
    let app = init_app!().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Ok");
}

#[actix_rt::test]
async fn health_reports_an_unreachable_database() {
    let app = init_app!().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "Unavailable");
    assert_eq!(body["status"], "degraded");
}

#[actix_rt::test]
async fn protected_routes_require_a_token() {
    let app = init_app!().await;

    let req = test::TestRequest::get().uri("/api/v1/seekers/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "unauthorized");
}

#[actix_rt::test]
async fn garbage_tokens_are_rejected() {
    let app = init_app!().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/seekers/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn admin_routes_reject_regular_seekers() {
    let app = init_app!().await;
    let token = token_for(&Uuid::new_v4(), false);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/seekers/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "forbidden");
}

#[actix_rt::test]
async fn malformed_seeker_id_is_a_bad_request() {
    let app = init_app!().await;
    let token = token_for(&Uuid::new_v4(), false);

    let req = test::TestRequest::get()
        .uri("/api/v1/seekers/not-a-uuid")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
}

#[actix_rt::test]
async fn token_subject_must_be_a_profile_id() {
    let app = init_app!().await;
    let config = test_config();
    let claims = seeker_backend::entities::token::Claims {
        sub: "someone".into(),
        admin: false,
        iat: chrono::Utc::now().timestamp() as usize,
        exp: (chrono::Utc::now().timestamp() + 300) as usize,
    };
    let keys = seeker_backend::settings::JwtKeys::from(&config);
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS512),
        &claims,
        &keys.encoding,
    )
    .unwrap();

    let req = test::TestRequest::delete()
        .uri("/api/v1/seekers/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn education_with_end_before_start_fails_validation() {
    let app = init_app!().await;
    let token = token_for(&Uuid::new_v4(), false);

    let req = test::TestRequest::post()
        .uri("/api/v1/seekers/me/education")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "degree": "BSc",
            "field_of_study": "Computer Science",
            "institution": "University of Ghana",
            "start_date": "2018-09-01",
            "end_date": "2017-06-30",
            "is_studying": false
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));
}

#[actix_rt::test]
async fn malformed_json_is_a_tagged_bad_request() {
    let app = init_app!().await;
    let token = token_for(&Uuid::new_v4(), false);

    let req = test::TestRequest::post()
        .uri("/api/v1/seekers/me/experience")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "invalid_input");
}

#[actix_rt::test]
async fn profile_update_rejects_bad_phone_numbers() {
    let app = init_app!().await;
    let token = token_for(&Uuid::new_v4(), false);

    let req = test::TestRequest::patch()
        .uri("/api/v1/seekers/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "phone": "call me maybe" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}
