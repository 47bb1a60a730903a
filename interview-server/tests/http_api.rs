//! HTTP API tests over the full router

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::{TestRequest, TestServer};
use interview_core::{Report, SessionView};
use interview_server::http::{
    AdvanceResponse, AppendResponse, FinalizeResponse, StartResponse, TranscriptResponse,
};
use interview_server::{AppState, ErrorResponse, create_router};
use serde_json::{Value, json};

fn test_server() -> TestServer {
    TestServer::new(create_router(Arc::new(AppState::new()))).unwrap()
}

fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

async fn start(server: &TestServer) -> StartResponse {
    let response = server
        .post("/interview/start")
        .json(&json!({
            "questions": [
                "Tell me about yourself.",
                "Describe a challenging project you worked on."
            ]
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn start_issues_credential_and_questions() {
    let server = test_server();
    let started = start(&server).await;

    assert_eq!(started.questions.len(), 2);
    assert_eq!(started.questions[1].index, 1);
    assert_eq!(started.credential.token_type, "bearer");
    assert!(!started.credential.access_token.is_empty());

    let view: SessionView = server
        .get(&format!("/interview/{}", started.session_id))
        .await
        .json();
    assert_eq!(view.cursor, 0);
    assert_eq!(view.status.as_str(), "active");
}

#[tokio::test]
async fn start_by_role_uses_profile_questions() {
    let server = test_server();
    let response = server
        .post("/interview/start")
        .json(&json!({"role": "Engineering"}))
        .await;
    response.assert_status_ok();

    let started: StartResponse = response.json();
    assert!(!started.questions.is_empty());
}

#[tokio::test]
async fn start_with_only_blank_questions_is_unprocessable() {
    let server = test_server();
    let response = server
        .post("/interview/start")
        .json(&json!({"questions": ["  ", ""]}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "CONFIG_ERROR");
}

#[tokio::test]
async fn full_interview_over_http() {
    let server = test_server();
    let started = start(&server).await;
    let id = started.session_id.clone();
    let token = started.credential.access_token.clone();

    let appended: AppendResponse = bearer(server.post("/stt/append"), &token)
        .json(&json!({
            "session_id": id,
            "text": "I have five years of experience in backend systems",
            "sequence": 1
        }))
        .await
        .json();
    assert!(appended.accepted);
    assert_eq!(appended.question_index, 0);

    let duplicate: AppendResponse = bearer(server.post("/stt/append"), &token)
        .json(&json!({
            "session_id": id,
            "text": "I have five years of experience in backend systems",
            "sequence": 1
        }))
        .await
        .json();
    assert_eq!(duplicate.status, "ok");
    assert!(!duplicate.accepted);

    for (state, event) in [
        ("focused", "looking_forward"),
        ("focused", "looking_forward"),
        ("distracted", "cell_phone_detected"),
    ] {
        server
            .post(&format!("/interview/{}/attention", id))
            .json(&json!({"state": state, "event": event, "confidence": 0.9}))
            .await
            .assert_status_ok();
    }

    let advanced: AdvanceResponse = bearer(server.post(&format!("/interview/{}/advance", id)), &token)
        .await
        .json();
    assert_eq!(advanced.cursor, 1);

    let transcript: TranscriptResponse = server
        .get(&format!("/interview/{}/transcript/0", id))
        .await
        .json();
    assert_eq!(
        transcript.transcript,
        "I have five years of experience in backend systems"
    );

    let finalized: FinalizeResponse = bearer(server.post("/report/finalize"), &token)
        .json(&json!({"session_id": id}))
        .await
        .json();
    assert!(!finalized.replayed);
    assert_eq!(finalized.report.questions[0].scores.total, 19);
    assert_eq!(finalized.report.questions[1].scores.total, 18);
    assert!((finalized.report.attention.distracted_ratio - 1.0 / 3.0).abs() < 0.01);

    let replay: FinalizeResponse = bearer(server.post("/report/finalize"), &token)
        .json(&json!({"session_id": id}))
        .await
        .json();
    assert!(replay.replayed);
    assert_eq!(replay.report, finalized.report);

    let fetched: Report = bearer(server.get(&format!("/report/{}", id)), &token)
        .await
        .json();
    assert_eq!(fetched, finalized.report);

    let late = bearer(server.post("/stt/append"), &token)
        .json(&json!({"session_id": id, "text": "one more thing"}))
        .await;
    late.assert_status(StatusCode::CONFLICT);
    let body: ErrorResponse = late.json();
    assert_eq!(body.code, "SESSION_CLOSED");
}

#[tokio::test]
async fn protected_routes_require_matching_credential() {
    let server = test_server();
    let first = start(&server).await;
    let second = start(&server).await;

    server
        .post("/stt/append")
        .json(&json!({"session_id": first.session_id, "text": "hello"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    bearer(server.post("/stt/append"), "not-a-jwt")
        .json(&json!({"session_id": first.session_id, "text": "hello"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = bearer(
        server.post(&format!("/interview/{}/advance", first.session_id)),
        &second.credential.access_token,
    )
    .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "FORBIDDEN");
}

#[tokio::test]
async fn report_before_finalize_is_not_found() {
    let server = test_server();
    let started = start(&server).await;

    bearer(
        server.get(&format!("/report/{}", started.session_id)),
        &started.credential.access_token,
    )
    .await
    .assert_status_not_found();
}

#[tokio::test]
async fn advance_past_last_question_conflicts() {
    let server = test_server();
    let started = start(&server).await;
    let path = format!("/interview/{}/advance", started.session_id);
    let token = &started.credential.access_token;

    bearer(server.post(&path), token).await.assert_status_ok();
    let response = bearer(server.post(&path), token).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "INVALID_TRANSITION");
}

#[tokio::test]
async fn attention_endpoints() {
    let server = test_server();
    let started = start(&server).await;
    let path = format!("/interview/{}/attention", started.session_id);

    server.get(&path).await.assert_status_not_found();

    let snapshot: Value = server
        .post(&path)
        .json(&json!({"state": "focused", "event": "looking_forward", "confidence": 0.75}))
        .await
        .json();
    assert_eq!(snapshot["state"], "focused");
    assert_eq!(snapshot["last_event"], "looking_forward");

    server
        .post(&path)
        .json(&json!({"state": "sleepy", "event": "eyes_closed"}))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    server
        .post(&path)
        .json(&json!({"state": "focused", "event": "looking_forward", "confidence": 3.0}))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let current: Value = server.get(&path).await.json();
    assert_eq!(current["state"], "focused");
}

#[tokio::test]
async fn transcript_for_unknown_question_is_unprocessable() {
    let server = test_server();
    let started = start(&server).await;

    let response = server
        .get(&format!("/interview/{}/transcript/9", started.session_id))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
