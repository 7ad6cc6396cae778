use super::*;
use crate::error::ApiErrorKind;
use crate::request::{MockHttpClient, ReqwestHttpClient};
use crate::session::{MemoryNavigator, MemoryTokenStore};
use mentorai_shared::quiz::{QuizRunner, QuizStep};
use mentorai_shared::{SkillLevel, Track};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BASE: &str = "http://test";

type TestApi = MentorApi<MockHttpClient, MemoryTokenStore, MemoryNavigator>;

fn api_at(path: &str) -> (TestApi, MemoryTokenStore, MemoryNavigator) {
    let store = MemoryTokenStore::new();
    let nav = MemoryNavigator::at(path);
    let api = MentorApi::new(
        MockHttpClient::new(),
        store.clone(),
        nav.clone(),
        ClientConfig::new(BASE),
    );
    (api, store, nav)
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "ada",
        "email": "ada@example.com",
        "age": 12,
        "track": "backend",
        "primary_language": "python",
        "goal": "games"
    })
}

#[tokio::test]
async fn test_bearer_attached_to_protected_endpoints() {
    let (api, store, _) = api_at("/dashboard");
    store.set("access_token", "tok");
    api.client()
        .mock_response(&url("/auth/profile/"), 200, user_json());

    let user = api.profile().await.unwrap();
    assert_eq!(user.username, "ada");
    assert!(user.is_child());

    let (req_url, method, headers, body) = api.client().last_request().unwrap();
    assert_eq!(req_url, url("/auth/profile/"));
    assert_eq!(method, HttpMethod::Get);
    assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer tok"));
    assert_eq!(
        headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert!(body.is_none());
}

#[tokio::test]
async fn test_auth_endpoints_never_carry_bearer() {
    let (api, store, _) = api_at("/login");
    store.set("access_token", "stale");
    api.client().mock_response(
        &url("/auth/login/"),
        200,
        json!({"access": "fresh", "refresh": "r1"}),
    );

    api.login("ada", "secret").await.unwrap();

    let (_, _, headers, body) = api.client().last_request().unwrap();
    assert!(!headers.contains_key("Authorization"));
    let sent: serde_json::Value = serde_json::from_str(&body.unwrap()).unwrap();
    assert_eq!(sent, json!({"username": "ada", "password": "secret"}));

    assert_eq!(store.get("access_token").as_deref(), Some("fresh"));
    assert_eq!(store.get("refresh_token").as_deref(), Some("r1"));
    assert!(api.is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_redirects() {
    let (api, store, nav) = api_at("/courses/backend");
    store.set("access_token", "expired");
    api.client().mock_response(
        &url("/api/courses/backend/"),
        401,
        json!({"detail": "Given token not valid for any token type"}),
    );

    let err = api.course("backend").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(store.get("access_token"), None);
    assert_eq!(*nav.redirects.borrow(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_on_login_page_does_not_redirect() {
    let (api, _, nav) = api_at("/login");
    api.client().mock_response(
        &url("/auth/login/"),
        401,
        json!({"detail": "No active account found with the given credentials"}),
    );

    let err = api.login("ada", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(nav.redirects.borrow().is_empty());
    assert!(!api.is_authenticated());
}

#[tokio::test]
async fn test_quiz_submission_posts_answers() {
    let (api, store, _) = api_at("/test");
    store.set("access_token", "tok");
    api.client().mock_response(
        &url("/api/questions/?language=python"),
        200,
        json!([
            {"id": 1, "text_en": "What is a list?", "options_en": ["a", "b", "c"]},
            {"id": 2, "text_en": "What is a dict?", "options_en": ["a", "b", "c"]},
            {"id": 3, "text_en": "What is a set?", "options_en": ["a", "b", "c"]}
        ]),
    );
    api.client().mock_response(
        &url("/api/submit-test/"),
        200,
        json!({"level": "junior", "feedback": "Good start", "roadmap": [{"topic": "OOP"}]}),
    );

    let questions = api.questions("python").await.unwrap();
    let mut quiz = QuizRunner::new("python", questions);
    let mut submission = None;
    for option in [2, 0, 1] {
        quiz.select(option).unwrap();
        if let QuizStep::Submit(req) = quiz.next().unwrap() {
            submission = Some(req);
        }
    }

    let report = api.submit_test(&submission.unwrap()).await.unwrap();
    assert_eq!(report.level, SkillLevel::Junior);
    assert_eq!(report.roadmap[0].topic, "OOP");

    let (req_url, method, _, body) = api.client().last_request().unwrap();
    assert_eq!(req_url, url("/api/submit-test/"));
    assert_eq!(method, HttpMethod::Post);
    let sent: serde_json::Value = serde_json::from_str(&body.unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({
            "language": "python",
            "answers": [
                {"id": 1, "option": 2},
                {"id": 2, "option": 0},
                {"id": 3, "option": 1}
            ]
        })
    );
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (api, _, _) = api_at("/register");
    api.client().mock_response(
        &url("/auth/register/"),
        400,
        json!({"username": ["A user with that username already exists."]}),
    );

    let err = api
        .register(&RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
            age: Some(12),
            track: Track::Backend,
            primary_language: "python".into(),
            goal: "games".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(
        err.first_field_error("username"),
        Some("A user with that username already exists.")
    );
}

#[tokio::test]
async fn test_empty_body_is_accepted() {
    let (api, _, _) = api_at("/courses/backend");
    api.client()
        .mock_raw(&url("/api/lessons/complete/"), 200, "");

    api.complete(&CompleteLessonRequest {
        lesson_slug: "variables".into(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_network_error_keeps_session() {
    let (api, store, nav) = api_at("/dashboard");
    store.set("access_token", "tok");
    *api.client().offline.borrow_mut() = true;

    let err = api.progress().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert!(api.is_authenticated());
    assert!(nav.redirects.borrow().is_empty());
}

#[tokio::test]
async fn test_dashboard_tolerates_progress_failure() {
    let (api, store, _) = api_at("/dashboard");
    store.set("access_token", "tok");
    api.client()
        .mock_response(&url("/auth/profile/"), 200, user_json());
    api.client()
        .mock_response(&url("/api/progress/"), 500, json!({"error": "boom"}));

    let data = api.dashboard().await.unwrap();
    assert_eq!(data.user.id, 1);
    assert!(data.progress.is_none());
}

#[tokio::test]
async fn test_decode_failure_is_reported() {
    let (api, _, _) = api_at("/dashboard");
    api.client()
        .mock_raw(&url("/auth/profile/"), 200, "<html>oops</html>");

    let err = api.profile().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (api, store, _) = api_at("/dashboard");
    store.set("access_token", "tok");
    store.set("refresh_token", "r");
    api.logout();
    assert!(!api.is_authenticated());
    assert_eq!(store.get("refresh_token"), None);
}

#[tokio::test]
async fn test_update_profile_patches_only_set_fields() {
    let (api, store, _) = api_at("/dashboard");
    store.set("access_token", "tok");
    let mut updated = user_json();
    updated["track"] = json!("frontend");
    api.client()
        .mock_response(&url("/auth/profile/"), 200, updated);

    let req = UpdateProfileRequest {
        track: Some(Track::Frontend),
        ..Default::default()
    };
    let user = api.update_profile(&req).await.unwrap();
    assert_eq!(user.track, Track::Frontend);

    let (req_url, method, headers, body) = api.client().last_request().unwrap();
    assert_eq!(req_url, url("/auth/profile/"));
    assert_eq!(method, HttpMethod::Patch);
    assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer tok"));
    let sent: serde_json::Value = serde_json::from_str(&body.unwrap()).unwrap();
    assert_eq!(sent, json!({"track": "frontend"}));
}

/// 在本地端口应答一次请求，返回基础 URL 和收到的原始请求
async fn serve_once(
    status: &'static str,
    body: String,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&raw).into_owned()
    });
    (base, handle)
}

type ReqwestApi = MentorApi<ReqwestHttpClient, MemoryTokenStore, MemoryNavigator>;

fn reqwest_api(base: &str) -> (ReqwestApi, MemoryTokenStore, MemoryNavigator) {
    let store = MemoryTokenStore::new();
    let nav = MemoryNavigator::at("/dashboard");
    let api = MentorApi::new(
        ReqwestHttpClient::new(),
        store.clone(),
        nav.clone(),
        ClientConfig::new(base),
    );
    (api, store, nav)
}

#[tokio::test]
async fn test_reqwest_client_round_trip() {
    let (base, server) = serve_once("200 OK", user_json().to_string()).await;
    let (api, store, _) = reqwest_api(&base);
    store.set("access_token", "tok");

    let req = UpdateProfileRequest {
        age: Some(13),
        ..Default::default()
    };
    let user = api.update_profile(&req).await.unwrap();
    assert_eq!(user.username, "ada");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("PATCH /auth/profile/ HTTP/1.1"), "{}", raw);
    let lower = raw.to_ascii_lowercase();
    assert!(lower.contains("authorization: bearer tok"), "{}", raw);
    assert!(lower.contains("content-type: application/json"), "{}", raw);
    assert!(raw.ends_with(r#"{"age":13}"#), "{}", raw);
}

#[tokio::test]
async fn test_reqwest_client_applies_401_policy() {
    let body = json!({"detail": "expired"}).to_string();
    let (base, server) = serve_once("401 Unauthorized", body).await;
    let (api, store, nav) = reqwest_api(&base);
    store.set("access_token", "old");

    let err = api.profile().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(store.get("access_token"), None);
    assert_eq!(*nav.redirects.borrow(), vec!["/login".to_string()]);
    server.await.unwrap();
}

#[tokio::test]
async fn test_reqwest_client_reports_refused_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (api, _, _) = reqwest_api(&base);
    let err = api.profile().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
}
