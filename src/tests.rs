//! Integration tests for the resume backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::ats::HttpAtsGateway;
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::skills::SkillCatalog;
use crate::{create_router, AppState};

/// Stand-in for the external ATS analyzer.
#[derive(Default)]
struct AtsStub {
    fail: AtomicBool,
    last_request: Mutex<Option<Value>>,
}

async fn stub_analyze(
    State(stub): State<Arc<AtsStub>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Ok(mut last) = stub.last_request.lock() {
        *last = Some(body);
    }
    if stub.fail.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "analyzer crashed" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "ats_score": 82,
                "formatting_score": 21,
                "keyword_score": 30,
                "structure_score": 31,
                "suggestions": ["Quantify your achievements"],
                "missing_keywords": ["Kubernetes"],
                "strengths": ["Clear structure"],
                "job_match": { "match_percentage": 70 }
            }
        })),
    )
}

async fn spawn_ats_stub() -> (String, Arc<AtsStub>) {
    let stub = Arc::new(AtsStub::default());
    let app = Router::new()
        .route("/api/analyze-ats", post(stub_analyze))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let addr = listener.local_addr().expect("Failed to get stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/analyze-ats", addr), stub)
}

/// Test fixture for integration tests.
struct TestFixture {
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    /// Fixture whose ATS analyzer is unreachable.
    async fn new() -> Self {
        Self::with_ats_url("http://127.0.0.1:9/api/analyze-ats".to_string()).await
    }

    async fn with_ats_url(ats_url: String) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        let config = Config {
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            ats_url: ats_url.clone(),
            ats_timeout: Duration::from_secs(5),
            session_ttl: chrono::Duration::minutes(30),
            skills_path: None,
            cookie_secure: false,
            rejected: Vec::new(),
        };

        let state = AppState {
            repo,
            config: Arc::new(config),
            skills: Arc::new(SkillCatalog::load(None).expect("Failed to load skills")),
            ats: Arc::new(
                HttpAtsGateway::new(ats_url, Duration::from_secs(5))
                    .expect("Failed to build ATS client"),
            ),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A client with its own cookie jar.
    fn client(&self) -> Client {
        Client::builder().cookie_store(true).build().unwrap()
    }

    async fn register(&self, client: &Client, email: &str) -> reqwest::Response {
        client
            .post(self.url("/auth/register"))
            .json(&json!({
                "name": "Test User",
                "number": "9876543210",
                "email": email,
                "password": "password123",
                "cpassword": "password123"
            }))
            .send()
            .await
            .unwrap()
    }

    /// Register and log in a fresh user, returning their client.
    async fn signed_in(&self, email: &str) -> Client {
        let client = self.client();
        assert_eq!(self.register(&client, email).await.status(), 201);

        let resp = client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": "password123" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        client
    }

    async fn create_resume(&self, client: &Client, body: Value) -> String {
        let resp = client
            .post(self.url("/resume/create"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.unwrap();
        body["data"]["resumeId"].as_str().unwrap().to_string()
    }
}

fn minimal_resume(title: &str) -> Value {
    json!({
        "resumeTitle": title,
        "personalInfo": {
            "firstName": "A",
            "lastName": "B",
            "email": "a@b.com",
            "phone": "1234567890",
            "location": "X"
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client()
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_resume_routes_require_session() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client()
        .get(fixture.url("/resume/list"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert_eq!(body["error"], "NOT_AUTHENTICATED");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_forged_session_cookie_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client()
        .get(fixture.url("/resume/list"))
        .header("cookie", "itnav.sid=not-a-session.secret")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_register_login_me_logout() {
    let fixture = TestFixture::new().await;
    let client = fixture.client();

    let resp = fixture.register(&client, "Jane@Example.com").await;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert!(body["error"].is_null());

    // Wrong password
    let resp = client
        .post(fixture.url("/auth/login"))
        .json(&json!({ "email": "jane@example.com", "password": "wrongpass1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .post(fixture.url("/auth/login"))
        .json(&json!({ "email": "jane@example.com", "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("itnav.sid="));
    assert!(set_cookie.contains("HttpOnly"));

    let resp = client.get(fixture.url("/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Test User");
    assert!(body["data"]["defaultResume"].is_null());
    assert_eq!(body["data"]["totalResumesCreated"], 0);

    let resp = client.post(fixture.url("/auth/logout")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.get(fixture.url("/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_register_validation() {
    let fixture = TestFixture::new().await;
    let client = fixture.client();

    assert_eq!(fixture.register(&client, "dup@example.com").await.status(), 201);

    let resp = fixture.register(&client, "DUP@example.com").await;
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "DUPLICATE_ERROR");

    let resp = client
        .post(fixture.url("/auth/register"))
        .json(&json!({
            "name": "Mismatch",
            "number": "9876543210",
            "email": "mismatch@example.com",
            "password": "password123",
            "cpassword": "password321"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_and_list_scoped_to_owner() {
    let fixture = TestFixture::new().await;
    let alice = fixture.signed_in("alice@example.com").await;
    let bob = fixture.signed_in("bob@example.com").await;

    let resp = alice
        .post(fixture.url("/resume/create"))
        .json(&minimal_resume("T"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["resumeTitle"], "T");
    let id = body["data"]["resumeId"].as_str().unwrap().to_string();

    let body: Value = alice
        .get(fixture.url("/resume/list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["resumes"][0]["id"], id.as_str());
    assert_eq!(body["data"]["resumes"][0]["fullName"], "A B");

    let body: Value = bob
        .get(fixture.url("/resume/api/list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["count"], 0);

    let body: Value = alice
        .get(fixture.url("/auth/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["totalResumesCreated"], 1);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("v@example.com").await;

    // Missing personal info
    let resp = client
        .post(fixture.url("/resume/create"))
        .json(&json!({ "resumeTitle": "T" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // Bad email
    let mut bad_email = minimal_resume("T");
    bad_email["personalInfo"]["email"] = json!("invalid-email");
    let resp = client
        .post(fixture.url("/resume/create"))
        .json(&bad_email)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // 51 skills fail, 50 succeed
    let mut too_many = minimal_resume("T");
    too_many["skills"] = json!((0..51).map(|i| format!("Skill{i}")).collect::<Vec<_>>());
    let resp = client
        .post(fixture.url("/resume/create"))
        .json(&too_many)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let mut just_enough = minimal_resume("T");
    just_enough["skills"] = json!((0..50).map(|i| format!("Skill{i}")).collect::<Vec<_>>());
    fixture.create_resume(&client, just_enough).await;

    // Malformed JSON
    let resp = client
        .post(fixture.url("/resume/create"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_ownership_is_opaque() {
    let fixture = TestFixture::new().await;
    let alice = fixture.signed_in("alice@example.com").await;
    let bob = fixture.signed_in("bob@example.com").await;
    let id = fixture.create_resume(&alice, minimal_resume("Private")).await;

    let resp = bob
        .get(fixture.url(&format!("/resume/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["data"].is_null());

    let resp = bob
        .put(fixture.url(&format!("/resume/{}", id)))
        .json(&json!({ "resumeTitle": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = bob
        .delete(fixture.url(&format!("/resume/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = alice
        .get(fixture.url(&format!("/resume/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["resumeTitle"], "Private");
    assert_eq!(body["data"]["isActive"], true);
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("ids@example.com").await;

    let resp = client
        .get(fixture.url("/resume/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "INVALID_ID");

    let resp = client
        .get(fixture.url(&format!("/resume/{}", uuid::Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_update_only_title() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("upd@example.com").await;

    let mut body = minimal_resume("Original");
    body["skills"] = json!(["Rust", "SQL"]);
    let id = fixture.create_resume(&client, body).await;

    let resp = client
        .put(fixture.url(&format!("/resume/{}", id)))
        .json(&json!({ "resumeTitle": "Renamed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["resumeTitle"], "Renamed");
    assert_eq!(body["data"]["version"], 2);

    let body: Value = client
        .get(fixture.url(&format!("/resume/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["resumeTitle"], "Renamed");
    assert_eq!(body["data"]["personalInfo"]["email"], "a@b.com");
    assert_eq!(body["data"]["skills"], json!(["Rust", "SQL"]));
    assert_eq!(body["data"]["version"], 2);

    // Explicit null empties a list
    let resp = client
        .put(fixture.url(&format!("/resume/{}", id)))
        .json(&json!({ "skills": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Null on a required field is rejected
    let resp = client
        .put(fixture.url(&format!("/resume/{}", id)))
        .json(&json!({ "resumeTitle": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = client
        .get(fixture.url(&format!("/resume/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["skills"], json!([]));
    assert_eq!(body["data"]["resumeTitle"], "Renamed");
    assert_eq!(body["data"]["version"], 3);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("del@example.com").await;
    let id = fixture.create_resume(&client, minimal_resume("Doomed")).await;

    for _ in 0..2 {
        let resp = client
            .delete(fixture.url(&format!("/resume/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["resumeId"], id.as_str());
        assert_eq!(body["data"]["message"], "Resume deleted");
    }

    let resp = client
        .get(fixture.url(&format!("/resume/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = client
        .get(fixture.url("/resume/list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn test_deleting_default_clears_it() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("def@example.com").await;
    let keep = fixture.create_resume(&client, minimal_resume("Keep")).await;
    let gone = fixture.create_resume(&client, minimal_resume("Gone")).await;

    let resp = client
        .put(fixture.url(&format!("/resume/{}/default", gone)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = client
        .get(fixture.url("/auth/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["defaultResume"], gone.as_str());

    client
        .delete(fixture.url(&format!("/resume/{}", gone)))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .get(fixture.url("/auth/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["defaultResume"].is_null());

    let body: Value = client
        .get(fixture.url("/resume/list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["resumes"][0]["id"], keep.as_str());
    assert_eq!(body["data"]["resumes"][0]["isDefault"], false);
}

#[tokio::test]
async fn test_resume_text() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("text@example.com").await;

    let mut body = minimal_resume("Text");
    body["professionalSummary"] = json!("Backend engineer");
    body["skills"] = json!(["Rust"]);
    let id = fixture.create_resume(&client, body).await;

    let body: Value = client
        .get(fixture.url(&format!("/resume/{}/text", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let text = body["data"]["text"].as_str().unwrap();
    assert!(text.starts_with("A B\n"));
    assert!(text.contains("PROFESSIONAL SUMMARY\nBackend engineer"));
    assert!(text.contains("SKILLS\nRust"));
}

#[tokio::test]
async fn test_analyze_with_unreachable_analyzer() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("ats@example.com").await;
    let id = fixture.create_resume(&client, minimal_resume("Unscored")).await;

    let resp = client
        .post(fixture.url(&format!("/resume/{}/analyze", id)))
        .json(&json!({ "jobDescription": "Rust developer" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "ATS_SERVICE_ERROR");

    let resp = client
        .get(fixture.url(&format!("/resume/{}/ats-score", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Resume not yet analyzed");
    assert!(body["data"]["atsScore"].is_null());
    assert_eq!(body["data"]["resumeId"], id.as_str());
}

#[tokio::test]
async fn test_analyze_persists_scores_and_survives_outage() {
    let (ats_url, stub) = spawn_ats_stub().await;
    let fixture = TestFixture::with_ats_url(ats_url).await;
    let client = fixture.signed_in("scored@example.com").await;

    let mut body = minimal_resume("Scored");
    body["jobDescription"] = json!("Stored description");
    let id = fixture.create_resume(&client, body).await;

    // No body: the stored job description is sent
    let resp = client
        .post(fixture.url(&format!("/resume/{}/analyze", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["atsScore"], 82.0);
    assert_eq!(body["data"]["missingKeywords"], json!(["Kubernetes"]));
    assert_eq!(body["data"]["jobMatch"]["match_percentage"], 70);
    assert!(body["data"]["lastAnalyzed"].is_string());

    let sent = stub.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(sent["job_description"], "Stored description");
    assert_eq!(sent["resume_data"]["resumeTitle"], "Scored");

    // Analyzer goes down: stored scores are untouched
    stub.fail.store(true, Ordering::SeqCst);
    let resp = client
        .post(fixture.url(&format!("/resume/{}/analyze", id)))
        .json(&json!({ "jobDescription": "Override" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);

    let sent = stub.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(sent["job_description"], "Override");

    let body: Value = client
        .get(fixture.url(&format!("/resume/{}/ats-score", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["atsScore"], 82.0);
    assert_eq!(body["data"]["strengths"], json!(["Clear structure"]));
    assert!(body["data"].get("jobMatch").is_none());
}

#[tokio::test]
async fn test_skill_search() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("skills@example.com").await;

    let resp = client
        .post(fixture.url("/resume/skills/search"))
        .json(&json!({ "query": "react" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let results = body["data"]["results"].as_array().unwrap();
    assert!(results.contains(&json!("React")));
    assert!(results.len() <= 15);
    assert_eq!(body["data"]["query"], "react");
    assert_eq!(body["data"]["count"], results.len());

    let resp = client
        .post(fixture.url("/resume/skills/search"))
        .json(&json!({ "query": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "EMPTY_QUERY");
}

#[tokio::test]
async fn test_skill_suggestions() {
    let fixture = TestFixture::new().await;
    let client = fixture.signed_in("suggest@example.com").await;

    let body: Value = client
        .get(fixture.url("/resume/skills/suggestions?jobTitle=UX%20Designer"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let suggestions = body["data"]["suggestions"].as_array().unwrap();
    assert!(suggestions.contains(&json!("Figma")));
    assert_eq!(body["data"]["count"], suggestions.len());
    assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 8);

    // No title and no past roles: general skills
    let body: Value = client
        .get(fixture.url("/resume/skills/suggestions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["suggestions"]
        .as_array()
        .unwrap()
        .contains(&json!("Communication")));

    // Past experience titles feed the suggestions
    let mut resume = minimal_resume("Data");
    resume["experience"] = json!([{
        "companyName": "Acme",
        "jobTitle": "Data Analyst",
        "startDate": "2020-01",
        "description": "Dashboards"
    }]);
    fixture.create_resume(&client, resume).await;

    let body: Value = client
        .get(fixture.url("/resume/skills/suggestions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["suggestions"]
        .as_array()
        .unwrap()
        .contains(&json!("Looker")));
}
