use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use reelmood::api::{self, AppState};
use reelmood::completion::{CompletionError, CompletionService};
use reelmood::db::Database;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Completion service that always gives the same answer and counts calls
struct CannedCompletion {
    reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl CannedCompletion {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for CannedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Some(reply) => Ok(reply.to_string()),
            None => Err(CompletionError::Api {
                status: 503,
                body: "upstream unavailable".into(),
            }),
        }
    }
}

async fn memory_db() -> Arc<Database> {
    let db = Database::new(":memory:").unwrap();
    db.create_schema().await.unwrap();
    Arc::new(db)
}

async fn post_review(
    completion: Arc<CannedCompletion>,
    db: Arc<Database>,
    body: Value,
) -> (StatusCode, Value) {
    let state = web::Data::new(AppState {
        completion,
        store: db,
    });
    let app = test::init_service(App::new().app_data(state).configure(api::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/analyze")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn praise_is_stored_and_returned() {
    let completion = CannedCompletion::replying(
        r#"{"sentiment":"Positive","explanation":"Strong praise language."}"#,
    );
    let db = memory_db().await;

    let (status, body) = post_review(
        completion.clone(),
        db.clone(),
        json!({ "review": "This movie was an absolute masterpiece, the acting was incredible!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Positive");
    assert_eq!(body["explanation"], "Strong praise language.");
    assert_eq!(
        body["reviewText"],
        "This movie was an absolute masterpiece, the acting was incredible!"
    );

    let id = body["id"].as_str().unwrap();
    let stored = db.get_review(id).await.unwrap().unwrap();
    assert_eq!(stored.explanation, "Strong praise language.");
    assert_eq!(completion.calls(), 1);
}

#[actix_web::test]
async fn short_review_is_a_client_error() {
    let completion = CannedCompletion::unreachable();
    let db = memory_db().await;

    let (status, body) = post_review(completion.clone(), db.clone(), json!({ "review": "short" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Review text must be at least 10 characters long." }));
    assert_eq!(completion.calls(), 0);
    assert_eq!(db.count_reviews().await.unwrap(), 0);
}

#[actix_web::test]
async fn missing_or_non_string_review_is_a_client_error() {
    for payload in [json!({}), json!({ "review": 42 }), json!(["review"])] {
        let completion = CannedCompletion::unreachable();
        let (status, body) = post_review(completion.clone(), memory_db().await, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(completion.calls(), 0);
    }
}

#[actix_web::test]
async fn prose_reply_is_a_server_error() {
    let completion =
        CannedCompletion::replying("I believe the reviewer really enjoyed this film overall.");
    let db = memory_db().await;

    let (status, body) = post_review(
        completion,
        db.clone(),
        json!({ "review": "The soundtrack alone is worth the ticket." }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "The AI failed to generate a valid response." }));
    assert_eq!(db.count_reviews().await.unwrap(), 0);
}

#[actix_web::test]
async fn unknown_category_is_a_server_error() {
    let completion = CannedCompletion::replying(
        r#"{"sentiment":"Mixed","explanation":"Great visuals but a weak plot."}"#,
    );
    let db = memory_db().await;

    let (status, body) = post_review(
        completion,
        db.clone(),
        json!({ "review": "Great visuals but the plot made no sense." }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "The AI response was missing required fields." }));
    assert_eq!(db.count_reviews().await.unwrap(), 0);
}

#[actix_web::test]
async fn upstream_failure_hides_the_cause() {
    let completion = CannedCompletion::unreachable();
    let db = memory_db().await;

    let (status, body) = post_review(
        completion.clone(),
        db.clone(),
        json!({ "review": "A quiet, thoughtful drama about grief." }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "An internal server error occurred." }));
    assert_eq!(completion.calls(), 1);
    assert_eq!(db.count_reviews().await.unwrap(), 0);
}

#[actix_web::test]
async fn repeated_submissions_create_separate_records() {
    let completion = CannedCompletion::replying(
        "```json\n{\"sentiment\":\"Neutral\",\"explanation\":\"A factual statement.\"}\n```",
    );
    let db = memory_db().await;
    let review = json!({ "review": "The film runs for two hours and ten minutes." });

    let (_, first) = post_review(completion.clone(), db.clone(), review.clone()).await;
    let (_, second) = post_review(completion.clone(), db.clone(), review).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(db.count_reviews().await.unwrap(), 2);
    assert_eq!(completion.calls(), 2);
}

#[actix_web::test]
async fn unreadable_body_is_a_generic_server_error() {
    let db = memory_db().await;
    let state = web::Data::new(AppState {
        completion: CannedCompletion::unreachable(),
        store: db,
    });
    let app = test::init_service(App::new().app_data(state).configure(api::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/analyze")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "An internal server error occurred." }));
}

#[actix_web::test]
async fn oversized_body_is_a_generic_json_error() {
    let completion = CannedCompletion::unreachable();
    let db = memory_db().await;
    let review = "a".repeat(300_000);

    let (status, body) = post_review(completion.clone(), db.clone(), json!({ "review": review })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "An internal server error occurred." }));
    assert_eq!(completion.calls(), 0);
    assert_eq!(db.count_reviews().await.unwrap(), 0);
}
