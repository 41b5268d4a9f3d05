//! End-to-end behaviour of the quotes routes, driven through `Router::dispatch`.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use quotes::{
    MemoryStore, Method, Quote, QuoteStore, QuotesApp, Request, Response, Router, Status,
    StoreError, StoreResult,
};
use serde_json::{Value, json};

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (QuotesApp::router(store.clone()), store)
}

async fn put_quote(app: &Router, body: Value) -> Response {
    app.dispatch(Request::builder(Method::Put, "/quotes").json(&body).build()).await
}

async fn get(app: &Router, path: &str) -> Response {
    app.dispatch(Request::builder(Method::Get, path).build()).await
}

fn location(res: &Response) -> String {
    res.header("location").expect("location header").to_owned()
}

#[tokio::test]
async fn yoda_round_trip() {
    let (app, _) = app();

    let res = put_quote(&app, json!({ "AttributedTo": "Yoda", "Text": "Do or do not." })).await;
    assert_eq!(res.status_code(), Status::Created);
    let path = location(&res);
    let id = path.strip_prefix("/quotes/").expect("redirect into /quotes/");
    assert!(!id.is_empty());

    let res = get(&app, &path).await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(
        res.body_json::<Value>().unwrap(),
        json!({ "ID": id, "AttributedTo": "Yoda", "Text": "Do or do not." })
    );
}

#[tokio::test]
async fn every_create_gets_a_fresh_id() {
    let (app, _) = app();
    let mut seen = HashSet::new();

    for n in 0..25 {
        let res = put_quote(&app, json!({ "AttributedTo": "Anon", "Text": format!("quote {n}") })).await;
        assert_eq!(res.status_code(), Status::Created);
        assert!(seen.insert(location(&res)), "duplicate id on create {n}");
    }
}

#[tokio::test]
async fn missing_fields_are_rejected_and_not_stored() {
    let (app, store) = app();

    for body in [
        json!({ "AttributedTo": "Yoda" }),
        json!({ "Text": "Do or do not." }),
        json!({ "AttributedTo": "", "Text": "Do or do not." }),
        json!({}),
    ] {
        let res = put_quote(&app, body.clone()).await;
        assert_eq!(res.status_code(), Status::BadRequest, "body {body}");
        assert_eq!(
            res.body_json::<Value>().unwrap(),
            json!({ "Error": "Required fields: AttributedTo, Text" })
        );
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn empty_body_is_a_validation_error() {
    let (app, store) = app();

    let res = app.dispatch(Request::builder(Method::Put, "/quotes").build()).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(res.body_json::<Value>().unwrap()["Error"], "Required fields: AttributedTo, Text");
    assert!(store.is_empty());
}

#[tokio::test]
async fn non_object_bodies_are_rejected_and_not_stored() {
    let (app, store) = app();

    for body in [json!(["Yoda", "Do or do not."]), json!("Do or do not."), json!(42)] {
        let res = put_quote(&app, body.clone()).await;
        assert_eq!(res.status_code(), Status::BadRequest, "body {body}");
        assert_eq!(
            res.body_json::<Value>().unwrap(),
            json!({ "Error": "Required fields: AttributedTo, Text" })
        );
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn unparseable_body_is_400_with_json_error() {
    let (app, store) = app();

    let res = app.dispatch(Request::builder(Method::Put, "/quotes").body("{\"Text\":").build()).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert!(res.body_json::<Value>().unwrap()["Error"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn unknown_id_is_bodyless_404() {
    let (app, _) = app();

    let res = get(&app, "/quotes/does-not-exist").await;
    assert_eq!(res.status_code(), Status::NotFound);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn list_contains_every_created_quote() {
    let (app, store) = app();
    store.put(Quote::new("Seeded", "already here")).await.unwrap();

    let mut created = Vec::new();
    for text in ["one", "two", "three"] {
        let res = put_quote(&app, json!({ "AttributedTo": "Test", "Text": text })).await;
        created.push(location(&res).trim_start_matches("/quotes/").to_owned());
    }

    let res = get(&app, "/quotes").await;
    assert_eq!(res.status_code(), Status::Ok);
    let listed: Vec<Quote> = res.body_json().unwrap();
    let ids: HashSet<&str> = listed.iter().map(|q| q.id.as_str()).collect();

    assert_eq!(listed.len(), 4);
    for id in &created {
        assert!(ids.contains(id.as_str()), "{id} missing from list");
    }
}

#[tokio::test]
async fn empty_list_is_an_empty_array() {
    let (app, _) = app();
    let res = get(&app, "/quotes").await;
    assert_eq!(res.body_json::<Value>().unwrap(), json!([]));
}

#[tokio::test]
async fn head_and_trailing_slash_reach_the_list() {
    let (app, store) = app();
    store.put(Quote::new("Yoda", "Do or do not.")).await.unwrap();

    let res = app.dispatch(Request::builder(Method::Head, "/quotes").build()).await;
    assert_eq!(res.status_code(), Status::Ok);

    let res = get(&app, "/quotes/").await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(res.body_json::<Vec<Quote>>().unwrap().len(), 1);
}

#[tokio::test]
async fn encoded_id_is_decoded_before_lookup() {
    let (app, store) = app();
    store
        .put(Quote { id: "a b".into(), attributed_to: "Yoda".into(), text: "Do or do not.".into() })
        .await
        .unwrap();

    let res = get(&app, "/quotes/a%20b").await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(res.body_json::<Quote>().unwrap().id, "a b");
}

#[tokio::test]
async fn root_reports_hostname() {
    let (app, _) = app();

    let res = get(&app, "/").await;
    assert_eq!(res.status_code(), Status::Ok);
    let body: Value = res.body_json().unwrap();
    assert!(body["Hostname"].is_string());
}

#[tokio::test]
async fn delete_is_not_routed() {
    let (app, store) = app();
    let quote = Quote::new("Yoda", "Do or do not.");
    let path = quote.location();
    store.put(quote).await.unwrap();

    let res = app.dispatch(Request::builder(Method::Delete, &path).build()).await;
    assert_eq!(res.status_code(), Status::MethodNotAllowed);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn health_endpoints() {
    let (app, _) = app();

    let res = get(&app, "/healthz").await;
    assert_eq!((res.status_code(), res.body()), (Status::Ok, &b"ok"[..]));

    let res = get(&app, "/readyz").await;
    assert_eq!((res.status_code(), res.body()), (Status::Ok, &b"ready"[..]));
}

// ── Failing store ─────────────────────────────────────────────────────────────

struct BrokenStore;

#[async_trait]
impl QuoteStore for BrokenStore {
    async fn list(&self) -> StoreResult<Vec<Quote>> {
        Err(StoreError::Backend("Requested resource not found".into()))
    }
    async fn put(&self, _quote: Quote) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get(&self, _id: &str) -> StoreResult<Option<Quote>> {
        Err(StoreError::Backend("Requested resource not found".into()))
    }
    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn broken_app() -> Router {
    QuotesApp::router(Arc::new(BrokenStore))
}

#[tokio::test]
async fn store_failures_are_500_with_message() {
    let app = broken_app();

    let res = get(&app, "/quotes").await;
    assert_eq!(res.status_code(), Status::InternalServerError);
    assert_eq!(res.body_json::<Value>().unwrap(), json!({ "Error": "Requested resource not found" }));

    let res = get(&app, "/quotes/abc").await;
    assert_eq!(res.status_code(), Status::InternalServerError);

    let res = put_quote(&app, json!({ "AttributedTo": "Yoda", "Text": "Do or do not." })).await;
    assert_eq!(res.status_code(), Status::InternalServerError);
    assert_eq!(
        res.body_json::<Value>().unwrap()["Error"],
        "store unavailable: connection refused"
    );
}

#[tokio::test]
async fn validation_wins_over_a_broken_store() {
    let res = put_quote(&broken_app(), json!({ "Text": "no author" })).await;
    assert_eq!(res.status_code(), Status::BadRequest);
}

#[tokio::test]
async fn readiness_fails_when_store_is_down() {
    let res = get(&broken_app(), "/readyz").await;
    assert_eq!(res.status_code(), Status::ServiceUnavailable);
    assert_eq!(
        res.body_json::<Value>().unwrap()["Error"],
        "store unavailable: connection refused"
    );
}
