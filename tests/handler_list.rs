mod common;

use common::{SECRET, TestApp, TestOptions};
use serde_json::json;

fn seeded() -> TestApp {
    let app = TestApp::new(TestOptions::with_auth());
    app.write_link("zeta", "https://z.example/\n");
    app.write_link("alpha", "  https://a.example/");
    app.write_link(".root", "https://home.example/");
    app.write_link(".fallback", "https://fallback.example/");
    std::fs::create_dir(app.dir.path().join(".notify")).unwrap();
    app
}

#[tokio::test]
async fn test_list_json_sorted_without_special_codes() {
    let app = seeded();

    let response = app
        .server
        .get("/.list")
        .add_query_param("json", "")
        .add_query_param("auth", SECRET)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!([
            { "code": "alpha", "target": "https://a.example/" },
            { "code": "zeta", "target": "https://z.example/" },
        ])
    );
}

#[tokio::test]
async fn test_list_json_via_accept_header() {
    let app = seeded();

    let response = app
        .server
        .get("/.list")
        .add_header("accept", "application/json")
        .add_header("auth", SECRET)
        .await;

    assert_eq!(response.status_code(), 200);
    let links = response.json::<serde_json::Value>();
    assert_eq!(links.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_list_json_empty_is_array() {
    let app = TestApp::new(TestOptions::with_auth());

    let response = app
        .server
        .get("/.list")
        .add_query_param("json", "1")
        .add_query_param("auth", SECRET)
        .await;

    assert_eq!(response.json::<serde_json::Value>(), json!([]));
}

#[tokio::test]
async fn test_list_text() {
    let app = seeded();

    let response = app
        .server
        .get("/.list")
        .add_query_param("auth", SECRET)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.text(),
        "alpha\nhttps://a.example/\n\nzeta\nhttps://z.example/\n\n"
    );
}

#[tokio::test]
async fn test_list_wrong_auth() {
    let app = seeded();

    let response = app
        .server
        .get("/.list")
        .add_query_param("auth", "wrong")
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.text(), "401 - wrong auth key\n");
}

#[tokio::test]
async fn test_list_missing_auth() {
    let app = seeded();

    let response = app.server.get("/.list").await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_list_disabled_without_secret() {
    let app = TestApp::new(TestOptions::default());
    app.write_link("alpha", "https://a.example/");

    let response = app
        .server
        .get("/.list")
        .add_query_param("auth", "anything")
        .await;

    assert_eq!(response.status_code(), 403);
    assert!(!response.text().contains("a.example"));
}

#[tokio::test]
async fn test_list_reports_unreadable_targets_inline() {
    let app = TestApp::new(TestOptions::with_auth());
    app.write_link("good", "https://ok.example/");
    std::fs::write(app.dir.path().join("bad"), [0xff, 0xfe]).unwrap();

    let response = app
        .server
        .get("/.list")
        .add_query_param("auth", SECRET)
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.starts_with("bad\nread error: "));
    assert!(body.ends_with("good\nhttps://ok.example/\n\n"));
}
