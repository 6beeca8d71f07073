//! End-to-end tests for the request logging middleware.

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower::{service_fn, Layer, ServiceExt};

use request_logger::access_log::{LogFormat, LogRecord};
use request_logger::http::{recorder_middleware, RequestContext, RequestLoggerLayer};

mod common;

const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[1;33m";
const RED: &str = "\x1b[0;31m";

#[tokio::test]
async fn test_text_line_for_successful_request() {
    let (logger, sink) = common::memory_logger(LogFormat::Text);
    let app = common::app(logger, StatusCode::OK);

    let res = app
        .oneshot(common::get("/foo?x=1", Some("curl/7.0")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.starts_with(&format!("{}200\x1b[0m \x1b[36;1m", GREEN)), "{:?}", line);
    assert!(line.contains("ms\x1b[0m GET /foo?x=1 \x1b[1;30m \"curl/7.0\"\x1b[0m"), "{:?}", line);
}

#[tokio::test]
async fn test_json_line_for_successful_request() {
    let (logger, sink) = common::memory_logger(LogFormat::Json);
    let app = common::app(logger, StatusCode::OK);

    app.oneshot(common::get("/foo?x=1", Some("curl/7.0")))
        .await
        .unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.contains(r#""StatusCode":200"#));
    assert!(line.contains(r#""HttpMethod":"GET""#));
    assert!(line.contains(r#""RequestURI":"/foo?x=1""#));
    assert!(line.contains(r#""UserAgent":"curl/7.0""#));
    assert!(line.contains(r#""RemoteUser":"""#));

    let record: LogRecord = serde_json::from_str(line).unwrap();
    assert_eq!(record.status_code, 200);
    assert_eq!(record.http_method, "GET");
    assert_eq!(record.request_uri, "/foo?x=1");
    assert_eq!(record.remote_user, "");
    assert_eq!(record.user_agent, "curl/7.0");
}

#[tokio::test]
async fn test_status_colors() {
    for (status, color) in [
        (StatusCode::NOT_FOUND, YELLOW),
        (StatusCode::SERVICE_UNAVAILABLE, RED),
        (StatusCode::MOVED_PERMANENTLY, GREEN),
    ] {
        let (logger, sink) = common::memory_logger(LogFormat::Text);
        let app = common::app(logger, status);

        let res = app.oneshot(common::get("/anything", None)).await.unwrap();
        assert_eq!(res.status(), status);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(
            lines[0].starts_with(&format!("{}{}\x1b[0m", color, status.as_u16())),
            "{:?}",
            lines[0]
        );
    }
}

#[tokio::test]
async fn test_handler_invoked_once() {
    let (logger, sink) = common::memory_logger(LogFormat::Text);
    let calls = Arc::new(AtomicUsize::new(0));
    let app = common::counting_app(logger, StatusCode::OK, calls.clone());

    for _ in 0..3 {
        app.clone()
            .oneshot(common::get("/once", None))
            .await
            .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(sink.lines().len(), 3);
}

#[tokio::test]
async fn test_remote_user_from_inner_layer() {
    let (logger, sink) = common::memory_logger(LogFormat::Json);
    let app = Router::new()
        .route("/private", get(|| async { "secret" }))
        .layer(middleware::from_fn(recorder_middleware))
        .layer(middleware::from_fn(common::fake_auth))
        .layer(RequestLoggerLayer::new(logger));

    app.oneshot(common::get("/private", None)).await.unwrap();

    let record: LogRecord = serde_json::from_str(&sink.lines()[0]).unwrap();
    assert_eq!(record.remote_user, "alice");
    assert_eq!(record.user_agent, "");
}

#[tokio::test]
async fn test_missing_recorder_drops_record() {
    let (logger, sink) = common::memory_logger(LogFormat::Text);
    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .layer(RequestLoggerLayer::new(logger));

    let res = app.oneshot(common::get("/", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn test_wraps_plain_tower_service() {
    let (logger, sink) = common::memory_logger(LogFormat::Text);
    let inner = service_fn(|req: Request<Body>| async move {
        if let Some(ctx) = req.extensions().get::<RequestContext>() {
            ctx.set_status_code(418);
            ctx.set_elapsed(Duration::from_nanos(1_239_999));
        }
        Ok::<_, Infallible>(Response::new(Body::empty()))
    });
    let svc = RequestLoggerLayer::new(logger).layer(inner);

    let req = Request::builder()
        .method("DELETE")
        .uri("/teapot?brew=no")
        .body(Body::empty())
        .unwrap();
    svc.oneshot(req).await.unwrap();

    assert_eq!(
        sink.lines(),
        vec![format!(
            "{}418\x1b[0m \x1b[36;1m1.23ms\x1b[0m DELETE /teapot?brew=no \x1b[1;30m \"\"\x1b[0m",
            YELLOW
        )]
    );
}

#[tokio::test]
async fn test_concurrent_requests_each_logged_once() {
    let (logger, sink) = common::memory_logger(LogFormat::Json);
    let app = common::app(logger, StatusCode::OK);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                app.oneshot(common::get(&format!("/req/{}", i), None))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for h in handles {
        h.await.unwrap();
    }

    let mut uris: Vec<String> = sink
        .lines()
        .iter()
        .map(|l| serde_json::from_str::<LogRecord>(l).unwrap().request_uri)
        .collect();
    uris.sort();
    let mut expected: Vec<String> = (0..16).map(|i| format!("/req/{}", i)).collect();
    expected.sort();
    assert_eq!(uris, expected);
}
