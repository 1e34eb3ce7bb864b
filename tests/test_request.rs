use keel::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_default_keeps_alive() {
    let req = Request::default();

    assert_eq!(req.method, Method::GET);
    assert!(req.keep_alive);
    assert!(req.path.is_empty());
    assert!(req.params.is_empty());
    assert!(req.body.is_empty());
}

#[test]
fn test_request_param_retrieval() {
    let mut params = HashMap::new();
    params.insert("name".to_string(), "Ada".to_string());

    let req = Request {
        path: "greet".to_string(),
        query: "name=Ada".to_string(),
        params,
        ..Request::default()
    };

    assert_eq!(req.param("name"), Some("Ada"));
    assert_eq!(req.param("missing"), None);
}

#[test]
fn test_request_builder() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("chat")
        .param("user", "Bob")
        .body(b"user=Bob".to_vec())
        .keep_alive(false)
        .build()
        .unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "chat");
    assert_eq!(req.param("user"), Some("Bob"));
    assert_eq!(req.body, b"user=Bob".to_vec());
    assert!(!req.keep_alive);
}

#[test]
fn test_request_builder_requires_path() {
    let result = RequestBuilder::new().method(Method::GET).build();

    assert!(result.is_err());
}

#[test]
fn test_request_body_text_is_lossy() {
    let req = RequestBuilder::new()
        .path("upload")
        .body(vec![b'o', b'k', 0xff])
        .build()
        .unwrap();

    assert_eq!(req.body_text(), "ok\u{fffd}");
}

#[test]
fn test_request_method_equality() {
    assert_eq!(Method::GET, Method::GET);
    assert_ne!(Method::GET, Method::POST);
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("get"), None); // Case-sensitive
}

#[test]
fn test_request_method_display() {
    assert_eq!(Method::POST.to_string(), "POST");
    assert_eq!(Method::OPTIONS.as_str(), "OPTIONS");
}
