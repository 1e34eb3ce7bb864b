use keel::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NoContent.as_u16(), 204);
    assert_eq!(StatusCode::SeeOther.as_u16(), 303);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::PayloadTooLarge.as_u16(), 413);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::SeeOther.reason_phrase(), "See Other");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(StatusCode::PayloadTooLarge.reason_phrase(), "Payload Too Large");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_custom_status_code() {
    let found = StatusCode::Custom(302, "Found");
    assert_eq!(found.as_u16(), 302);
    assert_eq!(found.reason_phrase(), "Found");
    assert!(!found.is_error());

    let unavailable = StatusCode::Custom(503, "Service Unavailable");
    assert_eq!(unavailable.as_u16(), 503);
    assert!(unavailable.is_error());
}

#[test]
fn test_status_code_is_error() {
    assert!(!StatusCode::Ok.is_error());
    assert!(!StatusCode::SeeOther.is_error());
    assert!(StatusCode::BadRequest.is_error());
    assert!(StatusCode::NotFound.is_error());
    assert!(StatusCode::InternalServerError.is_error());
}

#[test]
fn test_response_default() {
    let response = Response::default();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.status_text(), "OK");
    assert_eq!(response.content_type, "text/html");
    assert!(response.body.is_empty());
    assert!(response.headers.is_empty());
    assert!(response.keep_alive);
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content_type("text/plain")
        .header("X-Custom", "value")
        .header("X-Custom", "replaced")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.content_type, "text/plain");
    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.headers.get("X-Custom").unwrap(), "replaced");
}

#[test]
fn test_response_builder_keep_alive() {
    let response = ResponseBuilder::new(StatusCode::Ok).keep_alive(false).build();

    assert!(!response.keep_alive);
}

#[test]
fn test_response_text_helper() {
    let response = Response::text("plain");

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.content_type, "text/plain");
    assert_eq!(response.body, b"plain".to_vec());
}

#[test]
fn test_response_redirect_helper() {
    let response = Response::redirect("/chat");

    assert_eq!(response.status, StatusCode::SeeOther);
    assert_eq!(response.headers.get("Location").unwrap(), "/chat");
    assert!(response.body.is_empty());
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"<h1>404: File Not Found</h1>".to_vec());
}

#[test]
fn test_response_payload_too_large_closes() {
    let response = Response::payload_too_large();

    assert_eq!(response.status, StatusCode::PayloadTooLarge);
    assert_eq!(response.content_type, "text/plain");
    assert!(!response.keep_alive);
}

#[test]
fn test_response_internal_error_helper() {
    let response = Response::internal_error();

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.body, b"500 Internal Server Error".to_vec());
}
