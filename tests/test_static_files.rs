use keel::http::response::StatusCode;
use keel::static_files::StaticFiles;
use std::fs;
use tempfile::TempDir;

fn site() -> (TempDir, StaticFiles) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(dir.path().join("style.css"), "body {}").unwrap();
    fs::create_dir(dir.path().join("img")).unwrap();
    fs::write(dir.path().join("img/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::write(dir.path().join("notes"), "plain").unwrap();

    let files = StaticFiles::new(dir.path(), "public");
    (dir, files)
}

#[test]
fn test_root_is_the_configured_directory() {
    let (dir, files) = site();

    assert_eq!(files.root(), dir.path());
}

#[tokio::test]
async fn test_serves_file_with_mime_type() {
    let (_dir, files) = site();

    let response = files.serve("style.css").await;
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.content_type, "text/css");
    assert_eq!(response.body, b"body {}".to_vec());

    let response = files.serve("img/logo.png").await;
    assert_eq!(response.content_type, "image/png");
    assert_eq!(response.body, vec![0x89, b'P', b'N', b'G']);

    let response = files.serve("notes").await;
    assert_eq!(response.content_type, "text/plain");
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let (_dir, files) = site();

    let response = files.serve("missing.html").await;
    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"<h1>404: File Not Found</h1>".to_vec());
}

#[tokio::test]
async fn test_directory_is_not_listed() {
    let (_dir, files) = site();

    let response = files.serve("img").await;
    assert_eq!(response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_traversal_is_forbidden() {
    let (_dir, files) = site();

    for path in ["../../etc/passwd", "img/../../secret", "..", "a..b"] {
        let response = files.serve(path).await;
        assert_eq!(response.status, StatusCode::Forbidden, "path {path}");
    }
}

#[tokio::test]
async fn test_absolute_path_is_forbidden() {
    let (_dir, files) = site();

    let response = files.serve("/etc/passwd").await;
    assert_eq!(response.status, StatusCode::Forbidden);
}

#[test]
fn test_normalize_index_and_prefix() {
    let files = StaticFiles::new("unused", "public");

    assert_eq!(files.normalize(""), "index.html");
    assert_eq!(files.normalize("/"), "index.html");
    assert_eq!(files.normalize("public"), "index.html");
    assert_eq!(files.normalize("public/"), "index.html");
    assert_eq!(files.normalize("public/style.css"), "style.css");
    assert_eq!(files.normalize("style.css"), "style.css");
    assert_eq!(files.normalize("publicity.html"), "publicity.html");
    assert_eq!(files.normalize("greet"), "greet");
}
