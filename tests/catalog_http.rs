//! Open Library client against a local HTTP listener.

use shelfscout::catalog::{Catalog, CatalogError, OpenLibraryCatalog};
use shelfscout::state::SearchQuery;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What: Serve exactly one HTTP response and report the request line.
///
/// Inputs:
/// - `status`: Status line suffix such as `200 OK`.
/// - `body`: Response body.
///
/// Output:
/// - Endpoint URL and a handle resolving to the first request line.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 4096];
        let n = sock.read(&mut buf).await.expect("read");
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(response.as_bytes()).await.expect("write");
        let _ = sock.shutdown().await;
        request.lines().next().unwrap_or_default().to_string()
    });
    (format!("http://{addr}/search.json"), handle)
}

fn query(title: &str, page: u32) -> SearchQuery {
    SearchQuery {
        title: title.to_string(),
        page,
        page_size: 20,
    }
}

#[tokio::test]
/// What: A successful response decodes into a page and the request carries the parameters.
async fn fetches_and_decodes_page() {
    let body = r#"{"numFound": 2, "docs": [
        {"key": "/works/OL1W", "title": "Dune", "author_name": ["Frank Herbert"], "first_publish_year": 1965, "cover_i": 42},
        {"title": "No key"}
    ]}"#;
    let (endpoint, server) = serve_once("200 OK", body).await;
    let catalog = OpenLibraryCatalog::new(endpoint).expect("client");
    let page = catalog.search(&query("dune messiah", 3)).await.expect("page");
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "/works/OL1W");
    assert_eq!(page.items[0].cover_image_id, Some(42));

    let request_line = server.await.expect("server");
    assert!(request_line.starts_with("GET /search.json?title=dune%20messiah&page=3&limit=20"));
}

#[tokio::test]
/// What: Non-success statuses and malformed bodies map to the matching errors.
async fn maps_status_and_decode_failures() {
    let (endpoint, server) = serve_once("503 Service Unavailable", "busy").await;
    let catalog = OpenLibraryCatalog::new(endpoint).expect("client");
    assert_eq!(
        catalog.search(&query("dune", 1)).await,
        Err(CatalogError::Status(503))
    );
    server.await.expect("server");

    let (endpoint, server) = serve_once("200 OK", "<html>").await;
    let catalog = OpenLibraryCatalog::new(endpoint).expect("client");
    assert!(matches!(
        catalog.search(&query("dune", 1)).await,
        Err(CatalogError::Decode(_))
    ));
    server.await.expect("server");
}

#[tokio::test]
/// What: An unreachable endpoint is a network error.
async fn unreachable_endpoint_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let catalog = OpenLibraryCatalog::new(format!("http://{addr}/search.json")).expect("client");
    assert!(matches!(
        catalog.search(&query("dune", 1)).await,
        Err(CatalogError::Network(_))
    ));
}
