//! End-to-end tests of the HTTP client against a throwaway local server that
//! answers one request with a canned response.

use chrono::NaiveDate;
use menu_summarizer_rs::data_types::{MenuResponse, SubmitOutcome};
use menu_summarizer_rs::menu_form::MenuForm;
use menu_summarizer_rs::page::PageContext;
use menu_summarizer_rs::request_dispatcher::{submit_menu_form, HttpMenuClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one response and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        request
    });

    (base, handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn form(url: &str, date: &str) -> MenuForm {
    let mut form = MenuForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    form.set_url(url);
    form.set_date(date);
    form
}

#[tokio::test]
async fn posts_query_and_renders_menu() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"restaurant_name":"Bistro","date":"2024-05-01","day_of_week":"Wednesday","source_url":"https://example.com","cached":true,"menu_items":[{"category":"Soup","name":"Goulash","price":89,"weight":"300g","allergens":["1","9"]}]}"#,
    )
    .await;
    let client = HttpMenuClient::new(&base).unwrap();
    let mut page = PageContext::new();

    let outcome =
        submit_menu_form(&mut page, &form("https://example.com", "2024-05-01"), &client).await;

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/menu HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"url":"https://example.com","date":"2024-05-01"}"#));

    assert!(matches!(outcome, SubmitOutcome::Rendered(MenuResponse::Menu { .. })));
    let html = page.result_display.html();
    assert!(html.contains("<h2>Bistro <small>(z cache)</small></h2>"));
    assert!(html.contains("<span>300g | 89 Kč</span>"));
    assert_eq!(html.matches("class=\"badge\"").count(), 2);
    assert!(!page.loading_overlay.is_visible());
}

#[tokio::test]
async fn non_success_status_shows_server_error() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"error":"Invalid 'date' format. Use YYYY-MM-DD, DD.MM.YYYY or DD.MM."}"#,
    )
    .await;
    let client = HttpMenuClient::new(&base).unwrap();
    let mut page = PageContext::new();

    let outcome = submit_menu_form(&mut page, &form("https://example.com", "soon"), &client).await;
    server.await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::ApplicationError(
            "Invalid 'date' format. Use YYYY-MM-DD, DD.MM.YYYY or DD.MM.".into()
        )
    );
    assert!(page.result_display.is_empty());
    assert!(!page.loading_overlay.is_visible());
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let (base, server) = serve_once("500 Internal Server Error", "<h1>oops</h1>").await;
    let client = HttpMenuClient::new(&base).unwrap();
    let mut page = PageContext::new();

    let outcome =
        submit_menu_form(&mut page, &form("https://example.com", "2024-05-01"), &client).await;
    server.await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::TransportError(_)));
    assert!(page.error_display.text().starts_with("Fetch error: "));
    assert!(page.result_display.is_empty());
    assert!(!page.loading_overlay.is_visible());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // grab a free port, then close it again
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = HttpMenuClient::new(&base).unwrap();
    let mut page = PageContext::new();

    let outcome =
        submit_menu_form(&mut page, &form("https://example.com", "2024-05-01"), &client).await;

    assert!(matches!(outcome, SubmitOutcome::TransportError(_)));
    assert!(page.error_display.text().starts_with("Fetch error: "));
    assert!(!page.loading_overlay.is_visible());
}

#[tokio::test]
async fn health_check_reads_status() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"status":"ok","service":"restaurant-menu-summarizer"}"#,
    )
    .await;
    let client = HttpMenuClient::new(&format!("{}/", base)).unwrap();

    let health = client.check_health().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/health HTTP/1.1"));
    assert!(health.is_ok());
    assert_eq!(health.service.as_deref(), Some("restaurant-menu-summarizer"));
}
