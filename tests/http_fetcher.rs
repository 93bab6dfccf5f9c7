// tests/http_fetcher.rs
use legal_news_feed::ingest::config::HttpCfg;
use legal_news_feed::{FetchError, HttpFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned HTTP response on a loopback port; returns (url, request-head handle).
async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut head = Vec::new();
        loop {
            let n = sock.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        sock.write_all(response.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        String::from_utf8_lossy(&head).into_owned()
    });
    (format!("http://{addr}/feed.xml"), handle)
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::from_config(&HttpCfg {
        user_agent: "news-bot/1.0".into(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn success_returns_body_and_sends_user_agent() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Type: application/rss+xml\r\nContent-Length: 13\r\nConnection: close\r\n\r\n<rss></rss>\r\n",
    )
    .await;

    let body = fetcher().get_text(&url).await.unwrap();
    assert_eq!(body, "<rss></rss>\r\n");

    let head = server.await.unwrap().to_ascii_lowercase();
    assert!(head.contains("user-agent: news-bot/1.0"), "head was: {head}");
}

#[tokio::test]
async fn non_success_status_is_reported_with_url() {
    let (url, server) =
        serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;

    let err = fetcher().get_text(&url).await.unwrap_err();
    match &err {
        FetchError::Status { status, url: u } => {
            assert_eq!(*status, 404);
            assert_eq!(u, &url);
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(err.to_string(), format!("Fetch failed 404 for {url}"));
    server.await.unwrap();
}
