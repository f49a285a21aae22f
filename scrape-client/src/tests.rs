#[cfg(test)]
mod tests {
    use crate::{api, ScrapeBackend, ScrapeClient};
    use moodscope_core::{AppConfig, ConfigError, CoreError, ScrapeRequest};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;
    use url::Url;

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Accepts one connection, answers with `status_line` and hands back the
    /// raw request text.
    async fn serve_once(status_line: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                status_line
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        let url = Url::parse(&format!("http://{}/scrape_comments", addr)).unwrap();
        (url, handle)
    }

    fn client_for(url: Url) -> ScrapeClient {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        ScrapeClient::with_endpoint(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_scrape_sends_raw_inputs() {
        let (url, server) = serve_once("200 OK").await;
        let client = client_for(url);

        let request = ScrapeRequest::new("health,fitness", "5");
        let result = client.submit(request).await;
        assert!(result.is_ok());

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /scrape_comments HTTP/1.1"));
        assert!(raw.to_lowercase().contains("content-type: application/json"));
        let body = raw.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "subreddits": "health,fitness", "numPosts": "5" })
        );
    }

    #[tokio::test]
    async fn test_any_2xx_is_success() {
        let (url, server) = serve_once("204 No Content").await;
        let client = client_for(url);

        let status = client
            .scrape_comments(&ScrapeRequest::new("a", "1"))
            .await
            .unwrap();
        assert_eq!(status.as_u16(), 204);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_request_failure() {
        let (url, server) = serve_once("500 Internal Server Error").await;
        let client = client_for(url);

        let result = client.submit(ScrapeRequest::new("a", "1")).await;
        match result {
            Err(CoreError::RequestFailed {
                message,
                status_code,
            }) => {
                assert_eq!(message, api::NOT_OK_MESSAGE);
                assert_eq!(status_code, Some(500));
            }
            other => panic!("Expected RequestFailed error, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[test]
    fn test_connection_refused_is_network_error() {
        let result = tokio_test::block_on(async {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let url = Url::parse(&format!("http://{}/scrape_comments", addr)).unwrap();
            client_for(url).submit(ScrapeRequest::new("a", "1")).await
        });
        assert!(matches!(result, Err(CoreError::Network(_))));
    }

    #[tokio::test]
    async fn test_slow_backend_is_not_cut_off() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(2)).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
            let _ = socket.shutdown().await;
        });

        // answer arrives well after the connect limit
        let url = Url::parse(&format!("http://{}/scrape_comments", addr)).unwrap();
        let client = ScrapeClient::with_endpoint(url, Duration::from_millis(500)).unwrap();
        let result = client.submit(ScrapeRequest::new("a,b,c", "2")).await;
        assert!(result.is_ok(), "{:?}", result);
        server.await.unwrap();
    }

    #[test]
    fn test_client_from_config() {
        let config = AppConfig {
            backend_url: "http://scraper.local:8080".to_string(),
            ..Default::default()
        };
        let client = ScrapeClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://scraper.local:8080/scrape_comments"
        );

        let bad = AppConfig {
            backend_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ScrapeClient::new(&bad),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
