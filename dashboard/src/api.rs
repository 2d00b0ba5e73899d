//! Greeting endpoint client

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GreetingResponse {
    pub greeting: String,
    pub name: String,
}

impl GreetingResponse {
    pub fn display(&self) -> String {
        format!("{}, {}!", self.greeting, self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("greeting request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("greeting endpoint returned HTTP {0}")]
    Status(u16),
}

/// Fetch the greeting text from `url`
pub async fn fetch_greeting(client: &reqwest::Client, url: &str) -> Result<String, ApiError> {
    tracing::debug!(%url, "Fetching greeting");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }

    let body: GreetingResponse = response.json().await?;
    Ok(body.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port, returning its URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{}/api/greeting", addr)
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_display() {
        let body: GreetingResponse =
            serde_json::from_str(r#"{"greeting":"Hello","name":"Ada"}"#).unwrap();

        assert_eq!(body.display(), "Hello, Ada!");
    }

    #[tokio::test]
    async fn test_fetch_greeting() {
        let url = serve_once("200 OK", r#"{"greeting":"Hi","name":"Grace"}"#).await;

        let text = fetch_greeting(&client(), &url).await.unwrap();

        assert_eq!(text, "Hi, Grace!");
    }

    #[tokio::test]
    async fn test_fetch_greeting_status_error() {
        let url = serve_once("503 Service Unavailable", "{}").await;

        let err = fetch_greeting(&client(), &url).await.unwrap_err();

        assert!(matches!(err, ApiError::Status(503)));
    }
}
