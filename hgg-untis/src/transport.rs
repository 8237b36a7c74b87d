use std::future::Future;

use reqwest::{Client, StatusCode, Url};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: StatusCode,
  pub body: String,
}

impl HttpResponse {
  pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  pub fn is_ok(&self) -> bool {
    self.status == StatusCode::OK
  }
}

/// Performs GET requests against the upstream site.
///
/// An `Err` means no response was received at all (connection refused, broken body, ...).
/// Responses with any status code are returned as `Ok`.
pub trait Transport {
  fn get(&self, url: &Url) -> impl Future<Output = anyhow::Result<HttpResponse>> + Send;
}

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
  client: Client,
}

impl HttpTransport {
  pub fn new() -> Self {
    Self {
      client: Client::new(),
    }
  }
}

impl Transport for HttpTransport {
  async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse> {
    let response = self.client.get(url.clone()).send().await?;
    let status = response.status();
    // Untis exports Latin-1 without announcing a charset
    let body = response.text_with_charset("windows-1252").await?;

    debug!("Fetched {} with status {}", url, status);

    Ok(HttpResponse { status, body })
  }
}

#[cfg(test)]
mod test {
  use std::io::{Read, Write};
  use std::net::TcpListener;
  use std::thread;

  use super::*;

  /// Answers a single request with `content_type` and the raw `body`.
  fn serve_once(content_type: &'static str, body: Vec<u8>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    thread::spawn(move || {
      let (mut stream, _) = listener.accept().unwrap();

      let mut request = Vec::new();
      let mut buffer = [0; 1024];
      while !request.ends_with(b"\r\n\r\n") {
        let read = stream.read(&mut buffer).unwrap();
        if read == 0 {
          break;
        }
        request.extend_from_slice(&buffer[..read]);
      }

      let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        content_type,
        body.len()
      );
      stream.write_all(head.as_bytes()).unwrap();
      stream.write_all(&body).unwrap();
    });

    Url::parse(&format!("http://{address}/frames/navbar.htm")).unwrap()
  }

  #[tokio::test]
  async fn decodes_latin1_without_charset() -> anyhow::Result<()> {
    let url = serve_once("text/html", b"<title>Markgr\xf6ningen</title>".to_vec());

    let response = HttpTransport::new().get(&url).await?;

    assert!(response.is_ok());
    assert_eq!(response.body, "<title>Markgröningen</title>");

    Ok(())
  }

  #[tokio::test]
  async fn honors_announced_charset() -> anyhow::Result<()> {
    let url = serve_once(
      "text/html; charset=utf-8",
      "<title>Markgröningen</title>".as_bytes().to_vec(),
    );

    let response = HttpTransport::new().get(&url).await?;

    assert_eq!(response.body, "<title>Markgröningen</title>");

    Ok(())
  }
}
