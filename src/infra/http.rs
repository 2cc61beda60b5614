//! `HttpTransport` over reqwest, driven by a current-thread tokio runtime.

use std::fmt;

use reqwest::{header::COOKIE, Method, Url};
use tokio::runtime::{Builder, Runtime};

use crate::{
    domain::request::{HttpMethod, HttpRequest, HttpResponse},
    infra::{config::ServerConfig, error::AppError},
    usecases::contracts::{HttpTransport, TransportError},
};

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    session_cookie: Option<String>,
    runtime: Runtime,
}

impl ReqwestTransport {
    pub fn new(config: &ServerConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| AppError::HttpClientInit(error.to_string()))?;

        Self::with_client(config, client)
    }

    pub fn with_client(config: &ServerConfig, client: reqwest::Client) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.base_url).map_err(|error| AppError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: error.to_string(),
        })?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| AppError::HttpClientInit(error.to_string()))?;

        Ok(Self {
            client,
            base_url,
            session_cookie: config.session_cookie.clone(),
            runtime,
        })
    }

    /// Relative paths resolve against the server base url; absolute urls pass through.
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(url)
            .map_err(|_| TransportError::InvalidUrl(url.to_owned()))
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("session_cookie", &self.session_cookie.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(&request.url)?;
        tracing::debug!(method = request.method.as_str(), url = %url, "http request");

        let mut builder = self.client.request(method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        self.runtime.block_on(async move {
            let response = builder
                .send()
                .await
                .map_err(|error| TransportError::Network(error.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|error| TransportError::Network(error.to_string()))?;

            Ok(HttpResponse { status, body })
        })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        sync::mpsc,
        thread,
    };

    use super::*;
    use crate::{
        domain::request::RequestOptions, test_support::RecordingToasts,
        usecases::fetch_json::fetch_json,
    };

    /// Serves one canned response and hands back the raw request head.
    fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let address = listener.local_addr().expect("local addr");
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut head = Vec::new();
            let mut buffer = [0_u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut buffer).expect("read request");
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buffer[..read]);
            }
            stream.write_all(response.as_bytes()).expect("write response");
            let _ = sender.send(String::from_utf8_lossy(&head).into_owned());
        });

        (format!("http://{address}"), receiver)
    }

    fn transport(base_url: &str, cookie: Option<&str>) -> ReqwestTransport {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client must build");

        ReqwestTransport::with_client(
            &ServerConfig {
                base_url: base_url.to_owned(),
                session_cookie: cookie.map(str::to_owned),
            },
            client,
        )
        .expect("transport must build")
    }

    #[test]
    fn joins_relative_path_and_sends_session_cookie() {
        let (base_url, request) = serve_once("200 OK", "[]");
        let transport = transport(&base_url, Some("session=abc"));

        let response = transport
            .execute(&HttpRequest::get("/chat/api/messages/3"))
            .expect("request must succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "[]");
        let head = request.recv().expect("request head").to_ascii_lowercase();
        assert!(head.starts_with("get /chat/api/messages/3 http/1.1"));
        assert!(head.contains("cookie: session=abc"));
    }

    #[test]
    fn bad_request_reaches_fetch_json_as_server_message() {
        let (base_url, _request) = serve_once("400 Bad Request", r#"{"error":"bad request"}"#);
        let transport = transport(&base_url, None);
        let mut toasts = RecordingToasts::default();

        let err = fetch_json(&transport, &mut toasts, "/api/x", &RequestOptions::default())
            .expect_err("must fail");

        assert_eq!(err.to_string(), "bad request");
        assert_eq!(toasts.shown.len(), 1);
    }

    #[test]
    fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let address = listener.local_addr().expect("local addr");
        drop(listener);
        let transport = transport(&format!("http://{address}"), None);

        let err = transport
            .execute(&HttpRequest::get("/"))
            .expect_err("must fail");

        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ReqwestTransport::new(&ServerConfig {
            base_url: "not a url".to_owned(),
            session_cookie: None,
        })
        .expect_err("must fail");

        assert!(matches!(err, AppError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_output_hides_cookie() {
        let transport = transport("http://127.0.0.1:5000", Some("session=secret"));

        assert!(!format!("{transport:?}").contains("secret"));
    }
}
