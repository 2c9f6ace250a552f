//! HTTP transport implementation
//!
//! Wraps reqwest and implements the Transport trait from gf-core.

use async_trait::async_trait;
use url::Url;

use gf_core::{Envelope, Error, Form, Multipart, Part, Result, Transport};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh reqwest client
    pub fn new() -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    async fn send_raw(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            tracing::debug!(%status, "Service answered with a non-success HTTP status");
        }
        Ok(body)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope> {
        let body = self.send_raw(request).await?;
        parse_envelope(&body).inspect_err(|_| {
            let preview: String = body.chars().take(200).collect();
            tracing::debug!(body = %preview, "Response body is not an envelope");
        })
    }
}

fn network_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::Transport(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

/// Only plain and TLS http are served by the API
fn check_url(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        "http" | "https" => Err(Error::Transport(format!("URL has no host: {url}"))),
        scheme => Err(Error::Transport(format!(
            "unsupported URL scheme '{scheme}' in {url}"
        ))),
    }
}

/// Parse a response body as an envelope, whatever the HTTP status was
pub fn parse_envelope(body: &str) -> Result<Envelope> {
    Ok(serde_json::from_str(body)?)
}

fn multipart_form(body: Multipart) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in body.into_parts() {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File {
                name,
                file_name,
                content,
            } => {
                let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
                let part = reqwest::multipart::Part::bytes(content)
                    .file_name(file_name)
                    .mime_str(mime.essence_str())
                    .map_err(|e| Error::InvalidArgument(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Envelope> {
        check_url(url)?;
        tracing::debug!(method = "GET", %url, "Sending request");
        self.send(self.inner.get(url.clone())).await
    }

    async fn get_raw(&self, url: &Url) -> Result<String> {
        check_url(url)?;
        tracing::debug!(method = "GET", %url, "Sending raw request");
        self.send_raw(self.inner.get(url.clone())).await
    }

    async fn put_form(&self, url: &Url, form: Form) -> Result<Envelope> {
        if form.is_empty() {
            return Err(Error::InvalidArgument("No form data provided".into()));
        }
        check_url(url)?;
        tracing::debug!(method = "PUT", %url, "Sending request");
        let request = self.inner.put(url.clone()).form(form.fields());
        self.send(request).await
    }

    async fn delete_form(&self, url: &Url, form: Form) -> Result<Envelope> {
        if form.is_empty() {
            return Err(Error::InvalidArgument("No form data provided".into()));
        }
        check_url(url)?;
        tracing::debug!(method = "DELETE", %url, "Sending request");
        let request = self.inner.delete(url.clone()).form(form.fields());
        self.send(request).await
    }

    async fn post_multipart(&self, url: &Url, body: Multipart) -> Result<Envelope> {
        if body.is_empty() {
            return Err(Error::InvalidArgument("No form data provided".into()));
        }
        check_url(url)?;
        tracing::debug!(method = "POST", %url, parts = body.parts().len(), "Sending request");
        let request = self.inner.post(url.clone()).multipart(multipart_form(body)?);
        self.send(request).await
    }
}
