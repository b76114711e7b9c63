// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// `Transport` es la costura entre la lógica y el navegador: en wasm se usa
// gloo-net, en los tests un transporte en memoria.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Request JSON: siempre lleva `Content-Type: application/json`
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: None,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.headers.push(("Authorization".into(), format!("Bearer {}", token)));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Sin respuesta del servidor
    #[error("Network error: {0}")]
    Network(String),
    /// Respuesta no 2xx
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// 2xx con un cuerpo que no se pudo decodificar
    #[error("Parse error: {0}")]
    Decode(String),
    /// No hay sesión activa; no se llegó a enviar nada
    #[error("No hay sesión activa")]
    Unauthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Transporte real sobre `fetch` (gloo-net)
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        log::debug!("➡️ {} {}", request.method.as_str(), request.url);

        let sent = match &request.body {
            Some(body) => {
                let prepared = builder
                    .json(body)
                    .map_err(|e| ApiError::Network(format!("Serialization error: {}", e)))?;
                prepared.send().await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, status_text, body })
    }
}
