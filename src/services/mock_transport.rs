use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::api_client::{ApiError, HttpRequest, HttpResponse, Method, Transport};

type SendHook = Box<dyn Fn(&HttpRequest)>;

/// Transporte en memoria: respuestas en cola y registro de requests
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    on_send: RefCell<Option<SendHook>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            status_text: status_text(status).into(),
            body: body.to_string(),
        }));
    }

    pub fn push_status(&self, status: u16) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            status_text: status_text(status).into(),
            body: String::new(),
        }));
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            status_text: status_text(status).into(),
            body: body.into(),
        }));
    }

    pub fn push_network_error(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network("Failed to fetch".into())));
    }

    /// Se ejecuta en cada `send`, antes de responder
    pub fn on_send(&self, hook: impl Fn(&HttpRequest) + 'static) {
        *self.on_send.borrow_mut() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests.borrow().iter().filter(|r| r.method == method).count()
    }

    pub fn last(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(hook) = self.on_send.borrow().as_ref() {
            hook(&request);
        }
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("sin respuesta preparada".into())))
    }
}
