use std::rc::Rc;

use thiserror::Error;

use super::api_client::{ApiError, HttpRequest, Method, Transport};
use crate::models::{LoginRequest, LoginResponse};
use crate::state::{SessionError, SessionStore};
use crate::utils::LOGIN_CONNECTION_ERROR;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Error {status}: {status_text}")]
    Rejected { status: u16, status_text: String },
    #[error("{}", LOGIN_CONNECTION_ERROR)]
    Connection(String),
    #[error("Respuesta de login inválida: {0}")]
    Decode(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct AuthService {
    transport: Rc<dyn Transport>,
    base_url: String,
}

impl AuthService {
    pub fn new(transport: Rc<dyn Transport>, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `POST /auth/login {email, password}`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&body).map_err(|e| AuthError::Decode(e.to_string()))?;

        log::info!("🔐 Iniciando sesión para: {}", email);

        let response = self
            .transport
            .send(HttpRequest::new(Method::Post, url).json(body))
            .await
            .map_err(|e| match e {
                ApiError::Network(detail) => AuthError::Connection(detail),
                other => AuthError::Connection(other.to_string()),
            })?;

        if !response.ok() {
            return Err(AuthError::Rejected {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str::<LoginResponse>(&response.body)
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    /// Login completo: request + actualización de la sesión
    pub async fn sign_in(
        &self,
        session: &SessionStore,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        match self.login(email, password).await {
            Ok(response) => {
                session.login(response.token, response.user)?;
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Login fallido: {:?}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capability, Role};
    use crate::services::mock_transport::MockTransport;
    use crate::utils::{KeyValueStorage, MemoryStorage};
    use serde_json::json;

    fn setup() -> (Rc<MockTransport>, AuthService, SessionStore, Rc<MemoryStorage>) {
        let transport = MockTransport::new();
        let service = AuthService::new(transport.clone(), "http://localhost:3000");
        let storage = Rc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        (transport, service, session, storage)
    }

    #[tokio::test]
    async fn valid_credentials_authenticate_and_persist_token() {
        let (transport, service, session, storage) = setup();
        transport.push_json(200, json!({"token": "t1", "user": {"role": "administrador"}}));

        service.sign_in(&session, "ana@acme.co", "secreto").await.unwrap();

        let request = transport.last().unwrap();
        assert_eq!(request.url, "http://localhost:3000/auth/login");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, Some(json!({"email": "ana@acme.co", "password": "secreto"})));
        assert!(request.header("Authorization").is_none());

        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.role(), Some(&Role::Administrator));
        assert_eq!(storage.load("token").as_deref(), Some("t1"));
        assert!(session.can(Capability::ManageCompanies));
    }

    #[tokio::test]
    async fn rejected_login_reports_status() {
        let (transport, service, session, _) = setup();
        transport.push_status(401);

        let err = service.sign_in(&session, "ana@acme.co", "mal").await.unwrap_err();
        assert_eq!(err.to_string(), "Error 401: Unauthorized");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn transport_failure_shows_connection_message() {
        let (transport, service, session, _) = setup();
        transport.push_network_error();

        let err = service.sign_in(&session, "ana@acme.co", "x").await.unwrap_err();
        assert_eq!(err.to_string(), LOGIN_CONNECTION_ERROR);
    }

    #[tokio::test]
    async fn empty_token_is_not_accepted() {
        let (transport, service, session, _) = setup();
        transport.push_json(200, json!({"token": "", "user": {"role": "administrador"}}));

        let err = service.sign_in(&session, "ana@acme.co", "x").await.unwrap_err();
        assert_eq!(err, AuthError::Session(SessionError::EmptyToken));
        assert!(!session.is_authenticated());
    }
}
