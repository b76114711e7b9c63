// ============================================================================
// SESSION STATE - Token + perfil del usuario autenticado
// ============================================================================
// Se pasa explícitamente a cada ResourceClient; nada de estado global.
// ============================================================================

use std::rc::Rc;

use thiserror::Error;

use super::reactivity::{ReactiveState, Subscription};
use crate::models::{Capability, Role, User};
use crate::utils::{KeyValueStorage, STORAGE_KEY_TOKEN};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("el servidor devolvió un token vacío")]
    EmptyToken,
}

/// Handle clonable sobre la sesión y su persistencia
#[derive(Clone)]
pub struct SessionStore {
    state: ReactiveState<Session>,
    storage: Rc<dyn KeyValueStorage>,
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            state: ReactiveState::new(Session::default()),
            storage,
        }
    }

    /// Rehidratar desde el almacenamiento. Sin perfil: la UI que depende del
    /// rol no se muestra hasta un login nuevo.
    pub fn initialize(&self) {
        match self.storage.load(STORAGE_KEY_TOKEN).filter(|t| !t.is_empty()) {
            Some(token) => {
                log::info!("🔑 Token encontrado en localStorage, sesión restaurada");
                self.state.set(Session {
                    token: Some(token),
                    user: None,
                    is_authenticated: true,
                });
            }
            None => log::debug!("Sin token guardado"),
        }
    }

    /// Reemplaza la sesión y persiste el token (best-effort)
    pub fn login(&self, token: String, user: User) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        if let Err(e) = self.storage.save(STORAGE_KEY_TOKEN, &token) {
            log::warn!("⚠️ No se pudo persistir el token: {}", e);
        }

        self.state.set(Session {
            token: Some(token),
            user: Some(user),
            is_authenticated: true,
        });
        log::info!("✅ Sesión iniciada");
        Ok(())
    }

    pub fn logout(&self) {
        self.clear();
        log::info!("👋 Logout");
    }

    /// El servidor rechazó el token (401)
    pub fn expire(&self) {
        if self.is_authenticated() {
            log::warn!("⏰ Sesión expirada, se requiere login");
        }
        self.clear();
    }

    fn clear(&self) {
        if let Err(e) = self.storage.remove(STORAGE_KEY_TOKEN) {
            log::warn!("⚠️ No se pudo borrar el token: {}", e);
        }
        self.state.set(Session::default());
    }

    pub fn snapshot(&self) -> Session {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    /// Token solo si la sesión está autenticada
    pub fn token(&self) -> Option<String> {
        self.state
            .with(|s| if s.is_authenticated { s.token.clone() } else { None })
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.state
            .with(|s| s.is_authenticated && capability.is_granted(s.role()))
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.state.subscribe(callback)
    }
}
