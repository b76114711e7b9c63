use yew::prelude::*;

use crate::models::Capability;
use crate::state::{Session, SessionStore};

#[derive(Clone, PartialEq)]
pub struct UseSessionHandle {
    pub store: SessionStore,
    /// Copia para renderizar; se refresca en cada cambio del store
    pub session: Session,
}

impl UseSessionHandle {
    pub fn can(&self, capability: Capability) -> bool {
        capability.is_granted(self.session.role())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }
}

/// Sesión del contexto + re-render en login/logout/expiración.
/// Debe usarse dentro de `SessionContextProvider`.
#[hook]
pub fn use_session() -> Option<UseSessionHandle> {
    let store = use_context::<SessionStore>();
    let force_update = use_force_update();

    {
        let store = store.clone();
        use_effect_with(store, move |store| {
            let subscription = store
                .as_ref()
                .map(|s| s.subscribe(move || force_update.force_update()));
            move || drop(subscription)
        });
    }

    store.map(|store| UseSessionHandle {
        session: store.snapshot(),
        store,
    })
}
