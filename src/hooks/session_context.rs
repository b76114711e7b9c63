// ============================================================================
// SESSION CONTEXT - Compartir la sesión entre componentes
// ============================================================================
// Un único SessionStore por app, creado y rehidratado en el provider.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::state::SessionStore;
use crate::utils::BrowserStorage;

#[derive(Properties, PartialEq)]
pub struct SessionContextProviderProps {
    pub children: Children,
}

/// Provider que envuelve la app y expone el `SessionStore`
#[function_component(SessionContextProvider)]
pub fn session_context_provider(props: &SessionContextProviderProps) -> Html {
    let store = use_memo((), |_| {
        let store = SessionStore::new(Rc::new(BrowserStorage));
        store.initialize();
        store
    });

    html! {
        <ContextProvider<SessionStore> context={(*store).clone()}>
            {props.children.clone()}
        </ContextProvider<SessionStore>>
    }
}
