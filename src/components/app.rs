// ============================================================================
// APP - Shell: provider de sesión + rutas
// ============================================================================

use yew::prelude::*;

use super::{EntityList, LoginScreen};
use crate::config::CONFIG;
use crate::hooks::{use_route, use_session, SessionContextProvider, UseSessionHandle};
use crate::models::entity::COMPANIES;
use crate::models::{Capability, Company, InventoryItem};
use crate::router::Route;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionContextProvider>
            <Shell />
        </SessionContextProvider>
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let session = use_session();
    let router = use_route(CONFIG.inventory_kind);
    let authenticated = session.as_ref().is_some_and(UseSessionHandle::is_authenticated);

    // Sin sesión (o sesión expirada por un 401) no hay pantallas protegidas
    {
        let navigate = router.navigate.clone();
        use_effect_with((router.route, authenticated), move |(route, authenticated)| {
            if route.requires_session() && !*authenticated {
                log::warn!("🔒 Sin sesión, redirigiendo al login");
                navigate.emit(Route::Login);
            }
            || ()
        });
    }

    let Some(session) = session else {
        return html! {};
    };

    let navigate = router.navigate.clone();
    let content = match router.route {
        Route::Login => html! {
            <LoginScreen on_logged_in={navigate.reform(|_: ()| Route::Companies)} />
        },
        Route::Companies if authenticated => {
            let on_view = session
                .can(Capability::BrowseInventory)
                .then(|| navigate.reform(|company: Company| Route::Inventory { company_id: company.id }));
            html! {
                <EntityList<Company>
                    config={&COMPANIES}
                    can_manage={session.can(Capability::ManageCompanies)}
                    can_export={session.can(Capability::ExportInventory)}
                    {on_view}
                />
            }
        }
        Route::Inventory { company_id } if authenticated => html! {
            <>
                if session.can(Capability::BrowseInventory) {
                    <button class="btn btn-link" onclick={navigate.reform(|_: MouseEvent| Route::Companies)}>
                        {"← Companies"}
                    </button>
                }
                <EntityList<InventoryItem>
                    key={company_id.to_string()}
                    config={CONFIG.inventory_kind.config()}
                    parent_id={Some(company_id)}
                    can_manage={session.can(Capability::ManageInventory)}
                    can_export={session.can(Capability::ExportInventory)}
                />
            </>
        },
        Route::Companies | Route::Inventory { .. } => html! {},
        Route::NotFound => html! {
            <div class="not-found">
                <h2>{"Página no encontrada"}</h2>
                <button class="btn btn-link" onclick={navigate.reform(|_: MouseEvent| Route::Login)}>{"Volver"}</button>
            </div>
        },
    };

    let on_logout = {
        let store = session.store.clone();
        let navigate = navigate.clone();
        Callback::from(move |_: MouseEvent| {
            store.logout();
            navigate.emit(Route::Login);
        })
    };

    html! {
        <div class="app">
            if authenticated {
                <nav class="navbar">
                    <span class="navbar-brand">{"Inventario"}</span>
                    if let Some(name) = session.session.user.as_ref().and_then(|u| u.display_name()) {
                        <span class="navbar-user">{name.to_string()}</span>
                    }
                    <button class="btn btn-outline" onclick={on_logout}>{"Logout"}</button>
                </nav>
            }
            <main class="container">{content}</main>
        </div>
    }
}
