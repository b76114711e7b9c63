use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::models::InventoryKind;
use crate::router::{current_path, push_path, Route};

#[derive(Clone, PartialEq)]
pub struct UseRouteHandle {
    pub route: Route,
    pub navigate: Callback<Route>,
}

/// Ruta actual, sincronizada con `popstate` (atrás/adelante del navegador)
#[hook]
pub fn use_route(kind: InventoryKind) -> UseRouteHandle {
    let route = use_state(|| Route::recognize(&current_path(), kind));

    {
        let route = route.clone();
        use_effect_with(kind, move |kind| {
            let kind = *kind;
            let listener = web_sys::window().and_then(|window| {
                let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
                    route.set(Route::recognize(&current_path(), kind));
                });
                window
                    .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
                    .ok()?;
                Some((window, closure))
            });

            move || {
                if let Some((window, closure)) = listener {
                    let _ = window.remove_event_listener_with_callback(
                        "popstate",
                        closure.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            if let Err(e) = push_path(&next.to_path(kind)) {
                log::error!("❌ Error navegando a {:?}: {:?}", next, e);
            }
            route.set(next);
        })
    };

    UseRouteHandle {
        route: *route,
        navigate,
    }
}
