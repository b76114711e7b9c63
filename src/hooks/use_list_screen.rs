// ============================================================================
// USE LIST SCREEN - Conecta un ListController con el ciclo de vida del componente
// ============================================================================
// Montar: suscripción + primer fetch. Desmontar (o cambiar de empresa):
// dispose, así las respuestas tardías no tocan una pantalla que ya no existe.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::models::{Entity, EntityConfig, EntityId};
use crate::services::{GlooTransport, ResourceClient};
use crate::state::SessionStore;
use crate::utils::GlooScheduler;
use crate::viewmodels::ListController;

/// Crea el controlador de la colección. `None` si la ruta necesita una
/// empresa padre y no se la dieron.
pub fn build_controller<E: Entity>(
    store: &SessionStore,
    config: &'static EntityConfig,
    parent_id: Option<EntityId>,
) -> Option<ListController<E>> {
    let collection = config.collection.resolve(parent_id)?;
    let client = ResourceClient::new(
        Rc::new(GlooTransport),
        store.clone(),
        CONFIG.backend_url(),
        collection,
    );
    Some(ListController::new(
        config,
        client,
        Rc::new(GlooScheduler),
        CONFIG.alert_dismiss_ms,
    ))
}

#[hook]
pub fn use_list_screen<E>(
    config: &'static EntityConfig,
    parent_id: Option<EntityId>,
) -> Option<Rc<ListController<E>>>
where
    E: Entity,
{
    let store = use_context::<SessionStore>();
    let force_update = use_force_update();

    let controller = use_memo((config, parent_id), move |(config, parent_id)| {
        store.and_then(|store| build_controller::<E>(&store, *config, *parent_id).map(Rc::new))
    });
    let controller: Option<Rc<ListController<E>>> = (*controller).clone();

    {
        let controller = controller.clone();
        use_effect_with((config, parent_id), move |_| {
            let subscription = controller.as_ref().map(|c| {
                let subscription = c.state().subscribe(move || force_update.force_update());
                let c = c.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    c.mount().await;
                });
                subscription
            });

            move || {
                if let Some(c) = controller {
                    c.dispose();
                }
                drop(subscription);
            }
        });
    }

    controller
}
