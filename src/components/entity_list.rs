// ============================================================================
// ENTITY LIST - Pantalla de listado genérica (empresas, artículos, productos)
// ============================================================================
// Toda la lógica vive en ListController; aquí solo se pinta el estado y se
// despachan acciones.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{AlertBanner, EntityFormModal};
use crate::config::CONFIG;
use crate::hooks::use_list_screen;
use crate::models::{Entity, EntityConfig, EntityId};
use crate::services::{download_pdf, render_pdf, GlooTransport, MailRelay};
use crate::viewmodels::ListController;

#[derive(Properties, PartialEq)]
pub struct EntityListProps<E: Entity> {
    pub config: &'static EntityConfig,
    #[prop_or_default]
    pub parent_id: Option<EntityId>,
    /// Alta, edición y borrado
    #[prop_or_default]
    pub can_manage: bool,
    #[prop_or_default]
    pub can_export: bool,
    /// Botón "View" por fila (entrar al inventario de la empresa)
    #[prop_or_default]
    pub on_view: Option<Callback<E>>,
}

/// Lanza una acción async del controlador sin bloquear el render
fn dispatch<E, F, Fut>(controller: &Rc<ListController<E>>, action: F)
where
    E: Entity,
    F: FnOnce(Rc<ListController<E>>) -> Fut,
    Fut: std::future::Future + 'static,
{
    let future = action(controller.clone());
    spawn_local(async move {
        future.await;
    });
}

#[function_component(EntityList)]
pub fn entity_list<E: Entity>(props: &EntityListProps<E>) -> Html {
    let controller = use_list_screen::<E>(props.config, props.parent_id);
    let export_error = use_state(|| None::<String>);

    let Some(controller) = controller else {
        return html! {
            <div class="alert alert-danger">{"Ruta inválida"}</div>
        };
    };

    let config = props.config;
    let state = controller.snapshot();

    let alert = {
        let clear_export = export_error.clone();
        let dismiss_export = Callback::from(move |_: ()| clear_export.set(None));
        let c = controller.clone();
        let dismiss_phase = Callback::from(move |_: ()| c.dismiss_alert());

        html! {
            <>
                if let Some((kind, message)) = state.phase.alert() {
                    <AlertBanner kind={kind} message={message.to_string()} on_dismiss={dismiss_phase} />
                }
                if let Some(message) = (*export_error).clone() {
                    <AlertBanner kind="danger" message={message} on_dismiss={dismiss_export} />
                }
            </>
        }
    };

    let on_add = {
        let c = controller.clone();
        Callback::from(move |_: MouseEvent| c.open_create())
    };

    let on_download = {
        let c = controller.clone();
        let export_error = export_error.clone();
        let parent_id = props.parent_id;
        Callback::from(move |_: MouseEvent| {
            match render_pdf(config, parent_id, &c.rows()).and_then(|export| download_pdf(&export)) {
                Ok(()) => export_error.set(None),
                Err(e) => {
                    log::error!("❌ {}", e);
                    export_error.set(Some(e.to_string()));
                }
            }
        })
    };

    let on_email = {
        let c = controller.clone();
        let export_error = export_error.clone();
        let parent_id = props.parent_id;
        Callback::from(move |_: MouseEvent| {
            let export = match render_pdf(config, parent_id, &c.rows()) {
                Ok(export) => export,
                Err(e) => {
                    log::error!("❌ {}", e);
                    export_error.set(Some(e.to_string()));
                    return;
                }
            };
            let export_error = export_error.clone();
            spawn_local(async move {
                let relay = MailRelay::new(Rc::new(GlooTransport), CONFIG.mail.clone());
                match relay.send_pdf(&export).await {
                    Ok(()) => export_error.set(None),
                    Err(e) => {
                        log::error!("❌ {}", e);
                        export_error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let rows = state.data.iter().map(|row| {
        let id = row.id();
        let cells = config
            .columns
            .iter()
            .map(|column| html! { <td>{row.field_value(column.field)}</td> });

        let view_button = props.on_view.as_ref().map(|on_view| {
            let on_view = on_view.clone();
            let row = row.clone();
            html! {
                <button class="btn btn-info btn-sm" onclick={Callback::from(move |_: MouseEvent| on_view.emit(row.clone()))}>
                    {"View"}
                </button>
            }
        });

        let manage_buttons = props.can_manage.then(|| {
            let edit = {
                let c = controller.clone();
                let row = row.clone();
                Callback::from(move |_: MouseEvent| c.open_edit(&row))
            };
            let delete = {
                let c = controller.clone();
                Callback::from(move |_: MouseEvent| c.request_delete(id))
            };
            html! {
                <>
                    <button class="btn btn-warning btn-sm" onclick={edit}>{"Edit"}</button>
                    <button class="btn btn-danger btn-sm" onclick={delete}>{"Delete"}</button>
                </>
            }
        });

        html! {
            <tr key={id.to_string()}>
                {for cells}
                <td class="actions">{view_button}{manage_buttons}</td>
            </tr>
        }
    });

    let confirm = state.pending_delete.map(|id| {
        let on_confirm = {
            let c = controller.clone();
            Callback::from(move |_: MouseEvent| dispatch(&c, |c| async move { c.confirm_delete().await }))
        };
        let on_cancel = {
            let c = controller.clone();
            Callback::from(move |_: MouseEvent| c.cancel_delete())
        };
        html! {
            <div class="confirm-delete">
                <p>{format!("¿Eliminar {} {}?", config.singular, id)}</p>
                <button class="btn btn-danger" onclick={on_confirm} disabled={state.phase.is_loading()}>
                    {"Confirmar"}
                </button>
                <button class="btn btn-secondary" onclick={on_cancel}>{"Cancelar"}</button>
            </div>
        }
    });

    let modal = state.modal_open.then(|| {
        let on_change = {
            let c = controller.clone();
            Callback::from(move |(field, value): (&'static str, String)| c.set_field(field, value))
        };
        let on_submit = {
            let c = controller.clone();
            Callback::from(move |_: ()| dispatch(&c, |c| async move { c.submit().await }))
        };
        let on_close = {
            let c = controller.clone();
            Callback::from(move |_: ()| c.close_modal())
        };
        html! {
            <EntityFormModal
                config={config}
                form={state.form.clone()}
                editing={state.edit_target.is_some()}
                busy={state.phase.is_loading()}
                {on_change}
                {on_submit}
                {on_close}
            />
        }
    });

    html! {
        <div class="entity-list">
            <div class="entity-list-header">
                <h1>{config.plural}</h1>
                <div class="entity-list-actions">
                    if props.can_manage {
                        <button class="btn btn-primary" onclick={on_add}>
                            {format!("Add {}", config.singular)}
                        </button>
                    }
                    if props.can_export {
                        <button class="btn btn-secondary" onclick={on_download}>{"Descargar PDF"}</button>
                        <button class="btn btn-secondary" onclick={on_email}>{"Enviar por email"}</button>
                    }
                </div>
            </div>

            {alert}
            {confirm}

            if state.phase.is_loading() {
                <div class="spinner" role="status">{"Cargando..."}</div>
            }

            if state.shows_empty_message() {
                <p class="empty">{format!("No {} found.", config.plural.to_lowercase())}</p>
            } else {
                <table class="table">
                    <thead>
                        <tr>
                            {for config.columns.iter().map(|c| html! { <th>{c.header}</th> })}
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>{for rows}</tbody>
                </table>
            }

            {modal}
        </div>
    }
}
