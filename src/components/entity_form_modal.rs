// ============================================================================
// ENTITY FORM MODAL - Alta/edición dirigida por el esquema de campos
// ============================================================================

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::EntityConfig;
use crate::viewmodels::FormState;

#[derive(Properties, PartialEq)]
pub struct EntityFormModalProps {
    pub config: &'static EntityConfig,
    pub form: FormState,
    /// `true` si edita un registro existente
    pub editing: bool,
    pub busy: bool,
    pub on_change: Callback<(&'static str, String)>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(EntityFormModal)]
pub fn entity_form_modal(props: &EntityFormModalProps) -> Html {
    let title = if props.editing {
        format!("Edit {}", props.config.singular)
    } else {
        format!("Add {}", props.config.singular)
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let inputs = props.config.fields.iter().map(|field| {
        let on_change = props.on_change.clone();
        let name = field.name;
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((name, input.value()));
        });

        html! {
            <div class="form-group" key={field.name}>
                <label for={field.name}>{field.label}</label>
                <input
                    id={field.name}
                    name={field.name}
                    type={field.kind.input_type()}
                    step={field.kind.step()}
                    placeholder={field.placeholder}
                    value={props.form.get(field.name).to_string()}
                    {oninput}
                />
            </div>
        }
    });

    html! {
        <div class="modal active">
            <div class="modal-overlay" onclick={props.on_close.reform(|_| ())}></div>
            <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="btn-close" onclick={props.on_close.reform(|_| ())}>{"✕"}</button>
                </div>
                <form class="modal-body" onsubmit={on_submit}>
                    {for inputs}
                    <div class="modal-footer">
                        <button type="button" class="btn btn-secondary" onclick={props.on_close.reform(|_| ())}>
                            {"Close"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.busy}>
                            {if props.editing { "Save Changes" } else { "Add" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
