use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::AlertBanner;
use crate::config::CONFIG;
use crate::hooks::use_session;
use crate::services::{AuthService, GlooTransport};

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    /// Se emite tras un login correcto
    pub on_logged_in: Callback<()>,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let session = use_session();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let on_logged_in = props.on_logged_in.clone();
        let store = session.map(|s| s.store);

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(store), Some(email_input), Some(password_input)) = (
                store.clone(),
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            if *submitting {
                return;
            }

            let email = email_input.value();
            let password = password_input.value();
            let error = error.clone();
            let submitting = submitting.clone();
            let on_logged_in = on_logged_in.clone();

            submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let auth = AuthService::new(Rc::new(GlooTransport), CONFIG.backend_url());
                match auth.sign_in(&store, &email, &password).await {
                    Ok(()) => {
                        log::info!("✅ Login correcto");
                        error.set(None);
                        on_logged_in.emit(());
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                submitting.set(false);
            });
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <div class="login-logo">
                        <div class="logo-icon">{"📦"}</div>
                    </div>
                    <h1>{"Inventario"}</h1>
                </div>

                if let Some(message) = (*error).clone() {
                    <AlertBanner kind="danger" {message} {on_dismiss} />
                }

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="Ingresa tu email"
                            ref={email_ref}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Contraseña"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Ingresa tu contraseña"
                            ref={password_ref}
                            required=true
                        />
                    </div>

                    <button type="submit" class="btn-login" disabled={*submitting}>
                        <span class="btn-text">{"Iniciar Sesión"}</span>
                    </button>
                </form>
            </div>
        </div>
    }
}
