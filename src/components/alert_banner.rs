use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertBannerProps {
    /// `success` | `danger`
    pub kind: AttrValue,
    pub message: AttrValue,
    pub on_dismiss: Callback<()>,
}

#[function_component(AlertBanner)]
pub fn alert_banner(props: &AlertBannerProps) -> Html {
    html! {
        <div class={classes!("alert", format!("alert-{}", props.kind))} role="alert">
            <span class="alert-message">{props.message.clone()}</span>
            <button
                type="button"
                class="btn-close"
                aria-label="Cerrar"
                onclick={props.on_dismiss.reform(|_| ())}
            >
                {"✕"}
            </button>
        </div>
    }
}
