// ============================================================================
// INVENTARIO WEB - Front end de empresas, artículos y productos (Rust + Yew)
// ============================================================================
// Capas:
// - Models: estructuras compartidas con el backend + esquemas de pantalla
// - Services: comunicación HTTP (auth, CRUD, export)
// - State: sesión y estado reactivo
// - ViewModels: controlador genérico de listado + formulario
// - Hooks/Components: Yew
// ============================================================================

pub mod components;
pub mod config;
pub mod hooks;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

use crate::components::App;
use crate::config::CONFIG;
use crate::utils::APP_ROOT_ID;

/// Inicializa logging y monta la app en `#app` (o en `<body>` si no existe)
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!(
        "🚀 Inventario ({}) - backend {}",
        CONFIG.environment,
        CONFIG.backend_url()
    );

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(APP_ROOT_ID));

    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root(root).render();
        }
        None => {
            log::warn!("⚠️ No se encontró #{}, montando en <body>", APP_ROOT_ID);
            yew::Renderer::<App>::new().render();
        }
    }
}
