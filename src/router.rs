// ============================================================================
// ROUTER - Ruta del navegador <-> pantalla
// ============================================================================

use wasm_bindgen::JsValue;

use crate::models::{EntityId, InventoryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Login,
    /// `/companies`
    Companies,
    /// `/articles/:companyId` o `/products/:companyId`
    Inventory { company_id: EntityId },
    NotFound,
}

impl Route {
    /// Interpreta un pathname. El segmento de inventario depende del build.
    pub fn recognize(path: &str, kind: InventoryKind) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Login,
            ["companies"] => Route::Companies,
            [segment, id] if *segment == kind.route_segment() => id
                .parse()
                .map(|company_id| Route::Inventory { company_id })
                .unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self, kind: InventoryKind) -> String {
        match self {
            Route::Login | Route::NotFound => "/".to_string(),
            Route::Companies => "/companies".to_string(),
            Route::Inventory { company_id } => {
                format!("/{}/{}", kind.route_segment(), company_id)
            }
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Companies | Route::Inventory { .. })
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// `history.pushState` sin recargar la página
pub fn push_path(path: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    window.history()?.push_state_with_url(&JsValue::NULL, "", Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_fixed_routes() {
        let kind = InventoryKind::Articles;
        assert_eq!(Route::recognize("/", kind), Route::Login);
        assert_eq!(Route::recognize("", kind), Route::Login);
        assert_eq!(Route::recognize("/companies", kind), Route::Companies);
        assert_eq!(Route::recognize("/companies/", kind), Route::Companies);
    }

    #[test]
    fn inventory_segment_follows_build_variant() {
        assert_eq!(
            Route::recognize("/articles/12", InventoryKind::Articles),
            Route::Inventory { company_id: 12 }
        );
        assert_eq!(Route::recognize("/articles/12", InventoryKind::Products), Route::NotFound);
        assert_eq!(
            Route::recognize("/products/4", InventoryKind::Products),
            Route::Inventory { company_id: 4 }
        );
    }

    #[test]
    fn bad_company_id_is_not_found() {
        assert_eq!(Route::recognize("/articles/abc", InventoryKind::Articles), Route::NotFound);
        assert_eq!(Route::recognize("/articles", InventoryKind::Articles), Route::NotFound);
        assert_eq!(Route::recognize("/x/y/z", InventoryKind::Articles), Route::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        let kind = InventoryKind::Products;
        for route in [Route::Login, Route::Companies, Route::Inventory { company_id: 9 }] {
            assert_eq!(Route::recognize(&route.to_path(kind), kind), route);
        }
        assert!(Route::Companies.requires_session());
        assert!(!Route::Login.requires_session());
    }
}
