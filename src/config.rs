use crate::models::InventoryKind;

const DEFAULT_BACKEND_DEVELOPMENT: &str = "http://localhost:3000";
const DEFAULT_BACKEND_PRODUCTION: &str = "https://inventario-be.onrender.com";
const DEFAULT_ALERT_DISMISS_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Tiempo que permanece visible una alerta de éxito
    pub alert_dismiss_ms: u32,
    /// Artículos o productos: nunca los dos en el mismo build
    pub inventory_kind: InventoryKind,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MailConfig {
    pub relay_url: Option<String>,
    pub from_email: String,
    pub to_email: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_lookup(compile_time_var)
    }

    /// Construye la configuración a partir de una función de búsqueda de claves.
    /// Los valores vacíos o inválidos caen al valor por defecto.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let get = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());

        Self {
            backend_url_development: get("BACKEND_URL_DEVELOPMENT")
                .unwrap_or(DEFAULT_BACKEND_DEVELOPMENT)
                .trim_end_matches('/')
                .to_string(),
            backend_url_production: get("BACKEND_URL_PRODUCTION")
                .unwrap_or(DEFAULT_BACKEND_PRODUCTION)
                .trim_end_matches('/')
                .to_string(),
            environment: get("ENVIRONMENT").unwrap_or("development").to_string(),
            enable_logging: get("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            alert_dismiss_ms: get("ALERT_DISMISS_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ALERT_DISMISS_MS),
            inventory_kind: get("INVENTORY_KIND")
                .and_then(InventoryKind::parse)
                .unwrap_or_default(),
            mail: MailConfig {
                relay_url: get("MAIL_RELAY_URL").map(str::to_string),
                from_email: get("MAIL_FROM").unwrap_or_default().to_string(),
                to_email: get("MAIL_TO").unwrap_or_default().to_string(),
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}

fn compile_time_var(key: &str) -> Option<&'static str> {
    match key {
        "BACKEND_URL_DEVELOPMENT" => option_env!("BACKEND_URL_DEVELOPMENT"),
        "BACKEND_URL_PRODUCTION" => option_env!("BACKEND_URL_PRODUCTION"),
        "ENVIRONMENT" => option_env!("ENVIRONMENT"),
        "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
        "ALERT_DISMISS_MS" => option_env!("ALERT_DISMISS_MS"),
        "INVENTORY_KIND" => option_env!("INVENTORY_KIND"),
        "MAIL_RELAY_URL" => option_env!("MAIL_RELAY_URL"),
        "MAIL_FROM" => option_env!("MAIL_FROM"),
        "MAIL_TO" => option_env!("MAIL_TO"),
        _ => None,
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
