/// Clave de localStorage con el token de sesión
pub const STORAGE_KEY_TOKEN: &str = "token";

/// Mensaje de login cuando no hubo respuesta del servidor
pub const LOGIN_CONNECTION_ERROR: &str = "Error de conexión. Por favor, inténtalo de nuevo.";

/// Id del contenedor donde se monta la app
pub const APP_ROOT_ID: &str = "app";
