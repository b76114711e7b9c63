use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Perfil devuelto por el login. Solo el rol tiene significado para la UI;
/// el resto de atributos se conserva tal cual.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub role: Role,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn with_role(role: Role) -> Self {
        Self { role, extra: serde_json::Map::new() }
    }

    pub fn display_name(&self) -> Option<&str> {
        ["name", "email"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(|v| v.as_str()))
    }
}

const ADMIN_ROLE: &str = "administrador";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Administrator,
    Other(String),
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case(ADMIN_ROLE) {
            Role::Administrator
        } else {
            Role::Other(value)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Administrator => ADMIN_ROLE.to_string(),
            Role::Other(name) => name,
        }
    }
}

/// Acciones de la UI que dependen del rol
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Capability {
    /// Crear, editar y eliminar empresas
    ManageCompanies,
    /// Entrar al inventario de una empresa desde el listado
    BrowseInventory,
    /// Crear, editar y eliminar artículos/productos
    ManageInventory,
    /// Exportar el listado a PDF o email
    ExportInventory,
}

impl Capability {
    /// `role` es `None` cuando la sesión se rehidrató solo con el token.
    pub fn is_granted(&self, role: Option<&Role>) -> bool {
        match self {
            Capability::ManageCompanies | Capability::BrowseInventory => {
                matches!(role, Some(Role::Administrator))
            }
            Capability::ManageInventory | Capability::ExportInventory => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_keeps_unknown_profile_fields() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token": "t1", "user": {"role": "administrador", "email": "a@b.co", "id": 3}}"#,
        )
        .unwrap();
        assert_eq!(response.token, "t1");
        assert_eq!(response.user.role, Role::Administrator);
        assert_eq!(response.user.display_name(), Some("a@b.co"));
        assert_eq!(response.user.extra.get("id"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn role_round_trips_through_its_wire_name() {
        let admin = serde_json::to_value(Role::Administrator).unwrap();
        assert_eq!(admin, serde_json::json!("administrador"));
        let seller: Role = serde_json::from_value(serde_json::json!("vendedor")).unwrap();
        assert_eq!(seller, Role::Other("vendedor".into()));
    }

    #[test]
    fn company_management_is_admin_only() {
        let seller = Role::Other("vendedor".into());
        assert!(Capability::ManageCompanies.is_granted(Some(&Role::Administrator)));
        assert!(!Capability::ManageCompanies.is_granted(Some(&seller)));
        assert!(!Capability::BrowseInventory.is_granted(None));
        assert!(Capability::ManageInventory.is_granted(Some(&seller)));
        assert!(Capability::ExportInventory.is_granted(None));
    }
}
