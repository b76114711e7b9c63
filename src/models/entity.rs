// ============================================================================
// ENTITY - Configuración compartida por las pantallas de listado
// ============================================================================
// Empresas, artículos y productos usan el mismo controlador genérico; lo que
// cambia entre ellos vive en un `EntityConfig` estático (ruta, campos,
// columnas y mensajes).
// ============================================================================

use std::fmt::Debug;

use serde::de::DeserializeOwned;

use super::company::COMPANY_FIELDS;
use super::inventory::ITEM_FIELDS;

/// Identificador asignado por el servidor
pub type EntityId = u64;

/// Registro listable y editable desde una pantalla de listado
pub trait Entity: Clone + Debug + PartialEq + DeserializeOwned + 'static {
    fn id(&self) -> EntityId;

    /// Valor textual de un campo, tal como se muestra en la tabla o en el input.
    /// Campos desconocidos devuelven una cadena vacía.
    fn field_value(&self, field: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
}

impl FieldKind {
    /// Atributo `type` del input HTML
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer | FieldKind::Decimal => "number",
        }
    }

    /// Atributo `step` del input, solo para decimales
    pub fn step(&self) -> Option<&'static str> {
        match self {
            FieldKind::Decimal => Some("0.01"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
}

/// Mensajes de alerta por acción. Estáticos: el detalle técnico solo va al log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMessages {
    pub fetch_failed: &'static str,
    pub save_failed: &'static str,
    pub saved: &'static str,
    pub delete_failed: &'static str,
    pub deleted: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPath {
    /// `/companies/`
    Root(&'static str),
    /// `/companies/{parent_id}/articles/`
    Nested {
        parent: &'static str,
        child: &'static str,
    },
}

impl CollectionPath {
    /// Ruta de la colección, terminada en `/`. `None` si falta el padre.
    pub fn resolve(&self, parent_id: Option<EntityId>) -> Option<String> {
        match (self, parent_id) {
            (CollectionPath::Root(name), _) => Some(format!("/{}/", name)),
            (CollectionPath::Nested { parent, child }, Some(id)) => {
                Some(format!("/{}/{}/{}/", parent, id, child))
            }
            (CollectionPath::Nested { .. }, None) => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntityConfig {
    pub singular: &'static str,
    pub plural: &'static str,
    pub collection: CollectionPath,
    pub fields: &'static [FieldSpec],
    pub columns: &'static [Column],
    pub export_columns: &'static [Column],
    pub messages: ListMessages,
}

const ITEM_COLUMNS: &[Column] = &[
    Column { header: "ID", field: "id" },
    Column { header: "Name", field: "name" },
    Column { header: "Price", field: "price" },
    Column { header: "Quantity", field: "quantity" },
];

pub static COMPANIES: EntityConfig = EntityConfig {
    singular: "Company",
    plural: "Companies",
    collection: CollectionPath::Root("companies"),
    fields: COMPANY_FIELDS,
    columns: &[
        Column { header: "ID", field: "id" },
        Column { header: "NIT", field: "nit" },
        Column { header: "Name", field: "name" },
        Column { header: "Address", field: "address" },
        Column { header: "Phone", field: "phone" },
    ],
    export_columns: &[
        Column { header: "ID", field: "id" },
        Column { header: "NIT", field: "nit" },
        Column { header: "Name", field: "name" },
        Column { header: "Phone", field: "phone" },
    ],
    messages: ListMessages {
        fetch_failed: "Error al obtener las empresas",
        save_failed: "Error al guardar la empresa",
        saved: "La empresa se guardó correctamente",
        delete_failed: "Error al eliminar la empresa",
        deleted: "La empresa se eliminó correctamente",
    },
};

pub static ARTICLES: EntityConfig = EntityConfig {
    singular: "Article",
    plural: "Articles",
    collection: CollectionPath::Nested { parent: "companies", child: "articles" },
    fields: ITEM_FIELDS,
    columns: ITEM_COLUMNS,
    export_columns: ITEM_COLUMNS,
    messages: ListMessages {
        fetch_failed: "Error al obtener los artículos",
        save_failed: "Error al guardar el artículo",
        saved: "Artículo guardado exitosamente.",
        delete_failed: "Error al eliminar el artículo",
        deleted: "Artículo eliminado exitosamente.",
    },
};

pub static PRODUCTS: EntityConfig = EntityConfig {
    singular: "Product",
    plural: "Products",
    collection: CollectionPath::Nested { parent: "companies", child: "products" },
    fields: ITEM_FIELDS,
    columns: ITEM_COLUMNS,
    export_columns: ITEM_COLUMNS,
    messages: ListMessages {
        fetch_failed: "Error al obtener los productos",
        save_failed: "Error al guardar el producto",
        saved: "Producto guardado exitosamente.",
        delete_failed: "Error al eliminar el producto",
        deleted: "Producto eliminado exitosamente.",
    },
};

/// Variante del inventario compilada en la app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryKind {
    #[default]
    Articles,
    Products,
}

impl InventoryKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "articles" | "articulos" | "artículos" => Some(Self::Articles),
            "products" | "productos" => Some(Self::Products),
            _ => None,
        }
    }

    /// Segmento de la URL del front end (`/articles/:companyId`)
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::Products => "products",
        }
    }

    pub fn config(&self) -> &'static EntityConfig {
        match self {
            Self::Articles => &ARTICLES,
            Self::Products => &PRODUCTS,
        }
    }
}
