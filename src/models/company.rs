use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, FieldKind, FieldSpec};
use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nit: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
}

pub(crate) const COMPANY_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "nit", label: "NIT", placeholder: "Enter NIT", kind: FieldKind::Text },
    FieldSpec { name: "name", label: "Name", placeholder: "Enter Name", kind: FieldKind::Text },
    FieldSpec {
        name: "address",
        label: "Address",
        placeholder: "Enter Address",
        kind: FieldKind::Text,
    },
    FieldSpec { name: "phone", label: "Phone", placeholder: "Enter Phone", kind: FieldKind::Text },
];

impl Entity for Company {
    fn id(&self) -> EntityId {
        self.id
    }

    fn field_value(&self, field: &str) -> String {
        match field {
            "id" => self.id.to_string(),
            "nit" => self.nit.clone(),
            "name" => self.name.clone(),
            "address" => self.address.clone(),
            "phone" => self.phone.clone(),
            _ => String::new(),
        }
    }
}
