use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, FieldKind, FieldSpec};
use super::lenient;

/// Artículo o producto de una empresa. Misma forma en ambas variantes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::i64")]
    pub quantity: i64,
}

pub(crate) const ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", label: "Name", placeholder: "Enter Name", kind: FieldKind::Text },
    FieldSpec {
        name: "price",
        label: "Price",
        placeholder: "Enter Price",
        kind: FieldKind::Decimal,
    },
    FieldSpec {
        name: "quantity",
        label: "Quantity",
        placeholder: "Enter Quantity",
        kind: FieldKind::Integer,
    },
];

impl Entity for InventoryItem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn field_value(&self, field: &str) -> String {
        match field {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "price" => self.price.to_string(),
            "quantity" => self.quantity.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_keeps_decimals_in_display() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"id": 1, "name": "Tornillo", "price": "0.25", "quantity": 40}"#)
                .unwrap();
        assert_eq!(item.field_value("price"), "0.25");
        assert_eq!(item.field_value("quantity"), "40");
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let item: InventoryItem = serde_json::from_str(r#"{"id": 2, "name": "Tuerca"}"#).unwrap();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn odd_rows_do_not_break_the_list() {
        let items: Vec<InventoryItem> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Clavo", "price": 0.1, "quantity": 100},
                {"id": 2, "name": null, "price": "4.50", "quantity": "3.00"},
                {"id": 3, "name": "Broca", "price": 9, "quantity": 2.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].name, "");
        assert_eq!(items[1].quantity, 3);
        assert_eq!(items[2].quantity, 2);
    }
}
