pub mod auth;
pub mod company;
pub mod entity;
pub mod inventory;
pub mod lenient;

pub use auth::{Capability, LoginRequest, LoginResponse, Role, User};
pub use company::Company;
pub use entity::{
    CollectionPath, Column, Entity, EntityConfig, EntityId, FieldKind, FieldSpec,
    InventoryKind, ListMessages,
};
pub use inventory::InventoryItem;
