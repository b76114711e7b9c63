use std::marker::PhantomData;
use std::rc::Rc;

use serde_json::Value;

use super::api_client::{ApiError, HttpRequest, HttpResponse, Method, Transport};
use crate::models::{Entity, EntityId};
use crate::state::SessionStore;

/// Cliente CRUD autenticado para una colección (`/companies/`,
/// `/companies/3/articles/`, ...). Cada pantalla crea el suyo.
pub struct ResourceClient<E> {
    transport: Rc<dyn Transport>,
    session: SessionStore,
    base_url: String,
    collection: String,
    _entity: PhantomData<E>,
}

impl<E: Entity> ResourceClient<E> {
    /// `collection` debe empezar y terminar en `/`
    pub fn new(
        transport: Rc<dyn Transport>,
        session: SessionStore,
        base_url: &str,
        collection: String,
    ) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection,
            _entity: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.collection)
    }

    pub fn item_url(&self, id: EntityId) -> String {
        format!("{}{}{}", self.base_url, self.collection, id)
    }

    /// GET de la colección, en el orden del servidor
    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        let response = self.send(Method::Get, self.collection_url(), None).await?;
        serde_json::from_str::<Vec<E>>(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn create(&self, fields: Value) -> Result<(), ApiError> {
        self.send(Method::Post, self.collection_url(), Some(fields)).await?;
        Ok(())
    }

    pub async fn update(&self, id: EntityId, fields: Value) -> Result<(), ApiError> {
        self.send(Method::Put, self.item_url(id), Some(fields)).await?;
        Ok(())
    }

    /// PUT si hay un registro en edición, POST si no
    pub async fn save(&self, edit_target: Option<EntityId>, fields: Value) -> Result<(), ApiError> {
        match edit_target {
            Some(id) => self.update(id, fields).await,
            None => self.create(fields).await,
        }
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.send(Method::Delete, self.item_url(id), None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<HttpResponse, ApiError> {
        let token = self.session.token().ok_or(ApiError::Unauthenticated)?;

        let mut request = HttpRequest::new(method, url).bearer(&token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            self.session.expire();
        }
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status,
                message: response.status_text,
            });
        }
        Ok(response)
    }
}
