// ============================================================================
// LIST VIEWMODEL - Controlador genérico de pantallas de listado
// ============================================================================
// fetch al montar -> fase (idle/loading/error/success) -> formulario modal
// (alta o edición) -> mutación -> refetch completo. Sin parches optimistas:
// la tabla siempre refleja lo que devolvió el servidor.
//
// - Una sola acción en vuelo por pantalla (las demás se rechazan)
// - `dispose()` descarta respuestas pendientes y cancela el timer de alerta
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::{Entity, EntityConfig, EntityId};
use crate::services::ResourceClient;
use crate::state::{CancelToken, ReactiveState};
use crate::utils::{Scheduler, TimerHandle};

use super::form_viewmodel::FormState;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Error(String),
    Success(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn alert(&self) -> Option<(&'static str, &str)> {
        match self {
            Phase::Error(msg) => Some(("danger", msg)),
            Phase::Success(msg) => Some(("success", msg)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListScreenState<E> {
    pub data: Vec<E>,
    pub phase: Phase,
    /// `Some(id)` = el modal edita ese registro; `None` = alta
    pub edit_target: Option<EntityId>,
    pub modal_open: bool,
    pub form: FormState,
    /// Borrado pendiente de confirmación
    pub pending_delete: Option<EntityId>,
    /// Al menos un listado llegó bien
    pub loaded: bool,
}

impl<E> ListScreenState<E> {
    fn new(form: FormState) -> Self {
        Self {
            data: Vec::new(),
            phase: Phase::Idle,
            edit_target: None,
            modal_open: false,
            form,
            pending_delete: None,
            loaded: false,
        }
    }

    /// Mostrar "no hay registros" en lugar de la tabla
    pub fn shows_empty_message(&self) -> bool {
        self.loaded && self.data.is_empty()
    }
}

/// Resultado de despachar una acción asíncrona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Completed,
    /// Ya había una acción en vuelo; el estado no cambió
    Busy,
    /// La pantalla se desmontó; el resultado se descartó
    Disposed,
    /// No había nada que hacer (p. ej. confirmar sin borrado pendiente)
    Nothing,
}

enum Fetch {
    Loaded,
    Failed,
    Disposed,
}

struct FlightGuard<'a>(&'a Cell<bool>);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct ListController<E: Entity> {
    config: &'static EntityConfig,
    client: ResourceClient<E>,
    state: ReactiveState<ListScreenState<E>>,
    scheduler: Rc<dyn Scheduler>,
    alert_dismiss_ms: u32,
    alert_timer: RefCell<Option<TimerHandle>>,
    alert_generation: Rc<Cell<u64>>,
    in_flight: Cell<bool>,
    cancel: CancelToken,
}

impl<E: Entity> ListController<E> {
    pub fn new(
        config: &'static EntityConfig,
        client: ResourceClient<E>,
        scheduler: Rc<dyn Scheduler>,
        alert_dismiss_ms: u32,
    ) -> Self {
        Self {
            config,
            client,
            state: ReactiveState::new(ListScreenState::new(FormState::empty(config.fields))),
            scheduler,
            alert_dismiss_ms,
            alert_timer: RefCell::new(None),
            alert_generation: Rc::new(Cell::new(0)),
            in_flight: Cell::new(false),
            cancel: CancelToken::new(),
        }
    }

    pub fn config(&self) -> &'static EntityConfig {
        self.config
    }

    pub fn state(&self) -> &ReactiveState<ListScreenState<E>> {
        &self.state
    }

    pub fn snapshot(&self) -> ListScreenState<E> {
        self.state.get()
    }

    /// Filas actuales (para exportar)
    pub fn rows(&self) -> Vec<E> {
        self.state.with(|s| s.data.clone())
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    // ------------------------------------------------------------------
    // Acciones asíncronas
    // ------------------------------------------------------------------

    /// Primer fetch al montar la pantalla
    pub async fn mount(&self) -> Dispatch {
        log::info!("📋 Cargando {}...", self.config.plural);
        self.refresh().await
    }

    pub async fn refresh(&self) -> Dispatch {
        let _flight = match self.begin() {
            Ok(guard) => guard,
            Err(rejected) => return rejected,
        };
        match self.fetch().await {
            Fetch::Disposed => Dispatch::Disposed,
            Fetch::Loaded | Fetch::Failed => Dispatch::Completed,
        }
    }

    /// POST o PUT según `edit_target`, y refetch si salió bien. Si falla, el
    /// modal sigue abierto con los mismos valores.
    pub async fn submit(&self) -> Dispatch {
        let _flight = match self.begin() {
            Ok(guard) => guard,
            Err(rejected) => return rejected,
        };

        let (target, body) = self
            .state
            .with(|s| (s.edit_target, s.form.to_body(self.config.fields)));

        let result = self.client.save(target, body).await;
        if self.cancel.is_cancelled() {
            log::debug!("Pantalla desmontada, se descarta el resultado del guardado");
            return Dispatch::Disposed;
        }

        match result {
            Ok(()) => {
                log::info!("✅ {} guardado (id: {:?})", self.config.singular, target);
                self.state.update(|s| {
                    s.modal_open = false;
                    s.edit_target = None;
                    s.form = FormState::empty(self.config.fields);
                });
                self.after_mutation(self.config.messages.saved).await
            }
            Err(e) => {
                log::error!("❌ {}: {}", self.config.messages.save_failed, e);
                self.state
                    .update(|s| s.phase = Phase::Error(self.config.messages.save_failed.into()));
                Dispatch::Completed
            }
        }
    }

    /// Borra sin preguntar; la UI pasa por `request_delete`/`confirm_delete`
    pub async fn delete(&self, id: EntityId) -> Dispatch {
        let _flight = match self.begin() {
            Ok(guard) => guard,
            Err(rejected) => return rejected,
        };

        let result = self.client.delete(id).await;
        if self.cancel.is_cancelled() {
            log::debug!("Pantalla desmontada, se descarta el resultado del borrado");
            return Dispatch::Disposed;
        }

        match result {
            Ok(()) => {
                log::info!("🗑️ {} {} eliminado", self.config.singular, id);
                self.after_mutation(self.config.messages.deleted).await
            }
            Err(e) => {
                log::error!("❌ {}: {}", self.config.messages.delete_failed, e);
                self.state
                    .update(|s| s.phase = Phase::Error(self.config.messages.delete_failed.into()));
                Dispatch::Completed
            }
        }
    }

    pub async fn confirm_delete(&self) -> Dispatch {
        if self.is_busy() {
            return Dispatch::Busy;
        }
        let Some(id) = self.state.with(|s| s.pending_delete) else {
            return Dispatch::Nothing;
        };
        self.state.update(|s| s.pending_delete = None);
        self.delete(id).await
    }

    // ------------------------------------------------------------------
    // Acciones síncronas (modal, formulario, alertas)
    // ------------------------------------------------------------------

    pub fn open_create(&self) {
        self.state.update(|s| {
            s.edit_target = None;
            s.form = FormState::empty(self.config.fields);
            s.modal_open = true;
        });
    }

    pub fn open_edit(&self, entity: &E) {
        self.state.update(|s| {
            s.edit_target = Some(entity.id());
            s.form = FormState::from_entity(self.config.fields, entity);
            s.modal_open = true;
        });
    }

    pub fn close_modal(&self) {
        self.state.update(|s| {
            s.edit_target = None;
            s.form = FormState::empty(self.config.fields);
            s.modal_open = false;
        });
    }

    pub fn set_field(&self, field: &str, value: String) {
        self.state.update(|s| {
            if !s.form.set(field, value) {
                log::warn!("⚠️ Campo desconocido en el formulario: {}", field);
            }
        });
    }

    pub fn request_delete(&self, id: EntityId) {
        self.state.update(|s| s.pending_delete = Some(id));
    }

    pub fn cancel_delete(&self) {
        self.state.update(|s| s.pending_delete = None);
    }

    pub fn dismiss_alert(&self) {
        self.alert_timer.borrow_mut().take();
        self.state.update(|s| {
            if matches!(s.phase, Phase::Error(_) | Phase::Success(_)) {
                s.phase = Phase::Idle;
            }
        });
    }

    /// Desmontaje: nada de lo que llegue después toca el estado
    pub fn dispose(&self) {
        if !self.cancel.is_cancelled() {
            log::debug!("Desmontando pantalla de {}", self.config.plural);
        }
        self.cancel.cancel();
        self.alert_timer.borrow_mut().take();
    }

    // ------------------------------------------------------------------

    fn begin(&self) -> Result<FlightGuard<'_>, Dispatch> {
        if self.cancel.is_cancelled() {
            return Err(Dispatch::Disposed);
        }
        if self.in_flight.get() {
            log::warn!("⏳ Acción ignorada: ya hay una en curso");
            return Err(Dispatch::Busy);
        }
        self.in_flight.set(true);
        self.alert_timer.borrow_mut().take();
        self.state.update(|s| s.phase = Phase::Loading);
        Ok(FlightGuard(&self.in_flight))
    }

    /// Paso 1 de la máquina de estados. Si falla no se tocan los datos.
    async fn fetch(&self) -> Fetch {
        let result = self.client.list().await;
        if self.cancel.is_cancelled() {
            log::debug!("Pantalla desmontada, se descarta el listado");
            return Fetch::Disposed;
        }

        match result {
            Ok(items) => {
                log::info!("✅ {} cargados: {}", self.config.plural, items.len());
                self.state.update(|s| {
                    s.data = items;
                    s.loaded = true;
                    s.phase = Phase::Idle;
                });
                Fetch::Loaded
            }
            Err(e) => {
                log::error!("❌ {}: {}", self.config.messages.fetch_failed, e);
                self.state
                    .update(|s| s.phase = Phase::Error(self.config.messages.fetch_failed.into()));
                Fetch::Failed
            }
        }
    }

    async fn after_mutation(&self, success_message: &'static str) -> Dispatch {
        match self.fetch().await {
            Fetch::Loaded => {
                self.show_success(success_message);
                Dispatch::Completed
            }
            Fetch::Failed => Dispatch::Completed,
            Fetch::Disposed => Dispatch::Disposed,
        }
    }

    fn show_success(&self, message: &'static str) {
        let generation = self.alert_generation.get() + 1;
        self.alert_generation.set(generation);
        self.state.update(|s| s.phase = Phase::Success(message.into()));

        let state = self.state.clone();
        let current = self.alert_generation.clone();
        let cancel = self.cancel.clone();
        let handle = self.scheduler.schedule(
            self.alert_dismiss_ms,
            Box::new(move || {
                if cancel.is_cancelled() || current.get() != generation {
                    return;
                }
                state.update(|s| {
                    if matches!(s.phase, Phase::Success(_)) {
                        s.phase = Phase::Idle;
                    }
                });
            }),
        );
        *self.alert_timer.borrow_mut() = Some(handle);
    }
}

impl<E: Entity> Drop for ListController<E> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::{ARTICLES, COMPANIES};
    use crate::models::{Company, InventoryItem, Role, User};
    use crate::services::mock_transport::MockTransport;
    use crate::services::Method;
    use crate::state::SessionStore;
    use crate::utils::{ManualScheduler, MemoryStorage};
    use serde_json::json;

    struct Harness<E: Entity> {
        transport: Rc<MockTransport>,
        scheduler: Rc<ManualScheduler>,
        controller: Rc<ListController<E>>,
    }

    fn harness<E: Entity>(config: &'static EntityConfig, parent: Option<EntityId>) -> Harness<E> {
        let transport = MockTransport::new();
        let scheduler = ManualScheduler::new();
        let session = SessionStore::new(Rc::new(MemoryStorage::new()));
        session.login("t1".into(), User::with_role(Role::Administrator)).unwrap();

        let collection = config.collection.resolve(parent).unwrap();
        let client = ResourceClient::new(transport.clone(), session, "http://api", collection);
        let controller = Rc::new(ListController::new(config, client, scheduler.clone(), 3_000));
        Harness { transport, scheduler, controller }
    }

    fn company_json(id: u64, name: &str) -> serde_json::Value {
        json!({"id": id, "nit": "900", "name": name, "address": "Calle 1", "phone": "555"})
    }

    #[tokio::test]
    async fn mount_loads_data_in_server_order() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport
            .push_json(200, json!([company_json(3, "Zeta"), company_json(1, "Alfa")]));

        assert_eq!(h.controller.mount().await, Dispatch::Completed);

        let state = h.controller.snapshot();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.data.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), ["Zeta", "Alfa"]);
        assert!(!state.shows_empty_message());
        assert!(!h.controller.is_busy());
    }

    #[tokio::test]
    async fn empty_list_shows_empty_message() {
        let h = harness::<InventoryItem>(&ARTICLES, Some(4));
        h.transport.push_json(200, json!([]));

        h.controller.mount().await;

        let state = h.controller.snapshot();
        assert!(state.shows_empty_message());
        assert_eq!(h.transport.last().unwrap().url, "http://api/companies/4/articles/");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_data() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([company_json(1, "Alfa")]));
        h.transport.push_status(500);

        h.controller.mount().await;
        h.controller.refresh().await;

        let state = h.controller.snapshot();
        assert_eq!(state.phase, Phase::Error("Error al obtener las empresas".into()));
        assert_eq!(state.data.len(), 1);
    }

    #[tokio::test]
    async fn add_submit_posts_fields_closes_modal_and_refetches_once() {
        let h = harness::<InventoryItem>(&ARTICLES, Some(2));
        h.transport.push_json(200, json!([]));
        h.controller.mount().await;

        h.controller.open_create();
        h.controller.set_field("name", "Martillo".into());
        h.controller.set_field("price", "12.5".into());
        h.controller.set_field("quantity", "3".into());

        h.transport.push_status(201);
        h.transport
            .push_json(200, json!([{"id": 1, "name": "Martillo", "price": 12.5, "quantity": 3}]));

        assert_eq!(h.controller.submit().await, Dispatch::Completed);

        let post = &h.transport.requests()[1];
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.url, "http://api/companies/2/articles/");
        assert_eq!(post.body, Some(json!({"name": "Martillo", "price": 12.5, "quantity": 3})));
        assert_eq!(h.transport.count(Method::Get), 2);

        let state = h.controller.snapshot();
        assert!(!state.modal_open);
        assert_eq!(state.edit_target, None);
        assert!(state.form.is_blank());
        assert_eq!(state.data.len(), 1);
        assert_eq!(state.phase, Phase::Success("Artículo guardado exitosamente.".into()));
    }

    #[tokio::test]
    async fn failed_edit_keeps_modal_open_with_values() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([company_json(5, "Acme")]));
        h.controller.mount().await;

        let acme = h.controller.snapshot().data[0].clone();
        h.controller.open_edit(&acme);
        h.controller.set_field("phone", "777".into());

        h.transport.push_status(500);
        h.controller.submit().await;

        let put = h.transport.last().unwrap();
        assert_eq!(put.method, Method::Put);
        assert_eq!(put.url, "http://api/companies/5");

        let state = h.controller.snapshot();
        assert!(state.modal_open);
        assert_eq!(state.edit_target, Some(5));
        assert_eq!(state.form.get("name"), "Acme");
        assert_eq!(state.form.get("phone"), "777");
        assert_eq!(state.phase, Phase::Error("Error al guardar la empresa".into()));
        assert_eq!(h.transport.count(Method::Get), 1);
    }

    #[tokio::test]
    async fn closing_the_modal_resets_edit_target() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([company_json(5, "Acme")]));
        h.controller.mount().await;

        let acme = h.controller.snapshot().data[0].clone();
        h.controller.open_edit(&acme);
        assert_eq!(h.controller.snapshot().form.get("nit"), "900");

        h.controller.close_modal();
        let state = h.controller.snapshot();
        assert_eq!(state.edit_target, None);
        assert!(!state.modal_open);
        assert!(state.form.is_blank());

        h.controller.open_edit(&acme);
        h.controller.open_create();
        assert_eq!(h.controller.snapshot().edit_target, None);
    }

    #[tokio::test]
    async fn delete_requires_confirmation_then_refetches() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([company_json(5, "Acme")]));
        h.controller.mount().await;

        assert_eq!(h.controller.confirm_delete().await, Dispatch::Nothing);

        h.controller.request_delete(5);
        h.controller.cancel_delete();
        assert_eq!(h.controller.confirm_delete().await, Dispatch::Nothing);
        assert_eq!(h.transport.count(Method::Delete), 0);

        h.controller.request_delete(5);
        h.transport.push_status(204);
        h.transport.push_json(200, json!([]));
        assert_eq!(h.controller.confirm_delete().await, Dispatch::Completed);

        assert_eq!(h.transport.count(Method::Delete), 1);
        assert_eq!(h.transport.count(Method::Get), 2);
        let state = h.controller.snapshot();
        assert_eq!(state.pending_delete, None);
        assert!(state.data.is_empty());
        assert_eq!(state.phase, Phase::Success("La empresa se eliminó correctamente".into()));
    }

    #[tokio::test]
    async fn failed_delete_reports_error_without_refetch() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([company_json(5, "Acme")]));
        h.controller.mount().await;

        h.transport.push_status(500);
        h.controller.delete(5).await;

        assert_eq!(
            h.controller.snapshot().phase,
            Phase::Error("Error al eliminar la empresa".into())
        );
        assert_eq!(h.transport.count(Method::Get), 1);
        assert_eq!(h.controller.snapshot().data.len(), 1);
    }

    #[tokio::test]
    async fn refetch_failure_after_save_surfaces_fetch_error() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([]));
        h.controller.mount().await;

        h.controller.open_create();
        h.transport.push_status(201);
        h.transport.push_network_error();
        h.controller.submit().await;

        let state = h.controller.snapshot();
        assert!(!state.modal_open);
        assert_eq!(state.phase, Phase::Error("Error al obtener las empresas".into()));
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn success_alert_clears_itself_after_delay() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([]));
        h.controller.mount().await;

        h.controller.open_create();
        h.transport.push_status(201);
        h.transport.push_json(200, json!([]));
        h.controller.submit().await;

        assert!(matches!(h.controller.snapshot().phase, Phase::Success(_)));
        assert_eq!(h.scheduler.last_delay(), Some(3_000));

        assert_eq!(h.scheduler.fire_all(), 1);
        assert_eq!(h.controller.snapshot().phase, Phase::Idle);
    }

    #[tokio::test]
    async fn dispose_cancels_pending_alert_timer() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([]));
        h.controller.mount().await;

        h.controller.request_delete(1);
        h.transport.push_status(204);
        h.transport.push_json(200, json!([]));
        h.controller.confirm_delete().await;
        assert_eq!(h.scheduler.pending(), 1);

        h.controller.dispose();
        assert_eq!(h.scheduler.pending(), 0);
        assert_eq!(h.scheduler.fire_all(), 0);
        assert!(matches!(h.controller.snapshot().phase, Phase::Success(_)));
    }

    #[tokio::test]
    async fn a_new_action_supersedes_the_previous_alert_timer() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([]));
        h.controller.mount().await;

        h.controller.request_delete(1);
        h.transport.push_status(204);
        h.transport.push_json(200, json!([]));
        h.controller.confirm_delete().await;

        // el refresh empieza antes de que venza el timer y falla
        h.transport.push_status(500);
        h.controller.refresh().await;
        h.scheduler.fire_all();

        assert_eq!(
            h.controller.snapshot().phase,
            Phase::Error("Error al obtener las empresas".into())
        );
    }

    #[tokio::test]
    async fn responses_after_dispose_do_not_touch_state() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([company_json(1, "Alfa")]));

        let controller = h.controller.clone();
        h.transport.on_send(move |_| controller.dispose());

        assert_eq!(h.controller.mount().await, Dispatch::Disposed);
        let state = h.controller.snapshot();
        assert!(state.data.is_empty());
        assert_eq!(state.phase, Phase::Loading);

        assert_eq!(h.controller.refresh().await, Dispatch::Disposed);
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn flight_guard_is_held_during_the_request_and_released_after() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_json(200, json!([]));

        let controller = h.controller.clone();
        let busy_during_send = Rc::new(Cell::new(None));
        let seen = busy_during_send.clone();
        h.transport.on_send(move |_| {
            if seen.get().is_none() {
                seen.set(Some(controller.is_busy()));
            }
        });

        h.controller.mount().await;
        assert_eq!(busy_during_send.get(), Some(true));
        assert!(!h.controller.is_busy());
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn busy_controller_rejects_submit() {
        let h = harness::<Company>(&COMPANIES, None);
        h.controller.in_flight.set(true);
        h.controller.open_create();

        assert_eq!(h.controller.submit().await, Dispatch::Busy);
        assert_eq!(h.controller.delete(3).await, Dispatch::Busy);
        assert!(h.transport.requests().is_empty());
        assert!(h.controller.snapshot().modal_open);
        assert_eq!(h.controller.snapshot().phase, Phase::Idle);
    }

    #[tokio::test]
    async fn dismissing_an_error_returns_to_idle() {
        let h = harness::<Company>(&COMPANIES, None);
        h.transport.push_network_error();
        h.controller.mount().await;
        assert!(matches!(h.controller.snapshot().phase, Phase::Error(_)));

        h.controller.dismiss_alert();
        assert_eq!(h.controller.snapshot().phase, Phase::Idle);
    }
}
