pub mod alert_banner;
pub mod app;
pub mod entity_form_modal;
pub mod entity_list;
pub mod login_screen;

pub use alert_banner::AlertBanner;
pub use app::App;
pub use entity_form_modal::EntityFormModal;
pub use entity_list::EntityList;
pub use login_screen::LoginScreen;
