pub mod form_viewmodel;
pub mod list_viewmodel;

pub use form_viewmodel::FormState;
pub use list_viewmodel::{Dispatch, ListController, ListScreenState, Phase};
