pub mod session_context;
pub mod use_list_screen;
pub mod use_route;
pub mod use_session;

pub use session_context::SessionContextProvider;
pub use use_list_screen::use_list_screen;
pub use use_route::{use_route, UseRouteHandle};
pub use use_session::{use_session, UseSessionHandle};
