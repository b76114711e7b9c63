// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod cancellation;
pub mod reactivity;
pub mod session_state;

pub use cancellation::*;
pub use reactivity::*;
pub use session_state::*;
