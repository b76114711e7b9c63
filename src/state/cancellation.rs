use std::cell::Cell;
use std::rc::Rc;

/// Bandera de cancelación compartida entre una pantalla y sus tareas.
/// Una vez cancelada no vuelve atrás.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_from_clones() {
        let token = CancelToken::new();
        let task_view = token.clone();
        assert!(!task_view.is_cancelled());
        token.cancel();
        assert!(task_view.is_cancelled());
    }
}
