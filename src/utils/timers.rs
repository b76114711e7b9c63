use std::any::Any;

use gloo_timers::callback::Timeout;

/// Programa tareas diferidas. Soltar el `TimerHandle` cancela la tarea.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;
}

pub struct TimerHandle {
    _guard: Box<dyn Any>,
}

impl TimerHandle {
    pub fn new(guard: impl Any) -> Self {
        Self { _guard: Box::new(guard) }
    }

    /// La tarea queda programada sin dueño; ya no se puede cancelar
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

/// `setTimeout` vía gloo-timers; el `Timeout` se cancela en su Drop
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::new(Timeout::new(delay_ms, task))
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;
