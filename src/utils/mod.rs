// Utils compartidos

pub mod constants;
pub mod storage;
pub mod timers;

pub use constants::*;
pub use storage::*;
pub use timers::*;
