mod dtos;
mod event;
mod scheduler;

pub use dtos::*;
pub use event::*;
pub use scheduler::*;
