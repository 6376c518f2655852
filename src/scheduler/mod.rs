mod state;
mod handle;
mod scheduler;

pub use handle::Handle;
pub use scheduler::Scheduler;
