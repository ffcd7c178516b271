pub mod scheduler;

pub use scheduler::wrr::{wrr_schedule, wrr_schedule_with};
pub use scheduler::{AllocOutcome, CursorPolicy, Ue, UeAllocator};
