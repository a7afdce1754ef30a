//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Runtime helpers driving the simulators."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Clocks and tick scheduling for the pointy simulators.

pub mod clock;
pub mod scheduling;

pub use clock::{Clock, ManualClock, RuntimeClock, SharedClock, SystemClock};
pub use scheduling::{RateLimiter, SchedulingError, SimulatorState, TickingTask};
