//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Error taxonomy for feed lifecycle."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use pointy_rt::SchedulingError;
use pointy_sim::SimulationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed {0} is already running")]
    AlreadyRunning(String),
    #[error("feed {0} was stopped and cannot be restarted")]
    Stopped(String),
    #[error("page {0} was not opened on a manual clock")]
    NotReplayable(String),
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
