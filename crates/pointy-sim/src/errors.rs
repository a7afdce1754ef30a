//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Error taxonomy for simulator construction."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("{name} must lie within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("alert retention must keep at least one alert")]
    ZeroRetention,
    #[error("employee simulator must touch at least one record per tick")]
    ZeroMutations,
    #[error("relocation zone list is empty")]
    EmptyRelocationZones,
}

pub(crate) fn bernoulli(name: &'static str, value: f64) -> Result<rand_distr::Bernoulli> {
    rand_distr::Bernoulli::new(value)
        .map_err(|_| SimulationError::InvalidProbability { name, value })
}
