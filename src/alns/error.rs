//! Errors raised by repair operators and the search loop.

use crate::construct::ConstructionError;
use std::fmt;
use std::io;

/// Internal-consistency failure inside a repair operator.
///
/// These indicate a bug or an unsupported topology (some component pair
/// truly unreachable), never a normal outcome; the operator aborts rather
/// than return a degraded solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairError {
    /// No terminal outside the base component is reachable.
    NoReachableTerminal { base_component: usize },
    /// Path reconstruction towards `target` produced no edges.
    EmptyPath { target: usize },
    /// The minimum spanning tree over components does not span them.
    DisconnectedComponentTree { components: usize },
    /// Neither direction of a component MST edge recorded a target.
    MissingTarget { from: usize, to: usize },
    /// An output edge has no weight in the instance.
    UnknownEdge { u: usize, v: usize },
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairError::NoReachableTerminal { base_component } => write!(
                f,
                "no terminal outside component {base_component} is reachable"
            ),
            RepairError::EmptyPath { target } => {
                write!(f, "reconstructed path to vertex {target} is empty")
            }
            RepairError::DisconnectedComponentTree { components } => write!(
                f,
                "minimum spanning tree over {components} components is disconnected"
            ),
            RepairError::MissingTarget { from, to } => write!(
                f,
                "no path target recorded between components {from} and {to}"
            ),
            RepairError::UnknownEdge { u, v } => {
                write!(f, "edge ({u}, {v}) is not an instance edge")
            }
        }
    }
}

impl std::error::Error for RepairError {}

/// Failure that aborts a search run.
#[derive(Debug)]
pub enum SearchError {
    /// The configuration failed validation.
    InvalidConfig(String),
    /// The resolved reference cost for relative gaps is not positive.
    InvalidReferenceCost(f64),
    /// A destroy or repair operator pool is empty.
    EmptyOperatorPool(&'static str),
    /// The initial solution could not be built.
    Construction(ConstructionError),
    /// The initial solution has an edge endpoint outside the instance.
    InitialVertexOutOfRange { u: usize, v: usize, num_vertices: usize },
    /// A repair operator hit an invariant violation.
    Repair(RepairError),
    /// The iteration log could not be written.
    Sink(io::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidConfig(msg) => write!(f, "invalid search configuration: {msg}"),
            SearchError::InvalidReferenceCost(c) => {
                write!(f, "reference cost must be positive, got {c}")
            }
            SearchError::EmptyOperatorPool(kind) => {
                write!(f, "at least one {kind} operator required")
            }
            SearchError::Construction(e) => write!(f, "initial solution: {e}"),
            SearchError::InitialVertexOutOfRange { u, v, num_vertices } => write!(
                f,
                "initial solution edge ({u}, {v}) leaves the {num_vertices} instance vertices"
            ),
            SearchError::Repair(e) => write!(f, "repair failed: {e}"),
            SearchError::Sink(e) => write!(f, "iteration log: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Construction(e) => Some(e),
            SearchError::Repair(e) => Some(e),
            SearchError::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConstructionError> for SearchError {
    fn from(e: ConstructionError) -> Self {
        SearchError::Construction(e)
    }
}

impl From<RepairError> for SearchError {
    fn from(e: RepairError) -> Self {
        SearchError::Repair(e)
    }
}

impl From<io::Error> for SearchError {
    fn from(e: io::Error) -> Self {
        SearchError::Sink(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let e = RepairError::NoReachableTerminal { base_component: 2 };
        assert!(e.to_string().contains("component 2"));
        let s: SearchError = e.into();
        assert!(s.to_string().starts_with("repair failed"));
        assert!(s.source().is_some());
    }

    #[test]
    fn test_config_error_has_no_source() {
        let s = SearchError::InvalidConfig("cooling_rate".into());
        assert!(s.source().is_none());
        assert!(s.to_string().contains("cooling_rate"));
    }
}
