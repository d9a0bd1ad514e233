//! Grid-subsystem error type.

use thiserror::Error;

use sc_core::{LatticeCoord, NodeId};

/// Errors produced by `sc-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid configuration error: {0}")]
    Config(String),

    /// The link is too short for its speed: an agent could not clear it
    /// within one simulation step.
    #[error(
        "travel time {travel_time_s:.4} s on link {from}->{to} must exceed 0.1 s \
         (link length too small for the drive speed)"
    )]
    TravelTimeTooShort {
        from:          LatticeCoord,
        to:            LatticeCoord,
        travel_time_s: f64,
    },

    #[error("no vertex at lattice coordinate {0}")]
    UnknownCoord(LatticeCoord),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("node {0} has no incoming edge to anchor an activity on")]
    NoInEdge(NodeId),
}

pub type GridResult<T> = Result<T, GridError>;
