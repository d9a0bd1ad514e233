use thiserror::Error;

use sc_core::{AgentId, NodeId};

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("population configuration error: {0}")]
    Config(String),

    #[error("cannot place agents on an empty network")]
    EmptyNetwork,

    #[error("node {0} has no incoming link to anchor an activity on")]
    NoInEdge(NodeId),

    /// No two nodes can be that far apart, checked before any draw.
    #[error(
        "minimum home-work distance of {min_distance_m} m exceeds the network \
         extent of {extent_m:.1} m"
    )]
    OdBeyondExtent {
        min_distance_m: f64,
        extent_m:       f64,
    },

    /// Rejection sampling gave up looking for a work node far enough from home.
    #[error(
        "no work location at least {min_distance_m} m from home for {agent} \
         after {attempts} draws (network too small for the minimum OD distance?)"
    )]
    UnsatisfiableOd {
        agent:          AgentId,
        attempts:       u32,
        min_distance_m: f64,
    },

    #[error("unknown link id {0:?}")]
    UnknownLink(String),

    #[error("plan parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
