//! `sc-core` — foundational types for the `syncity` scenario generator.
//!
//! This crate is a dependency of every other `sc-*` crate.  It has no `sc-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `EdgeId`, `LatticeCoord`         |
//! | [`geo`]         | `Point2`, planar Euclidean distance                   |
//! | [`time`]        | seconds-of-day parsing and formatting                 |
//! | [`rng`]         | `ScenarioRng` (the single ordered draw stream)        |
//! | [`transport`]   | `TransportMode` enum                                  |
//! | [`error`]       | `ScError`, `ScResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ScError, ScResult};
pub use geo::Point2;
pub use ids::{AgentId, EdgeId, LatticeCoord, NodeId};
pub use rng::{DEFAULT_SEED, ScenarioRng};
pub use time::{SECONDS_IN_HOUR, format_time_of_day, hours_to_secs, parse_time_of_day};
pub use transport::TransportMode;
