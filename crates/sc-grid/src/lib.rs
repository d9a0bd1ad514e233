//! `sc-grid` — road network and synthetic lattice generation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR out/in adjacency), `RoadNetworkBuilder`  |
//! | [`grid`]    | `GridConfig`, `generate_grid`, edge physics                 |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GridConfig`.           |

pub mod error;
pub mod grid;
pub mod network;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{FREESPEED_MARGIN_SECS, GridConfig, edge_physics, generate_grid};
pub use network::{RoadNetwork, RoadNetworkBuilder};
