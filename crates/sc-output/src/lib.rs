//! `sc-output` — scenario file writers for the syncity generator.
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`writer`] | `ScenarioWriter` trait, `resolve_output_path`, `downsample`     |
//! | [`xml`]    | `MatsimXmlWriter` (network_v2 / population_v6)                  |
//! | [`stats`]  | `DistanceInfo`, `NodesStats`, `linkLengthDistribution` CSVs     |
//! | [`error`]  | `OutputError`, `OutputResult<T>`                                |
//!
//! # Usage
//!
//! ```rust,ignore
//! use sc_output::{MatsimXmlWriter, ScenarioWriter};
//!
//! let mut writer = MatsimXmlWriter::new();
//! let net_path = writer.write_network(&net, Path::new("./output/"), &grid.title())?;
//! let out = writer.write_population(&net, &synth.population, Path::new("./output/"),
//!                                   &pop.title(), 1.0, &mut rng)?;
//! sc_output::write_distance_info(&synth.distances, Path::new("./output"), &pop.title())?;
//! ```

pub mod error;
pub mod stats;
pub mod writer;
pub mod xml;

#[cfg(test)]
mod tests;

pub use error::{OutputError, OutputResult};
pub use stats::{write_distance_info, write_link_length_distribution, write_node_stats};
pub use writer::{PopulationOutput, ScenarioWriter, downsample, resolve_output_path};
pub use xml::{MatsimXmlWriter, write_network_xml, write_population_xml};
