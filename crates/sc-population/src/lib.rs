//! `sc-population` — synthetic agents, their daily plans, and CSV plan I/O.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`plan`]       | `ActivityKind`, `Activity`, `Leg`, `Plan`, `build_plan`    |
//! | [`population`] | `Agent`, `Population`                                      |
//! | [`config`]     | `PopulationConfig`                                         |
//! | [`synth`]      | `synthesize`, `Synthesis`, `DistanceHistogram`, `UsageCounts` |
//! | [`csv_io`]     | `write_population_csv`, `read_population_csv`              |
//! | [`error`]      | `PopulationError`, `PopulationResult<T>`                   |
//!
//! # Pipeline (summary)
//!
//! ```text
//! RoadNetwork + PopulationConfig + &mut ScenarioRng
//!     └─ synthesize ─► Synthesis { population, distances, usage }
//!
//! plan CSV + RoadNetwork
//!     └─ read_population_csv ─► Population
//! ```
//!
//! Both paths build plans through [`build_plan`].

pub mod config;
pub mod csv_io;
pub mod error;
pub mod plan;
pub mod population;
pub mod synth;


pub use config::PopulationConfig;
pub use csv_io::{PLAN_CSV_HEADER, read_population_csv, read_population_reader, write_population_csv};
pub use error::{PopulationError, PopulationResult};
pub use plan::{Activity, ActivityKind, Leg, Plan, PlanElement, build_plan};
pub use population::{Agent, Population};
pub use synth::{DistanceHistogram, Role, Synthesis, UsageCounts, synthesize};
