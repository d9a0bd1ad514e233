//! Population synthesis with a minimum home-work distance.
//!
//! # Draw order
//!
//! For each agent, in `AgentId` order, the synthesizer consumes the shared
//! [`ScenarioRng`] as follows:
//!
//! ```text
//! home          = below(node_count)
//! work          = below(node_count)      redrawn while dist(home, work) < min
//! leave_home_h  = rand_in_window(leave_home_base_h, leave_home_window_h)
//! workday_h     = rand_in_window(workday_base_h,    workday_window_h)
//! ```
//!
//! Given the same network, config and seed the resulting population is
//! identical, down to the departure times.
//!
//! # Rejection bound
//!
//! At most `max_work_draws` work candidates are drawn per agent.  A network
//! whose bounding-box diagonal is shorter than the minimum distance is rejected
//! up front, before any agent is drawn.

use std::collections::BTreeMap;

use log::{info, warn};

use sc_core::{AgentId, NodeId, ScenarioRng, hours_to_secs};
use sc_grid::RoadNetwork;

use crate::config::PopulationConfig;
use crate::plan::build_plan;
use crate::population::Population;
use crate::{PopulationError, PopulationResult};

// ── Role ──────────────────────────────────────────────────────────────────────

/// Which end of the commute a node was used for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Home,
    Work,
}

impl Role {
    /// Numeric code used in the node statistics file.
    pub fn code(self) -> u8 {
        match self {
            Role::Home => 0,
            Role::Work => 1,
        }
    }
}

// ── DistanceHistogram ─────────────────────────────────────────────────────────

/// Home-work distances bucketed to the nearest whole metre.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceHistogram(BTreeMap<i64, u64>);

impl DistanceHistogram {
    pub fn record(&mut self, distance_m: f64) {
        *self.0.entry(distance_m.round() as i64).or_insert(0) += 1;
    }

    pub fn count(&self, bucket_m: i64) -> u64 {
        self.0.get(&bucket_m).copied().unwrap_or(0)
    }

    /// Sum over all buckets; equals the number of recorded agents.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// `(bucket, count)` pairs in ascending bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── UsageCounts ───────────────────────────────────────────────────────────────

/// How many agents live or work at each node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageCounts(BTreeMap<(NodeId, Role), u64>);

impl UsageCounts {
    pub fn record(&mut self, node: NodeId, role: Role) {
        *self.0.entry((node, role)).or_insert(0) += 1;
    }

    pub fn count(&self, node: NodeId, role: Role) -> u64 {
        self.0.get(&(node, role)).copied().unwrap_or(0)
    }

    /// Sum of the counts recorded for `role`.
    pub fn total(&self, role: Role) -> u64 {
        self.0.iter().filter(|((_, r), _)| *r == role).map(|(_, &c)| c).sum()
    }

    /// `((node, role), count)` in ascending `(node, role)` order.
    pub fn iter(&self) -> impl Iterator<Item = ((NodeId, Role), u64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

/// Everything a synthesis run produces.
#[derive(Clone, Debug, Default)]
pub struct Synthesis {
    pub population: Population,
    pub distances:  DistanceHistogram,
    pub usage:      UsageCounts,
    /// Exact home-work distance per agent, indexed by `AgentId`.
    od_distances: Vec<f64>,
}

impl Synthesis {
    /// Home-work distance of `agent` in metres.
    pub fn od_distance(&self, agent: AgentId) -> Option<f64> {
        self.od_distances.get(agent.index()).copied()
    }
}

// ── Synthesizer ───────────────────────────────────────────────────────────────

/// Place `config.pop_size` agents on `net`.
///
/// # Errors
///
/// - [`PopulationError::Config`] for invalid parameters.
/// - [`PopulationError::EmptyNetwork`] when `net` has no nodes.
/// - [`PopulationError::OdBeyondExtent`] when the minimum distance exceeds the
///   network's bounding-box diagonal.
/// - [`PopulationError::UnsatisfiableOd`] when no work node far enough from
///   home is found within `max_work_draws` candidates.
/// - [`PopulationError::NoInEdge`] when a drawn node has no incoming link.
pub fn synthesize(
    net:    &RoadNetwork,
    config: &PopulationConfig,
    rng:    &mut ScenarioRng,
) -> PopulationResult<Synthesis> {
    config.validate()?;
    if net.is_empty() {
        return Err(PopulationError::EmptyNetwork);
    }

    let pop_size   = config.pop_size as usize;
    let node_count = net.node_count();
    let min_dist   = config.min_home_work_distance_m;

    if pop_size == 0 {
        return Ok(Synthesis::default());
    }
    let extent_m = net.extent_m();
    if min_dist > extent_m {
        return Err(PopulationError::OdBeyondExtent { min_distance_m: min_dist, extent_m });
    }
    if pop_size < node_count {
        warn!(
            "population of {pop_size} is smaller than the {node_count} network nodes; \
             some nodes will never be used"
        );
    }

    let mut out = Synthesis {
        population:   Population::with_capacity(pop_size),
        distances:    DistanceHistogram::default(),
        usage:        UsageCounts::default(),
        od_distances: Vec::with_capacity(pop_size),
    };

    for i in 0..pop_size {
        let agent = AgentId(i as u32);
        let home  = NodeId(rng.below(node_count) as u32);
        let (work, distance) = draw_work(net, home, agent, config, rng)?;

        let leave_home_h = rng.rand_in_window(config.leave_home_base_h, config.leave_home_window_h);
        let workday_h    = rng.rand_in_window(config.workday_base_h, config.workday_window_h);
        let leave_home_s = hours_to_secs(leave_home_h);
        let leave_work_s = hours_to_secs(leave_home_h + workday_h);

        let home_link = net.first_in_edge(home).map_err(|_| PopulationError::NoInEdge(home))?;
        let work_link = net.first_in_edge(work).map_err(|_| PopulationError::NoInEdge(work))?;
        let plan = build_plan(home_link, work_link, leave_home_s, leave_work_s);

        out.population.push(home, work, plan);
        out.distances.record(distance);
        out.usage.record(home, Role::Home);
        out.usage.record(work, Role::Work);
        out.od_distances.push(distance);
    }

    info!(
        "synthesized {}: {} agents on {} nodes (min OD distance {} m)",
        config.title(),
        out.population.len(),
        node_count,
        min_dist
    );
    Ok(out)
}

/// Rejection-sample a work node at least `min_home_work_distance_m` from home.
fn draw_work(
    net:    &RoadNetwork,
    home:   NodeId,
    agent:  AgentId,
    config: &PopulationConfig,
    rng:    &mut ScenarioRng,
) -> PopulationResult<(NodeId, f64)> {
    for _ in 0..config.max_work_draws {
        let work = NodeId(rng.below(net.node_count()) as u32);
        let distance = net.distance_m(home, work);
        if distance >= config.min_home_work_distance_m {
            return Ok((work, distance));
        }
    }
    Err(PopulationError::UnsatisfiableOd {
        agent,
        attempts:       config.max_work_draws,
        min_distance_m: config.min_home_work_distance_m,
    })
}
