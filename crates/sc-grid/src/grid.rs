//! Synthetic lattice generator.
//!
//! # Construction order
//!
//! Vertices are created street-major (`s` outer, `a` inner).  Each vertex
//! draws its x jitter then its y jitter from the shared [`ScenarioRng`], and
//! is immediately connected to its already-created neighbours `(s, a-1)` and
//! `(s-1, a)`.  This fixes the order of RNG draws and of edge ids, which is
//! what makes a scenario reproducible from `(config, seed)` alone.
//!
//! # Edge physics
//!
//! ```text
//! length      = |pos(from) - pos(to)|            (jittered positions)
//! travel_time = length / speed_kmh * 3.6          [s]
//! freespeed   = length / (travel_time - 0.1)      [m/s]
//! ```
//!
//! The 0.1 s margin lets an agent clear the link inside one simulation step.
//! A link whose travel time does not exceed the margin is rejected.

use log::info;

use sc_core::{LatticeCoord, NodeId, Point2, ScenarioRng};

use crate::{GridError, GridResult, RoadNetwork, RoadNetworkBuilder};

/// Travel-time margin subtracted before deriving freespeed, seconds.
pub const FREESPEED_MARGIN_SECS: f64 = 0.1;

// ── GridConfig ────────────────────────────────────────────────────────────────

/// Parameters of a synthetic lattice network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of streets (x direction).
    pub num_streets: u32,
    /// Number of avenues (y direction).
    pub num_avenues: u32,
    /// Nominal spacing between adjacent lattice points, metres.
    pub link_length_m: f64,
    /// Jitter half-window as a fraction of `link_length_m`.  Ratios of `0.5` or
    /// more let neighbours cross; a link that ends up too short still fails
    /// with [`GridError::TravelTimeTooShort`].
    pub jitter_ratio: f64,
    /// Link capacity, vehicles per hour.
    pub capacity_veh_h: f64,
    /// Drive speed on links joining `(s, a)` to `(s, a-1)`, km/h.
    pub street_speed_kmh: f64,
    /// Drive speed on links joining `(s, a)` to `(s-1, a)`, km/h.
    pub avenue_speed_kmh: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            num_streets:      100,
            num_avenues:      100,
            link_length_m:    100.0,
            jitter_ratio:     0.4,
            capacity_veh_h:   1_800.0,
            street_speed_kmh: 15.0,
            avenue_speed_kmh: 15.0,
        }
    }
}

impl GridConfig {
    /// Default file stem, e.g. `GridNetwork-100_100`.
    pub fn title(&self) -> String {
        format!("GridNetwork-{}_{}", self.num_streets, self.num_avenues)
    }

    /// Expected vertex count: `S·A`.
    pub fn expected_nodes(&self) -> usize {
        self.num_streets as usize * self.num_avenues as usize
    }

    /// Expected directed edge count: `2·(S·(A−1) + (S−1)·A)`.
    pub fn expected_edges(&self) -> usize {
        let s = self.num_streets as usize;
        let a = self.num_avenues as usize;
        2 * (s * a.saturating_sub(1) + s.saturating_sub(1) * a)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.num_streets == 0 || self.num_avenues == 0 {
            return Err(GridError::Config(format!(
                "grid must have at least one street and one avenue (got {}x{})",
                self.num_streets, self.num_avenues
            )));
        }
        if !(self.link_length_m > 0.0) {
            return Err(GridError::Config(format!(
                "link_length_m must be positive (got {})",
                self.link_length_m
            )));
        }
        if !(self.jitter_ratio >= 0.0 && self.jitter_ratio.is_finite()) {
            return Err(GridError::Config(format!(
                "jitter_ratio must be finite and non-negative (got {})",
                self.jitter_ratio
            )));
        }
        if !(self.capacity_veh_h > 0.0) {
            return Err(GridError::Config(format!(
                "capacity_veh_h must be positive (got {})",
                self.capacity_veh_h
            )));
        }
        if !(self.street_speed_kmh > 0.0) || !(self.avenue_speed_kmh > 0.0) {
            return Err(GridError::Config(format!(
                "drive speeds must be positive (street {}, avenue {})",
                self.street_speed_kmh, self.avenue_speed_kmh
            )));
        }
        Ok(())
    }
}

// ── Edge physics ──────────────────────────────────────────────────────────────

/// `(travel_time_s, freespeed_mps)` for a link of `length_m` at `speed_kmh`.
///
/// Fails with [`GridError::TravelTimeTooShort`] when the travel time does not
/// exceed [`FREESPEED_MARGIN_SECS`]; `from`/`to` only label the error.
pub fn edge_physics(
    length_m:  f64,
    speed_kmh: f64,
    from:      LatticeCoord,
    to:        LatticeCoord,
) -> GridResult<(f64, f64)> {
    let travel_time_s = length_m / speed_kmh * 3.6;
    if !(travel_time_s > FREESPEED_MARGIN_SECS) {
        return Err(GridError::TravelTimeTooShort { from, to, travel_time_s });
    }
    Ok((travel_time_s, length_m / (travel_time_s - FREESPEED_MARGIN_SECS)))
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Build the jittered lattice described by `config`, drawing from `rng`.
pub fn generate_grid(config: &GridConfig, rng: &mut ScenarioRng) -> GridResult<RoadNetwork> {
    config.validate()?;

    let mut b = RoadNetworkBuilder::with_capacity(config.expected_nodes(), config.expected_edges());
    let spacing = config.link_length_m;
    let jitter  = spacing * config.jitter_ratio;

    for s in 0..config.num_streets {
        for a in 0..config.num_avenues {
            let coord = LatticeCoord::new(s, a);
            let x = rng.rand_around_base(f64::from(s) * spacing, jitter);
            let y = rng.rand_around_base(f64::from(a) * spacing, jitter);
            let node = b.add_node(coord, Point2::new(x, y));

            if a > 0 {
                let prev = neighbour(&b, LatticeCoord::new(s, a - 1))?;
                connect(&mut b, node, prev, config.street_speed_kmh, config.capacity_veh_h)?;
            }
            if s > 0 {
                let prev = neighbour(&b, LatticeCoord::new(s - 1, a))?;
                connect(&mut b, node, prev, config.avenue_speed_kmh, config.capacity_veh_h)?;
            }
        }
    }

    let net = b.build();
    info!(
        "generated {}: {} nodes, {} links",
        config.title(),
        net.node_count(),
        net.edge_count()
    );
    Ok(net)
}

fn neighbour(b: &RoadNetworkBuilder, coord: LatticeCoord) -> GridResult<NodeId> {
    b.node_at(coord).ok_or(GridError::UnknownCoord(coord))
}

/// Add `src -> dst` and `dst -> src` with physics derived from the jittered
/// endpoint positions.
fn connect(
    b:         &mut RoadNetworkBuilder,
    src:       NodeId,
    dst:       NodeId,
    speed_kmh: f64,
    capacity:  f64,
) -> GridResult<()> {
    let length_m = b.node_pos(src).distance_m(b.node_pos(dst));
    let (_, freespeed) = edge_physics(length_m, speed_kmh, b.node_coord(src), b.node_coord(dst))?;
    b.add_road(src, dst, length_m, capacity, freespeed);
    Ok(())
}
