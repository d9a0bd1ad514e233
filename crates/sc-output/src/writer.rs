//! The `ScenarioWriter` trait, output path resolution, and down-sampling.

use std::path::{Path, PathBuf};

use sc_core::ScenarioRng;
use sc_grid::RoadNetwork;
use sc_population::{Agent, Population};

use crate::OutputResult;

/// Result of a population write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationOutput {
    /// Absolute path of the written file.
    pub path: PathBuf,
    /// Agents that survived down-sampling.
    pub agents_written: usize,
}

/// Serializes a network and a population for the downstream simulator.
///
/// `target` is either a directory, in which case the file is named
/// `<title>.xml` inside it, or a file path.  Missing parent directories are
/// created.  Both methods return the absolute path actually written.
pub trait ScenarioWriter {
    fn write_network(&mut self, net: &RoadNetwork, target: &Path, title: &str) -> OutputResult<PathBuf>;

    /// Write the agents kept by [`downsample`] with `fraction`.
    fn write_population(
        &mut self,
        net:      &RoadNetwork,
        pop:      &Population,
        target:   &Path,
        title:    &str,
        fraction: f64,
        rng:      &mut ScenarioRng,
    ) -> OutputResult<PopulationOutput>;
}

// ── Paths ─────────────────────────────────────────────────────────────────────

/// Turn a write target into an absolute file path, creating directories.
///
/// A target that is an existing directory, or that ends in a path separator,
/// resolves to `<target>/<title>.<ext>`.  Anything else is used as-is.
pub fn resolve_output_path(target: &Path, title: &str, ext: &str) -> OutputResult<PathBuf> {
    let names_dir = target.is_dir()
        || target.as_os_str().to_string_lossy().ends_with(std::path::is_separator);
    let file = if names_dir {
        std::fs::create_dir_all(target)?;
        target.join(format!("{title}.{ext}"))
    } else {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        target.to_path_buf()
    };
    Ok(std::path::absolute(file)?)
}

// ── Down-sampling ─────────────────────────────────────────────────────────────

/// Agents kept when writing a `fraction` of `pop`.
///
/// Each agent is kept independently with probability `fraction`, so the count
/// varies around `fraction · len`.  `fraction >= 1` keeps everyone and
/// `fraction <= 0` keeps no one; neither consumes RNG draws.
pub fn downsample<'a>(pop: &'a Population, fraction: f64, rng: &mut ScenarioRng) -> Vec<&'a Agent> {
    if fraction >= 1.0 {
        return pop.iter().collect();
    }
    if !(fraction > 0.0) {
        return Vec::new();
    }
    pop.iter().filter(|_| rng.gen_bool(fraction)).collect()
}
