//! Scenario configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "seed": 7, "network": { "num_streets": 20, "num_avenues": 20 },
//!   "population": { "pop_size": 2000 }, "sample_fractions": [0.1, 0.5] }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use sc_core::DEFAULT_SEED;
use sc_grid::GridConfig;
use sc_population::PopulationConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,

    /// Scenario directory name under `output_dir`.
    pub title: String,

    pub output_dir: PathBuf,

    pub network: GridConfig,

    pub population: PopulationConfig,

    /// One extra down-sampled population file per entry, each in `(0, 1]`.
    pub sample_fractions: Vec<f64>,

    /// Also write the population as a plan CSV.
    pub write_csv: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed:             DEFAULT_SEED,
            title:            "GridScenario".into(),
            output_dir:       PathBuf::from("output"),
            network:          GridConfig::default(),
            population:       PopulationConfig::default(),
            sample_fractions: Vec::new(),
            write_csv:        true,
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> Result<()> {
        for &f in &self.sample_fractions {
            ensure!(f > 0.0 && f <= 1.0, "sample fraction {f} is outside (0, 1]");
        }
        ensure!(!self.title.is_empty(), "scenario title must not be empty");
        Ok(())
    }

    /// Directory that receives every file of this scenario.
    pub fn scenario_dir(&self) -> PathBuf {
        self.output_dir.join(&self.title)
    }
}

/// `Population-1000-k0.25` for a 25 % sample of `Population-1000`.
pub fn sample_title(pop_title: &str, fraction: f64) -> String {
    format!("{pop_title}-k{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ScenarioConfig =
            serde_json::from_str(r#"{ "seed": 7, "network": { "num_streets": 4 } }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.network.num_streets, 4);
        assert_eq!(cfg.network.num_avenues, 100);
        assert_eq!(cfg.population, PopulationConfig::default());
        assert!(cfg.write_csv);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        std::fs::write(&path, r#"{ "title": "tiny", "sample_fractions": [0.5] }"#).unwrap();
        let cfg = ScenarioConfig::load(&path).unwrap();
        assert_eq!(cfg.scenario_dir(), PathBuf::from("output").join("tiny"));
        assert_eq!(cfg.sample_fractions, vec![0.5]);
    }

    #[test]
    fn bad_fraction_rejected() {
        let cfg = ScenarioConfig { sample_fractions: vec![0.0], ..ScenarioConfig::default() };
        assert!(cfg.check().is_err());
        let cfg = ScenarioConfig { sample_fractions: vec![1.5], ..ScenarioConfig::default() };
        assert!(cfg.check().is_err());
    }

    #[test]
    fn sample_titles() {
        assert_eq!(sample_title("Population-1000", 0.25), "Population-1000-k0.25");
        assert_eq!(sample_title("Population-1000", 1.0), "Population-1000-k1");
    }
}
