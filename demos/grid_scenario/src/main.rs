//! grid_scenario — generate one synthetic travel-demand scenario.
//!
//! Usage: `grid_scenario [config.json]`
//!
//! With no argument the default configuration is used: a 100×100 jittered
//! grid and 10 000 commuters, seed 504000.  Output lands in
//! `<output_dir>/<title>/`:
//!
//! ```text
//! GridNetwork-100_100.xml                        network
//! GridNetwork-100_100.linkLengthDistribution.csv
//! Population-10000.xml                           full population
//! Population-10000.DistanceInfo.csv
//! Population-10000.NodesStats.csv
//! Population-10000.csv                           plan CSV (write_csv)
//! Population-10000-k0.1.xml                      one per sample fraction
//! scenario.json                                  resolved configuration
//! ```
//!
//! Set `RUST_LOG=debug` to see every file as it is written.

mod config;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use sc_core::ScenarioRng;
use sc_grid::generate_grid;
use sc_output::{
    MatsimXmlWriter, ScenarioWriter, write_distance_info, write_link_length_distribution,
    write_node_stats,
};
use sc_population::{synthesize, write_population_csv};

use config::{ScenarioConfig, sample_title};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args_os().nth(1) {
        Some(path) => ScenarioConfig::load(&PathBuf::from(path))?,
        None => ScenarioConfig::default(),
    };
    let dir = cfg.scenario_dir();
    let grid_title = cfg.network.title();
    let pop_title = cfg.population.title();

    println!("=== grid_scenario — syncity ===");
    println!(
        "Grid: {}x{}  |  Agents: {}  |  Seed: {}",
        cfg.network.num_streets, cfg.network.num_avenues, cfg.population.pop_size, cfg.seed
    );
    println!("Output: {}", dir.display());
    println!();

    let t0 = Instant::now();
    let mut rng = ScenarioRng::new(cfg.seed);

    // 1. Network.
    let net = generate_grid(&cfg.network, &mut rng)?;
    println!("Road network: {} nodes, {} links", net.node_count(), net.edge_count());

    // 2. Population.
    let synth = synthesize(&net, &cfg.population, &mut rng)?;
    println!("Population:   {} agents", synth.population.len());

    // 3. Files.
    let mut writer = MatsimXmlWriter::new();
    writer.write_network(&net, &dir, &grid_title)?;
    write_link_length_distribution(&net, &dir, &grid_title)?;

    let full = writer.write_population(&net, &synth.population, &dir, &pop_title, 1.0, &mut rng)?;
    write_distance_info(&synth.distances, &dir, &pop_title)?;
    write_node_stats(&synth.usage, &net, &dir, &pop_title)?;
    info!("population file: {}", full.path.display());

    for &fraction in &cfg.sample_fractions {
        let title = sample_title(&pop_title, fraction);
        let out = writer.write_population(&net, &synth.population, &dir, &title, fraction, &mut rng)?;
        println!(
            "Sample {fraction:>5}: {:>7} of {} agents → {}",
            out.agents_written,
            synth.population.len(),
            out.path.display()
        );
    }

    if cfg.write_csv {
        let csv_path = dir.join(format!("{pop_title}.csv"));
        write_population_csv(&synth.population, &net, &csv_path)?;
        info!("plan CSV: {}", csv_path.display());
    }

    let cfg_path = dir.join("scenario.json");
    let file = File::create(&cfg_path).with_context(|| format!("creating {}", cfg_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &cfg)?;

    println!();
    println!("Wrote {} scenario files in {:.2?}", writer.written().len(), t0.elapsed());
    Ok(())
}
