//! Tests for sc-output.

use std::collections::HashMap;

use sc_core::ScenarioRng;
use sc_grid::{GridConfig, RoadNetwork, generate_grid};
use sc_population::{PopulationConfig, Synthesis, synthesize};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn example_grid() -> RoadNetwork {
    let cfg = GridConfig {
        num_streets:  3,
        num_avenues:  3,
        jitter_ratio: 0.0,
        ..GridConfig::default()
    };
    generate_grid(&cfg, &mut ScenarioRng::new(1)).unwrap()
}

fn population(net: &RoadNetwork, n: u32, seed: u64) -> Synthesis {
    let cfg = PopulationConfig {
        pop_size: n,
        min_home_work_distance_m: 50.0,
        ..PopulationConfig::default()
    };
    synthesize(net, &cfg, &mut ScenarioRng::new(seed)).unwrap()
}

/// Attributes of every `<tag .. />` or `<tag ..>` element, unescaped.
fn elements(xml: &str, tag: &str) -> Vec<HashMap<String, String>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == tag.as_bytes() => {
                let attrs = e
                    .attributes()
                    .map(|a| {
                        let a = a.unwrap();
                        (
                            String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                            a.unescape_value().unwrap().into_owned(),
                        )
                    })
                    .collect();
                out.push(attrs);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

// ── Paths ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod paths {
    use crate::resolve_output_path;

    #[test]
    fn directory_target_uses_title() {
        let dir = tempfile::tempdir().unwrap();
        let p = resolve_output_path(dir.path(), "GridNetwork-3_3", "xml").unwrap();
        assert!(p.is_absolute());
        assert_eq!(p.file_name().unwrap(), "GridNetwork-3_3.xml");
        assert_eq!(p.parent().unwrap(), std::path::absolute(dir.path()).unwrap());
    }

    #[test]
    fn trailing_separator_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = format!("{}/out/nested/", dir.path().display());
        let p = resolve_output_path(std::path::Path::new(&target), "Population-5", "xml").unwrap();
        assert!(dir.path().join("out").join("nested").is_dir());
        assert!(p.ends_with("out/nested/Population-5.xml"));
    }

    #[test]
    fn file_target_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("net.xml");
        let p = resolve_output_path(&target, "ignored", "xml").unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        assert_eq!(p.file_name().unwrap(), "net.xml");
    }
}

// ── Down-sampling ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampling {
    use super::*;
    use crate::downsample;

    #[test]
    fn full_fraction_keeps_everyone_without_draws() {
        let net = example_grid();
        let synth = population(&net, 40, 1);
        let mut rng = ScenarioRng::new(5);
        let kept = downsample(&synth.population, 1.0, &mut rng);
        assert_eq!(kept.len(), 40);
        assert_eq!(rng.uniform(), ScenarioRng::new(5).uniform());
    }

    #[test]
    fn zero_fraction_keeps_no_one() {
        let net = example_grid();
        let synth = population(&net, 40, 1);
        assert!(downsample(&synth.population, 0.0, &mut ScenarioRng::new(5)).is_empty());
    }

    #[test]
    fn kept_agents_preserve_order() {
        let net = example_grid();
        let synth = population(&net, 200, 2);
        let kept = downsample(&synth.population, 0.5, &mut ScenarioRng::new(8));
        assert!(kept.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn mean_count_converges_to_fraction() {
        let net = example_grid();
        let synth = population(&net, 1_000, 3);
        let runs = 50;
        let total: usize = (0..runs)
            .map(|seed| downsample(&synth.population, 0.3, &mut ScenarioRng::new(seed)).len())
            .sum();
        let mean = total as f64 / runs as f64;
        assert!((mean - 300.0).abs() < 15.0, "mean = {mean}");
    }
}

// ── XML ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod xml {
    use super::*;
    use crate::{MatsimXmlWriter, ScenarioWriter, write_network_xml, write_population_xml};

    #[test]
    fn network_document() {
        let net = example_grid();
        let mut buf = Vec::new();
        write_network_xml(&net, "GridNetwork-3_3", &mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("network_v2.dtd"));
        assert_eq!(elements(&xml, "network")[0]["name"], "GridNetwork-3_3");

        let nodes = elements(&xml, "node");
        assert_eq!(nodes.len(), 9);
        assert!(nodes.iter().any(|n| n["id"] == "(2,1)" && n["x"] == "200" && n["y"] == "100"));

        let links = elements(&xml, "link");
        assert_eq!(links.len(), 24);
        let fs = 100.0 / (100.0 / 15.0 * 3.6 - 0.1);
        for link in &links {
            assert_eq!(link["modes"], "car");
            assert_eq!(link["length"], "100");
            assert_eq!(link["capacity"], "1800");
            assert!((link["freespeed"].parse::<f64>().unwrap() - fs).abs() < 1e-9);
            assert_eq!(link["id"], format!("{}->{}", link["from"], link["to"]));
        }
    }

    #[test]
    fn population_document() {
        let net = example_grid();
        let synth = population(&net, 10, 4);
        let agents: Vec<_> = synth.population.iter().collect();
        let mut buf = Vec::new();
        write_population_xml(&net, &agents, &mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.contains("population_v6.dtd"));
        assert_eq!(elements(&xml, "person").len(), 10);
        let acts = elements(&xml, "activity");
        let legs = elements(&xml, "leg");
        assert_eq!(acts.len(), 30);
        assert_eq!(legs.len(), 20);
        assert!(legs.iter().all(|l| l["mode"] == "av"));

        // First person: home end == first dep == work start.
        assert_eq!(acts[0]["type"], "home");
        assert_eq!(acts[0]["end_time"], legs[0]["dep_time"]);
        assert_eq!(acts[1]["start_time"], legs[0]["dep_time"]);
        assert_eq!(acts[1]["end_time"], legs[1]["dep_time"]);
        assert!(!acts[2].contains_key("end_time"));
        assert_eq!(acts[0]["link"], acts[2]["link"]);

        let first = synth.population.iter().next().unwrap();
        assert_eq!(acts[0]["link"], net.edge_label(first.plan.home_link()));
        assert_eq!(acts[1]["link"], net.edge_label(first.plan.work_link()));
    }

    #[test]
    fn writer_resolves_titles_and_counts() {
        let net = example_grid();
        let synth = population(&net, 25, 5);
        let dir = tempfile::tempdir().unwrap();
        let mut w = MatsimXmlWriter::new();

        let net_path = w.write_network(&net, dir.path(), "GridNetwork-3_3").unwrap();
        assert!(net_path.ends_with("GridNetwork-3_3.xml"));
        assert!(net_path.exists());

        let mut rng = ScenarioRng::new(1);
        let out = w
            .write_population(&net, &synth.population, dir.path(), "Population-25", 1.0, &mut rng)
            .unwrap();
        assert_eq!(out.agents_written, 25);
        assert!(out.path.ends_with("Population-25.xml"));
        let xml = std::fs::read_to_string(&out.path).unwrap();
        assert_eq!(elements(&xml, "person").len(), 25);

        let half = w
            .write_population(&net, &synth.population, dir.path(), "Population-25-k0.5", 0.5, &mut rng)
            .unwrap();
        let xml = std::fs::read_to_string(&half.path).unwrap();
        assert_eq!(elements(&xml, "person").len(), half.agents_written);
        assert_eq!(w.written().len(), 3);
    }
}

// ── Stats CSVs ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use super::*;
    use crate::{write_distance_info, write_link_length_distribution, write_node_stats};

    fn semicolon_reader(path: &std::path::Path) -> csv::Reader<std::fs::File> {
        csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_path(path)
            .unwrap()
    }

    #[test]
    fn distance_info() {
        let net = example_grid();
        let synth = population(&net, 30, 6);
        let dir = tempfile::tempdir().unwrap();
        let path = write_distance_info(&synth.distances, dir.path(), "Population-30").unwrap();
        assert!(path.ends_with("Population-30.DistanceInfo.csv"));

        let mut rdr = semicolon_reader(&path);
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["Distance", "Count"]);
        let rows: Vec<(i64, u64)> = rdr
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].parse().unwrap(), r[1].parse().unwrap())
            })
            .collect();
        assert!(rows.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(rows.iter().map(|r| r.1).sum::<u64>(), 30);
        // Unjittered 3×3: only 100, 141, 200, 224 and 283 are possible.
        assert!(rows.iter().all(|r| [100, 141, 200, 224, 283].contains(&r.0)));
    }

    #[test]
    fn node_stats() {
        let net = example_grid();
        let synth = population(&net, 30, 7);
        let dir = tempfile::tempdir().unwrap();
        let path = write_node_stats(&synth.usage, &net, dir.path(), "Population-30").unwrap();
        assert!(path.ends_with("Population-30.NodesStats.csv"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("NodeId;Type;Count\n"));
        assert!(text.lines().skip(1).all(|l| l.starts_with("\"(")));

        let mut rdr = semicolon_reader(&path);
        let (mut homes, mut works) = (0u64, 0u64);
        for r in rdr.records() {
            let r = r.unwrap();
            assert_eq!(r.len(), 2);
            let count: u64 = r[1].parse().unwrap();
            match r[0].rsplit_once(';').unwrap().1 {
                "0" => homes += count,
                "1" => works += count,
                other => panic!("unexpected role code {other}"),
            }
        }
        assert_eq!((homes, works), (30, 30));
    }

    #[test]
    fn link_length_distribution() {
        let net = example_grid();
        let dir = tempfile::tempdir().unwrap();
        let path = write_link_length_distribution(&net, dir.path(), "GridNetwork-3_3").unwrap();
        assert!(path.ends_with("GridNetwork-3_3.linkLengthDistribution.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "LinkLength;Count\n100;24\n");
    }

    #[test]
    fn missing_directory_is_created() {
        let net = example_grid();
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("stats").join("run1");
        write_link_length_distribution(&net, &nested, "g").unwrap();
        assert!(nested.join("g.linkLengthDistribution.csv").exists());
    }
}
