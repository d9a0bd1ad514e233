//! Statistics CSVs written next to the scenario files.
//!
//! All three use `;` as the delimiter:
//!
//! | File                                   | Header              |
//! |----------------------------------------|---------------------|
//! | `<title>.DistanceInfo.csv`             | `Distance;Count`    |
//! | `<title>.NodesStats.csv`               | `NodeId;Type;Count` |
//! | `<title>.linkLengthDistribution.csv`   | `LinkLength;Count`  |
//!
//! `NodesStats` keeps the node id and the role code (`0` home, `1` work) in one
//! cell, so data rows have two fields under a three-name header, e.g.
//! `"(0,1);0";3`.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use log::debug;

use sc_grid::RoadNetwork;
use sc_population::{DistanceHistogram, UsageCounts};

use crate::OutputResult;

/// OD-distance histogram, ascending by bucket.
pub fn write_distance_info(hist: &DistanceHistogram, dir: &Path, title: &str) -> OutputResult<PathBuf> {
    let (path, mut w) = open(dir, title, "DistanceInfo.csv")?;
    w.write_record(["Distance", "Count"])?;
    for (bucket, count) in hist.iter() {
        w.write_record([bucket.to_string(), count.to_string()])?;
    }
    w.flush()?;
    debug!("wrote {} distance buckets to {}", hist.iter().count(), path.display());
    Ok(path)
}

/// Per-node home/work usage counts.
pub fn write_node_stats(
    usage: &UsageCounts,
    net:   &RoadNetwork,
    dir:   &Path,
    title: &str,
) -> OutputResult<PathBuf> {
    let (path, mut w) = open(dir, title, "NodesStats.csv")?;
    w.write_record(["NodeId", "Type", "Count"])?;
    for ((node, role), count) in usage.iter() {
        let key = format!("{};{}", net.node_label(node), role.code());
        w.write_record([key, count.to_string()])?;
    }
    w.flush()?;
    debug!("wrote node usage to {}", path.display());
    Ok(path)
}

/// Link count per whole-metre length.
pub fn write_link_length_distribution(net: &RoadNetwork, dir: &Path, title: &str) -> OutputResult<PathBuf> {
    let (path, mut w) = open(dir, title, "linkLengthDistribution.csv")?;
    w.write_record(["LinkLength", "Count"])?;
    for (length, count) in net.link_length_distribution() {
        w.write_record([length.to_string(), count.to_string()])?;
    }
    w.flush()?;
    debug!("wrote link length distribution to {}", path.display());
    Ok(path)
}

fn open(dir: &Path, title: &str, suffix: &str) -> OutputResult<(PathBuf, Writer<File>)> {
    std::fs::create_dir_all(dir)?;
    let path = std::path::absolute(dir.join(format!("{title}.{suffix}")))?;
    let writer = WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(&path)?;
    Ok((path, writer))
}
