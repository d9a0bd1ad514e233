//! CSV plan import and export.
//!
//! # CSV format
//!
//! One row per agent.  The header is optional on read.
//!
//! ```csv
//! fromLinkId,toLinkId,departureTime,returnTime
//! "(0,1)->(0,0)","(2,2)->(2,1)",07:12:40,15:03:09
//! "(1,0)->(0,0)","(0,2)->(0,1)",08:00,17:30
//! ```
//!
//! | Column          | Meaning                                          |
//! |-----------------|--------------------------------------------------|
//! | `fromLinkId`    | Link of the home activity                        |
//! | `toLinkId`      | Link of the work activity                        |
//! | `departureTime` | Morning departure, `HH:MM:SS` or `HH:MM`         |
//! | `returnTime`    | Evening departure, `HH:MM:SS` or `HH:MM`         |
//!
//! Times are written truncated to whole seconds.  On read, a time that does
//! not parse is logged and replaced by `00:00:00`; the row is still imported.
//! After such a fallback the plan may leave work before it leaves home, so
//! imported plans are not guaranteed to be time-ordered.  An unknown link id
//! aborts the import.
//!
//! Home and work nodes are recovered as the destination node of each link,
//! which inverts the "first incoming link" anchoring used by the synthesizer.

use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use sc_core::{EdgeId, format_time_of_day, parse_time_of_day};
use sc_grid::RoadNetwork;

use crate::plan::build_plan;
use crate::population::Population;
use crate::{PopulationError, PopulationResult};

/// Header row, matched exactly on read.
pub const PLAN_CSV_HEADER: [&str; 4] = ["fromLinkId", "toLinkId", "departureTime", "returnTime"];

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct PlanRow {
    from_link_id:   String,
    to_link_id:     String,
    departure_time: String,
    return_time:    String,
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Write one row per agent to `path`, header first.
pub fn write_population_csv(pop: &Population, net: &RoadNetwork, path: &Path) -> PopulationResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(PLAN_CSV_HEADER)?;
    for agent in pop {
        writer.serialize(PlanRow {
            from_link_id:   net.edge_label(agent.plan.home_link()),
            to_link_id:     net.edge_label(agent.plan.work_link()),
            departure_time: format_time_of_day(agent.plan.leave_home_s()),
            return_time:    format_time_of_day(agent.plan.leave_work_s()),
        })?;
    }
    writer.flush()?;
    debug!("wrote {} plan rows to {}", pop.len(), path.display());
    Ok(())
}

// ── Import ────────────────────────────────────────────────────────────────────

/// Read a population from a plan CSV file, resolving link ids against `net`.
pub fn read_population_csv(path: &Path, net: &RoadNetwork) -> PopulationResult<Population> {
    let file = std::fs::File::open(path)?;
    read_population_reader(file, net)
}

/// Like [`read_population_csv`] but accepts any `Read` source.
pub fn read_population_reader<R: Read>(reader: R, net: &RoadNetwork) -> PopulationResult<Population> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut pop = Population::new();

    for (line, result) in csv_reader.records().enumerate() {
        let record = result?;
        if record.iter().eq(PLAN_CSV_HEADER) {
            continue;
        }
        let row: PlanRow = record
            .deserialize(None)
            .map_err(|e| PopulationError::Parse(format!("line {}: {e}", line + 1)))?;

        let home_link = resolve_link(net, &row.from_link_id)?;
        let work_link = resolve_link(net, &row.to_link_id)?;
        let leave_home_s = lenient_time(&row.departure_time, line + 1);
        let leave_work_s = lenient_time(&row.return_time, line + 1);
        if leave_work_s <= leave_home_s {
            warn!(
                "line {}: return time {} is not after departure {}; plan is out of order",
                line + 1,
                format_time_of_day(leave_work_s),
                format_time_of_day(leave_home_s)
            );
        }

        pop.push(
            net.edge_to[home_link.index()],
            net.edge_to[work_link.index()],
            build_plan(home_link, work_link, leave_home_s, leave_work_s),
        );
    }
    Ok(pop)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn resolve_link(net: &RoadNetwork, label: &str) -> PopulationResult<EdgeId> {
    let label = label.trim();
    net.edge_by_label(label)
        .ok_or_else(|| PopulationError::UnknownLink(label.to_owned()))
}

fn lenient_time(s: &str, line: usize) -> f64 {
    match parse_time_of_day(s) {
        Ok(secs) => secs,
        Err(e) => {
            warn!("line {line}: {e}; using 00:00:00");
            0.0
        }
    }
}
