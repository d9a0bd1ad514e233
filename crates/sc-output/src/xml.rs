//! MATSim-style XML backend.
//!
//! Produces `network_v2` and `population_v6` documents:
//!
//! ```text
//! <network name="GridNetwork-3_3">
//!   <nodes> <node id="(0,0)" x=".." y=".."/> .. </nodes>
//!   <links capperiod="01:00:00" ..>
//!     <link id="(0,1)->(0,0)" from="(0,1)" to="(0,0)" length=".." freespeed=".."
//!           capacity="1800" permlanes="1.0" oneway="1" modes="car"/> ..
//!   </links>
//! </network>
//!
//! <population>
//!   <person id="0"><plan selected="yes">
//!     <activity type="home" link=".." x=".." y=".." end_time="07:12:40"/>
//!     <leg mode="av" dep_time="07:12:40"/>
//!     ..
//!   </plan></person>
//! </population>
//! ```
//!
//! Node and link ids are the lattice labels, never the internal indices.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use sc_core::{EdgeId, ScenarioRng, TransportMode, format_time_of_day};
use sc_grid::RoadNetwork;
use sc_population::{Activity, Agent, PlanElement, Population};

use crate::writer::{PopulationOutput, ScenarioWriter, downsample, resolve_output_path};
use crate::OutputResult;

const NETWORK_DOCTYPE: &str = r#"network SYSTEM "http://www.matsim.org/files/dtd/network_v2.dtd""#;
const POPULATION_DOCTYPE: &str =
    r#"population SYSTEM "http://www.matsim.org/files/dtd/population_v6.dtd""#;

/// Writes networks and populations as indented MATSim XML.
#[derive(Debug, Default)]
pub struct MatsimXmlWriter {
    written: Vec<PathBuf>,
}

impl MatsimXmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ScenarioWriter for MatsimXmlWriter {
    fn write_network(&mut self, net: &RoadNetwork, target: &Path, title: &str) -> OutputResult<PathBuf> {
        let path = resolve_output_path(target, title, "xml")?;
        let mut out = BufWriter::new(File::create(&path)?);
        write_network_xml(net, title, &mut out)?;
        out.flush()?;
        debug!("wrote network {title} to {}", path.display());
        self.written.push(path.clone());
        Ok(path)
    }

    fn write_population(
        &mut self,
        net:      &RoadNetwork,
        pop:      &Population,
        target:   &Path,
        title:    &str,
        fraction: f64,
        rng:      &mut ScenarioRng,
    ) -> OutputResult<PopulationOutput> {
        let path = resolve_output_path(target, title, "xml")?;
        let agents = downsample(pop, fraction, rng);
        let mut out = BufWriter::new(File::create(&path)?);
        write_population_xml(net, &agents, &mut out)?;
        out.flush()?;
        debug!(
            "wrote {} of {} agents (fraction {fraction}) to {}",
            agents.len(),
            pop.len(),
            path.display()
        );
        self.written.push(path.clone());
        Ok(PopulationOutput { path, agents_written: agents.len() })
    }
}

// ── Documents ─────────────────────────────────────────────────────────────────

/// Serialize `net` as a `network_v2` document.
pub fn write_network_xml<W: Write>(net: &RoadNetwork, name: &str, out: W) -> OutputResult<()> {
    let mut w = Writer::new_with_indent(out, b' ', 2);
    prologue(&mut w, NETWORK_DOCTYPE)?;
    w.write_event(Event::Start(BytesStart::new("network").with_attributes([("name", name)])))?;

    w.write_event(Event::Start(BytesStart::new("nodes")))?;
    for (coord, pos) in net.node_coord.iter().zip(&net.node_pos) {
        let id = coord.node_label();
        let (x, y) = (pos.x.to_string(), pos.y.to_string());
        w.write_event(Event::Empty(BytesStart::new("node").with_attributes([
            ("id", id.as_str()),
            ("x", x.as_str()),
            ("y", y.as_str()),
        ])))?;
    }
    w.write_event(Event::End(BytesEnd::new("nodes")))?;

    w.write_event(Event::Start(BytesStart::new("links").with_attributes([
        ("capperiod", "01:00:00"),
        ("effectivecellsize", "7.5"),
        ("effectivelanewidth", "3.75"),
    ])))?;
    for e in 0..net.edge_count() {
        let id        = net.edge_label(EdgeId(e as u32));
        let from      = net.node_label(net.edge_from[e]);
        let to        = net.node_label(net.edge_to[e]);
        let length    = net.edge_length_m[e].to_string();
        let freespeed = net.edge_freespeed_mps[e].to_string();
        let capacity  = net.edge_capacity[e].to_string();
        w.write_event(Event::Empty(BytesStart::new("link").with_attributes([
            ("id", id.as_str()),
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("length", length.as_str()),
            ("freespeed", freespeed.as_str()),
            ("capacity", capacity.as_str()),
            ("permlanes", "1.0"),
            ("oneway", "1"),
            ("modes", TransportMode::Car.as_str()),
        ])))?;
    }
    w.write_event(Event::End(BytesEnd::new("links")))?;

    w.write_event(Event::End(BytesEnd::new("network")))?;
    Ok(())
}

/// Serialize `agents` as a `population_v6` document.
pub fn write_population_xml<W: Write>(net: &RoadNetwork, agents: &[&Agent], out: W) -> OutputResult<()> {
    let mut w = Writer::new_with_indent(out, b' ', 2);
    prologue(&mut w, POPULATION_DOCTYPE)?;
    w.write_event(Event::Start(BytesStart::new("population")))?;

    for agent in agents {
        let id = agent.id.0.to_string();
        w.write_event(Event::Start(BytesStart::new("person").with_attributes([("id", id.as_str())])))?;
        w.write_event(Event::Start(BytesStart::new("plan").with_attributes([("selected", "yes")])))?;
        for element in agent.plan.elements() {
            match element {
                PlanElement::Activity(act) => activity(&mut w, net, &act)?,
                PlanElement::Leg(leg) => {
                    let dep = format_time_of_day(leg.departure_s);
                    w.write_event(Event::Empty(BytesStart::new("leg").with_attributes([
                        ("mode", leg.mode.as_str()),
                        ("dep_time", dep.as_str()),
                    ])))?;
                }
            }
        }
        w.write_event(Event::End(BytesEnd::new("plan")))?;
        w.write_event(Event::End(BytesEnd::new("person")))?;
    }

    w.write_event(Event::End(BytesEnd::new("population")))?;
    Ok(())
}

fn activity<W: Write>(w: &mut Writer<W>, net: &RoadNetwork, act: &Activity) -> OutputResult<()> {
    let link = net.edge_label(act.link);
    let pos  = net.node_pos[net.edge_to[act.link.index()].index()];
    let (x, y) = (pos.x.to_string(), pos.y.to_string());

    let mut el = BytesStart::new("activity").with_attributes([
        ("type", act.kind.as_str()),
        ("link", link.as_str()),
        ("x", x.as_str()),
        ("y", y.as_str()),
    ]);
    if let Some(t) = act.start_time_s {
        el.push_attribute(("start_time", format_time_of_day(t).as_str()));
    }
    if let Some(t) = act.end_time_s {
        el.push_attribute(("end_time", format_time_of_day(t).as_str()));
    }
    w.write_event(Event::Empty(el))?;
    Ok(())
}

fn prologue<W: Write>(w: &mut Writer<W>, doctype: &str) -> OutputResult<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.write_event(Event::DocType(BytesText::from_escaped(doctype)))?;
    Ok(())
}
