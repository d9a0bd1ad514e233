//! Daily plans: `Activity`, `Leg`, `Plan`, and the plan builder.
//!
//! # Plan shape
//!
//! Every plan produced here has the same five elements:
//!
//! ```text
//! home  (end = t1)
//! leg   (dep = t1, mode = av)
//! work  (start = t1, end = t2)
//! leg   (dep = t2, mode = av)
//! home  (open-ended)
//! ```
//!
//! Times are seconds since local midnight and may exceed 86 400.  Activities
//! reference the link entering their node rather than the node itself.
//!
//! Both the synthesizer and the CSV importer go through [`build_plan`], so a
//! plan read back from CSV is structurally identical to a synthesized one.

use sc_core::{EdgeId, TransportMode};

// ── ActivityKind ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityKind {
    Home,
    Work,
}

impl ActivityKind {
    /// Activity type label used in the population file.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Home => "home",
            ActivityKind::Work => "work",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Activity / Leg ────────────────────────────────────────────────────────────

/// A stay on a link.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activity {
    pub kind: ActivityKind,

    /// Link the activity is anchored on.
    pub link: EdgeId,

    /// `None` for the first activity of the day.
    pub start_time_s: Option<f64>,

    /// `None` for the last activity: it lasts until the simulation ends.
    pub end_time_s: Option<f64>,
}

/// A trip between two activities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub mode:        TransportMode,
    pub departure_s: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanElement {
    Activity(Activity),
    Leg(Leg),
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// An agent's home → work → home day.
///
/// Only the four values that vary between agents are stored; the element
/// sequence is derived from them, so the five-element shape always holds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    home_link:    EdgeId,
    work_link:    EdgeId,
    leave_home_s: f64,
    leave_work_s: f64,
}

impl Plan {
    pub fn home_link(&self) -> EdgeId {
        self.home_link
    }

    pub fn work_link(&self) -> EdgeId {
        self.work_link
    }

    /// Departure of the morning leg, seconds.
    pub fn leave_home_s(&self) -> f64 {
        self.leave_home_s
    }

    /// Departure of the evening leg, seconds.
    pub fn leave_work_s(&self) -> f64 {
        self.leave_work_s
    }

    /// Elements in chronological order, alternating activity and leg.
    pub fn elements(&self) -> [PlanElement; 5] {
        let leg = |departure_s| PlanElement::Leg(Leg { mode: TransportMode::Av, departure_s });
        [
            PlanElement::Activity(Activity {
                kind:         ActivityKind::Home,
                link:         self.home_link,
                start_time_s: None,
                end_time_s:   Some(self.leave_home_s),
            }),
            leg(self.leave_home_s),
            PlanElement::Activity(Activity {
                kind:         ActivityKind::Work,
                link:         self.work_link,
                start_time_s: Some(self.leave_home_s),
                end_time_s:   Some(self.leave_work_s),
            }),
            leg(self.leave_work_s),
            PlanElement::Activity(Activity {
                kind:         ActivityKind::Home,
                link:         self.home_link,
                start_time_s: None,
                end_time_s:   None,
            }),
        ]
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Assemble the home → work → home plan.
///
/// `leave_home_s` is both the end of the morning home activity and the start
/// of work; `leave_work_s` ends work.  The evening home activity has no end.
/// Legs use [`TransportMode::Av`].
pub fn build_plan(home_link: EdgeId, work_link: EdgeId, leave_home_s: f64, leave_work_s: f64) -> Plan {
    Plan { home_link, work_link, leave_home_s, leave_work_s }
}
