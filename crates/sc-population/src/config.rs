//! Population synthesis parameters.

use crate::{PopulationError, PopulationResult};

/// Inputs to [`synthesize`](crate::synthesize).
///
/// Time parameters are in hours; see the field docs for how they combine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulationConfig {
    pub pop_size: u32,

    /// Work nodes closer than this to the agent's home are redrawn, metres.
    pub min_home_work_distance_m: f64,

    /// Earliest morning departure, hours after midnight.
    pub leave_home_base_h: f64,
    /// Width of the morning departure window, hours.
    pub leave_home_window_h: f64,

    /// Shortest workday, hours.
    pub workday_base_h: f64,
    /// Width of the workday-length window, hours.
    pub workday_window_h: f64,

    /// Work candidates drawn per agent before giving up with
    /// [`PopulationError::UnsatisfiableOd`].
    pub max_work_draws: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            pop_size:                 10_000,
            min_home_work_distance_m: 300.0,
            leave_home_base_h:        6.0,
            leave_home_window_h:      3.0,
            workday_base_h:           6.0,
            workday_window_h:         4.0,
            max_work_draws:           10_000,
        }
    }
}

impl PopulationConfig {
    /// Default file stem, e.g. `Population-10000`.
    pub fn title(&self) -> String {
        format!("Population-{}", self.pop_size)
    }

    pub fn validate(&self) -> PopulationResult<()> {
        if !(self.min_home_work_distance_m >= 0.0) {
            return Err(PopulationError::Config(format!(
                "min_home_work_distance_m must be non-negative (got {})",
                self.min_home_work_distance_m
            )));
        }
        let hours = [
            ("leave_home_base_h", self.leave_home_base_h),
            ("leave_home_window_h", self.leave_home_window_h),
            ("workday_base_h", self.workday_base_h),
            ("workday_window_h", self.workday_window_h),
        ];
        for (name, value) in hours {
            if !(value >= 0.0) {
                return Err(PopulationError::Config(format!(
                    "{name} must be non-negative (got {value})"
                )));
            }
        }
        // A zero-length workday would put both legs at the same instant.
        if !(self.workday_base_h > 0.0) {
            return Err(PopulationError::Config(
                "workday_base_h must be positive".into(),
            ));
        }
        if self.max_work_draws == 0 {
            return Err(PopulationError::Config("max_work_draws must be at least 1".into()));
        }
        Ok(())
    }
}
