//! Transportation mode tags written into plans and network links.

/// Mode tag carried by plan legs and link `modes` attributes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum TransportMode {
    /// Autonomous / ride-hail fleet.  Every synthesized leg uses this mode.
    #[default]
    Av,
    /// Private vehicle.  Grid links allow this mode; fleet vehicles drive on it.
    Car,
}

impl TransportMode {
    /// Label used in the XML and CSV files.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Av  => "av",
            TransportMode::Car => "car",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
