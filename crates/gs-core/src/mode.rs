//! Transit mode enum and the per-mode proximity weight table.
//!
//! The closed enum replaces string-keyed mode dispatch: every place that
//! handles a network mode matches on `TransitMode` and the compiler checks
//! exhaustiveness.

use crate::{CoreError, CoreResult};

/// The network modes the analysis understands.
///
/// `Drive` is special: it never contributes to the density surface (its
/// weight is fixed at zero) but supplies the routable graph that proposed
/// sites are snapped to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitMode {
    Drive,
    Bus,
    Rail,
    Subway,
}

impl TransitMode {
    /// All modes, in a stable order (used to iterate per-mode layers
    /// deterministically).
    pub const ALL: [TransitMode; 4] =
        [TransitMode::Drive, TransitMode::Bus, TransitMode::Rail, TransitMode::Subway];

    /// The modes that feed the proximity density term.
    pub const DENSITY_MODES: [TransitMode; 3] =
        [TransitMode::Bus, TransitMode::Rail, TransitMode::Subway];

    pub fn as_str(self) -> &'static str {
        match self {
            TransitMode::Drive  => "drive",
            TransitMode::Bus    => "bus",
            TransitMode::Rail   => "rail",
            TransitMode::Subway => "subway",
        }
    }
}

impl std::fmt::Display for TransitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransitMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "drive"  => Ok(TransitMode::Drive),
            "bus"    => Ok(TransitMode::Bus),
            "rail"   => Ok(TransitMode::Rail),
            "subway" => Ok(TransitMode::Subway),
            other    => Err(CoreError::UnknownMode(other.to_owned())),
        }
    }
}

// ── ModeWeights ───────────────────────────────────────────────────────────────

/// Per-mode weights for the proximity density term, plus the weight of the
/// existing-infrastructure (charging) term that shares the same surface.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeWeights {
    pub bus: f64,
    pub rail: f64,
    pub subway: f64,
    /// Weight of the proximity term for existing charging sites.
    pub charging: f64,
}

impl Default for ModeWeights {
    fn default() -> Self {
        Self { bus: 0.2, rail: 0.4, subway: 0.3, charging: 0.1 }
    }
}

impl ModeWeights {
    /// Weight of `mode` in the proximity sum.  `Drive` is always zero.
    pub fn for_mode(&self, mode: TransitMode) -> f64 {
        match mode {
            TransitMode::Drive  => 0.0,
            TransitMode::Bus    => self.bus,
            TransitMode::Rail   => self.rail,
            TransitMode::Subway => self.subway,
        }
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [
            ("mode_weights.bus", self.bus),
            ("mode_weights.rail", self.rail),
            ("mode_weights.subway", self.subway),
            ("mode_weights.charging", self.charging),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
