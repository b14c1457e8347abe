//! Land-use categories and their signed desirability factors.

/// Land-use categories recognized by the neighborhood density layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LandUseCategory {
    Green,
    Urban,
    Water,
    Available,
}

impl LandUseCategory {
    pub const ALL: [LandUseCategory; 4] = [
        LandUseCategory::Green,
        LandUseCategory::Urban,
        LandUseCategory::Water,
        LandUseCategory::Available,
    ];

    /// Signed kernel weight of this category.
    ///
    /// Positive raises combined density, i.e. signals *more* need for
    /// coverage at that location.  The polarity and magnitudes are part of
    /// the model definition and must not be "corrected": dense urban fabric
    /// lowers the need score (amenities already nearby), open/available
    /// land raises it.
    pub fn factor(self) -> f64 {
        match self {
            LandUseCategory::Green     => 0.5,
            LandUseCategory::Urban     => -0.6,
            LandUseCategory::Water     => -0.1,
            LandUseCategory::Available => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LandUseCategory::Green     => "green",
            LandUseCategory::Urban     => "urban",
            LandUseCategory::Water     => "water",
            LandUseCategory::Available => "available",
        }
    }
}

impl std::fmt::Display for LandUseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
