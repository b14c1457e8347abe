//! `gs-spatial` — road network, site optimization, and road heat.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (nodes + R-tree + classed edges), builder   |
//! | [`siting`]  | `propose_sites` — snap candidates, enforce separation     |
//! | [`heat`]    | `GridIndex`, `sample_road_heat` — per-edge coverage score |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                        |

pub mod error;
pub mod heat;
pub mod network;
pub mod siting;


pub use error::{SpatialError, SpatialResult};
pub use heat::{sample_road_heat, GridIndex, RoadHeatSegment, DEFAULT_SAMPLES_PER_EDGE};
pub use network::{NodeId, RoadClass, RoadNetwork, RoadNetworkBuilder};
pub use siting::{propose_sites, SitingOutcome, DEFAULT_MIN_SEPARATION_KM};
