//! `gs-core` — foundational types for the `gridsite` coverage-analysis engine.
//!
//! This crate is a dependency of every other `gs-*` crate.  It intentionally
//! has no `gs-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde` and `rayon`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`geo`]     | `GeoPoint`, haversine distance, `DistanceMatrix`        |
//! | [`grid`]    | `Grid`, `GridSpec` — the fixed analysis lattice         |
//! | [`mode`]    | `TransitMode` enum, `ModeWeights`                       |
//! | [`landuse`] | `LandUseCategory` enum with signed desirability factors |
//! | [`query`]   | `Query`, `LayerWeights` — validated request config      |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `serde`    | Adds `Serialize`/`Deserialize` to all public types.     |
//! | `parallel` | Distance-matrix rows computed on Rayon's thread pool.   |

pub mod error;
pub mod geo;
pub mod grid;
pub mod landuse;
pub mod mode;
pub mod query;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{DistanceMatrix, GeoPoint};
pub use grid::{Grid, GridSpec};
pub use landuse::LandUseCategory;
pub use mode::{ModeWeights, TransitMode};
pub use query::{LayerWeights, Query};
