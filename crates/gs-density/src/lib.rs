//! `gs-density` — density estimation over the analysis grid.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`reduce`]    | `reduce_nodes` — mode-seeking reduction of raw point sets      |
//! | [`kde`]       | `Kde2` — weighted 2-D Gaussian KDE, Scott's-rule bandwidth     |
//! | [`layer`]     | `min_max_normalize`, `combine` — layer plumbing                |
//! | [`estimator`] | `DensityEstimator` — the full multi-layer surface pipeline     |
//!
//! # Pipeline position
//!
//! ```text
//! raw per-mode nodes ──reduce──▶ representative centers
//!                                      │
//!                                      ▼
//!     grid ──▶ weighted proximity ──▶ KDE smoothing ──▶ normalize
//!                 ──▶ edge penalty ──▶ radius mask ──▶ combined layers
//! ```
//!
//! Everything here is a pure function over immutable inputs: empty point
//! sets contribute zero, degenerate (constant) surfaces normalize to zero,
//! and nothing in this crate returns an error.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `serde`    | Adds `Serialize`/`Deserialize` to public output types.    |
//! | `parallel` | KDE evaluation and distance matrices use Rayon.           |

pub mod estimator;
pub mod kde;
pub mod layer;
pub mod reduce;

#[cfg(test)]
mod tests;

pub use estimator::{DensityEstimator, DensityInputs, DensitySurface};
pub use kde::Kde2;
pub use layer::{combine, min_max_normalize};
pub use reduce::{reduce_nodes, DEFAULT_REDUCTION_BANDWIDTH_DEG};
