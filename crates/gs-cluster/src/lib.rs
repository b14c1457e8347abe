//! `gs-cluster` — density-based clustering of low-coverage grid regions.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`dbscan`] | `Dbscan` — neighborhood-density clustering with noise     |
//! | [`lowcov`] | `find_low_coverage` — percentile threshold → centroids    |
//!
//! Both passes are deterministic: points are scanned in input index order,
//! so identical input always yields the identical set of cluster centroids
//! (cluster numbering is an artifact of scan order and carries no meaning).

pub mod dbscan;
pub mod lowcov;


pub use dbscan::{Cluster, Dbscan};
pub use lowcov::{find_low_coverage, LowCoverageParams};
