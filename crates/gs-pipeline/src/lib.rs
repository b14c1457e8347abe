//! `gs-pipeline` — the one-shot analysis pipeline.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`provider`]   | `AreaDataProvider`, `LandUseProvider`, `PopulationProvider` |
//! | [`geometry`]   | `SiteGeometry` — point/polygon features                   |
//! | [`population`] | `PopulationRecord` — fallible per-record parsing          |
//! | [`pipeline`]   | `Pipeline`, `AnalysisParams`, `Analysis`                  |
//! | [`error`]      | `PipelineError`, `ProviderError`, `PipelineResult<T>`     |
//!
//! # Pipeline stages
//!
//! ```text
//! ① fetch      — area networks + sites, land use, population (buffered radius)
//! ② reduce     — per-mode nodes and existing sites → representative centers
//! ③ estimate   — grid → multi-layer density surface (masked, normalized)
//! ④ cluster    — low-coverage cells → candidate centroids
//! ⑤ site       — snap to Drive nodes, enforce minimum separation
//! ⑥ heat       — per-edge coverage scores for rendering
//! ```
//!
//! The whole run is all-or-nothing: any provider failure aborts with
//! [`PipelineError::Upstream`] and no partial result.  The pipeline holds
//! no state between requests; everything is scoped to one [`Analysis`].

pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod population;
pub mod provider;


pub use error::{PipelineError, PipelineResult, ProviderError};
pub use geometry::SiteGeometry;
pub use pipeline::{Analysis, AnalysisParams, Pipeline};
pub use population::{PopulationRecord, RawPopulationRecord, RecordError};
pub use provider::{AreaData, AreaDataProvider, LandUseData, LandUseProvider, ModeNetworks,
                   PopulationProvider};
