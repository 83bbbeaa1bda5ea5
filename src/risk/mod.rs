//! The probabilistic risk layer (§4.8): several cooperating [`crate::facade::Facade`]s
//! sharing grid geometry, combined into a time-varying collision risk field
//! and finally mapped to a meta so a last facade can propagate a
//! probabilistic navigation function from it.

pub mod buffer_zone;
pub mod cooccurrence;
pub mod pipeline;
pub mod riskmap;
pub mod sprite;

pub use buffer_zone::buffer_zone;
pub use cooccurrence::cooc;
pub use pipeline::{compute, MovingObject, RiskPipeline, RiskPipelineConfig};
pub use riskmap::RiskMapKind;
pub use sprite::{Region, Sprite};
