// Feedback normalization: raw AI output (modern or legacy schema) → canonical `Feedback`.
// Pure and synchronous; nothing in here performs I/O.

pub mod legacy;
pub mod models;
pub mod normalize;
pub mod payload;
pub mod rules;
pub mod summary;
pub mod transform;

pub use models::Feedback;
pub use payload::{detect_schema, SchemaKind};
pub use summary::{summarize, PortfolioSummary, ScoreBand};
pub use transform::transform;
