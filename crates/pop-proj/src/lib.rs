//! 2D cut/fold-pattern projection.
//!
//! Every mechanism keeps publishing the flat outlines of its faces; this
//! crate arranges those outlines into a printable pattern — grouped,
//! offset and rotated — and keeps the arrangement live while the model
//! changes. Rendering the resulting `(Affine, BezPath)` leaves is the
//! host's business.

pub mod gluestrip;
pub mod path;
pub mod projection;

pub use gluestrip::GlueStrip;
pub use path::{ProjGroup, ProjNode, ProjPath};
pub use projection::{ProjectionActive, ProjectionParallel, ProjectionSettings, DEFAULT_DISTANCE};
