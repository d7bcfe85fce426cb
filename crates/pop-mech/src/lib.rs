//! Parametric pop-up mechanism model.
//!
//! The model is a tree of hinges and paper panels. Panels are
//! [`PlaneRectangle`]s (two renderable faces back to back), hinges are
//! [`Hinge`]s joining two panel transforms along a fold line, and a
//! [`Mechanism`] composes hinges and panels into a foldable unit whose
//! geometry is driven entirely by a handful of reactive parameters. Every
//! 3D change keeps a 2D cut-pattern projection of each face in sync within
//! the same propagation step.

pub mod active;
pub mod construction;
pub mod events;
pub mod face;
pub mod folding;
pub mod hinge;
pub mod mechanism;
pub mod parallel;
pub mod plane;

pub use active::MechanismActive;
pub use construction::Construction;
pub use events::{
    FacePick, HingePick, MechanismFacePick, MechanismHingePick, PlanePick, PointerInfo,
};
pub use face::FaceRectangle;
pub use folding::{FoldForm, ThreeHingeFold};
pub use hinge::{Hinge, HingeActive, HingeAttachment};
pub use mechanism::{Behavior, BehaviorKind, Mechanism, MechanismBase};
pub use parallel::MechanismParallel;
pub use plane::PlaneRectangle;
