pub mod cell;
pub mod emitter;
pub mod id;
pub mod math;
pub mod scene;

pub use cell::{Param, Subject, Subscription};
pub use emitter::{channel, Emitter, SwitchPanel};
pub use id::{DisposeToken, ObjectId};
pub use math::{calc_triangle_angle, deg2rad, rad2deg, snap_degree};
pub use scene::{NodeKey, Scene, SceneHandle, TransformNode};
