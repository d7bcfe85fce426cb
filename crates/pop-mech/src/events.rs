//! Pick event payloads.
//!
//! The host performs the actual pointer picking and feeds the results into
//! the model through `pointer_down`/`pointer_up`/`pointer_move` methods.
//! As a pick event bubbles up from face to plane to mechanism, each layer
//! re-emits it with its own id attached, so a subscriber at any level knows
//! the full ownership chain of the thing under the cursor.

use pop_core::ObjectId;
use serde::{Deserialize, Serialize};

/// Screen-space pointer coordinates at the moment of the event.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerInfo {
    pub x: f64,
    pub y: f64,
}

/// A pointer event on a single face.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacePick {
    pub pointer: PointerInfo,
    pub face_id: ObjectId,
}

/// A face pick tagged with the owning plane.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanePick {
    pub pick: FacePick,
    pub plane_id: ObjectId,
}

/// A plane pick tagged with the owning mechanism.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MechanismFacePick {
    pub pick: PlanePick,
    pub mechanism_id: ObjectId,
}

/// A pointer event on a hinge.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HingePick {
    pub pointer: PointerInfo,
    pub hinge_id: ObjectId,
}

/// A hinge pick tagged with the owning mechanism.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MechanismHingePick {
    pub pick: HingePick,
    pub mechanism_id: ObjectId,
}
