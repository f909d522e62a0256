/// Number of points in a face-mesh frame without iris refinement.
pub const FACE_MESH_POINTS: usize = 468;

/// Number of points in a face-mesh frame with iris refinement.
pub const FACE_MESH_POINTS_WITH_IRIS: usize = 478;

pub const LEFT_EYE_OUTER: usize = 33;
pub const RIGHT_EYE_OUTER: usize = 263;
pub const LEFT_EYE_INNER: usize = 133;
pub const RIGHT_EYE_INNER: usize = 362;
pub const NOSE_BRIDGE: usize = 168;
pub const NOSE_TIP: usize = 1;
pub const FOREHEAD: usize = 10;
pub const CHIN: usize = 152;
pub const LEFT_TEMPLE: usize = 127;
pub const RIGHT_TEMPLE: usize = 356;

/// Iris centres, only present in refined (478 point) frames.
pub const LEFT_IRIS: usize = 468;
pub const RIGHT_IRIS: usize = 473;
