use bevy::prelude::{Quat, Transform, Vec3};

/// Number of tiles in the row.
pub const TILE_COUNT: usize = 60;

/// Rotation angles below this are treated as no rotation at all.
pub const ZERO_ANGLE_EPSILON: f32 = 1e-6;

/// Side length of the square ground, metres. Its top face is `z = 0`.
pub const GROUND_SIZE: f32 = 20.0;

/// Tilt (radians) past which a tile counts as fallen.
pub const FALLEN_TILT: f32 = 0.25;

// ---------------------------------------------------------------------------
// TilePose
// ---------------------------------------------------------------------------

/// Snapshot of one tile's rigid-body pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl TilePose {
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Upright pose at `position`.
    pub const fn upright(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Axis-angle form of the orientation: `angle = 2 acos(w)` and
    /// `axis = (x, y, z) / sin(angle / 2)`.
    ///
    /// Returns `None` when the angle is numerically zero; the axis is
    /// undefined there and the caller should apply no rotation.
    pub fn axis_angle(&self) -> Option<(Vec3, f32)> {
        let q = self.orientation;
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        if angle.abs() < ZERO_ANGLE_EPSILON {
            return None;
        }
        let s = (angle * 0.5).sin();
        if s.abs() < ZERO_ANGLE_EPSILON {
            return None;
        }
        Some((Vec3::new(q.x / s, q.y / s, q.z / s), angle))
    }

    /// Magnitude of the rotation away from identity, in `[0, π]`.
    pub fn rotation_angle(&self) -> f32 {
        2.0 * self.orientation.w.abs().min(1.0).acos()
    }

    /// Angle between the tile's local up axis and world +Z.
    pub fn tilt(&self) -> f32 {
        let up = self.orientation * Vec3::Z;
        up.truncate().length().atan2(up.z)
    }

    pub fn is_fallen(&self) -> bool {
        self.tilt() > FALLEN_TILT
    }

    /// Render transform built from the axis-angle form.
    pub fn to_transform(&self) -> Transform {
        let rotation = self
            .axis_angle()
            .map_or(Quat::IDENTITY, |(axis, angle)| {
                Quat::from_axis_angle(axis.normalize(), angle)
            });
        Transform::from_translation(self.position).with_rotation(rotation)
    }
}

impl Default for TilePose {
    fn default() -> Self {
        Self::upright(Vec3::ZERO)
    }
}

// ---------------------------------------------------------------------------
// StepReport
// ---------------------------------------------------------------------------

/// What the contact relay saw during one physics step.
///
/// The underlying contact set lives only for the step that produced it;
/// this is the summary left behind once it has been discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Colliding pairs the relay was invoked for.
    pub contact_pairs: usize,
    /// Contacts kept across all pairs, after per-pair truncation.
    pub contacts: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
