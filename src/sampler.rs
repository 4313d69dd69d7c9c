use crate::shapes::ControlPoint;

/// Distance of the virtual eye from the projection plane.
const PERSPECTIVE: f64 = 800.0;
/// Interpolated points are pulled toward the origin so the traced figure
/// stays inside the frame.
const DAMPING: f64 = 0.8;

/// One projected sample: canvas position plus the depth/lighting scalars
/// that drive stroke emphasis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    /// Normalized z-proxy, roughly [0, 1] before any clamping by the caller.
    pub depth: f64,
    /// Brightness scalar in [0.2, 1].
    pub lighting: f64,
}

impl SamplePoint {
    /// Degraded value returned when the skeleton is unusable. Keeps the
    /// render loop alive; the fault is reported on stderr instead.
    fn safe_default(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            depth: 0.5,
            lighting: 1.0,
        }
    }
}

/// Samples the skeleton at time `t`, rotated by `rotation_angle` about the
/// vertical axis and projected onto a canvas centered at
/// `(center_x, center_y)`.
///
/// Pure given its inputs: identical arguments always produce the identical
/// sample. `t` advances around the 12-point ring at one point per `1/12`
/// of `t`, wrapping continuously.
pub fn sample(
    t: f64,
    points: &[ControlPoint],
    rotation_angle: f64,
    center_x: f64,
    center_y: f64,
) -> SamplePoint {
    if points.is_empty() {
        eprintln!("[drawer] sampler: no control points available");
        return SamplePoint::safe_default(0.0, 0.0);
    }

    let time = (t * points.len() as f64).abs();
    let index = (time.floor() as usize) % points.len();
    let next_index = (index + 1) % points.len();
    let fraction = time - time.floor();

    // Unreachable while the length invariant holds, but a missing point must
    // degrade rather than halt the animation.
    let (Some(p1), Some(p2)) = (points.get(index), points.get(next_index)) else {
        eprintln!("[drawer] sampler: ring index {index}/{next_index} out of range");
        return SamplePoint::safe_default(center_x, center_y);
    };

    let x = (p1.x + (p2.x - p1.x) * fraction) * DAMPING;
    let y = (p1.y + (p2.y - p1.y) * fraction) * DAMPING;
    let z = (p1.z + (p2.z - p1.z) * fraction) * DAMPING;

    let rotated_x = x * rotation_angle.cos() - z * rotation_angle.sin();
    let rotated_z = x * rotation_angle.sin() + z * rotation_angle.cos();

    let perspective_scale = PERSPECTIVE / (PERSPECTIVE + rotated_z);
    let depth = (rotated_z + 300.0) / 600.0;

    SamplePoint {
        x: center_x + rotated_x * perspective_scale,
        y: center_y + y * perspective_scale,
        depth,
        lighting: (depth * 1.5).clamp(0.2, 1.0),
    }
}
