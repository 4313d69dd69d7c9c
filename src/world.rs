use rand::{Rng, RngCore};

use crate::shapes::{self, ControlPoint, ShapeKind};

/// Fresh skeleton radii are drawn uniformly from this range.
pub const MIN_RADIUS: f64 = 100.0;
pub const MAX_RADIUS: f64 = 300.0;

/// Shared state read by every agent each tick. Owned by the scene; only the
/// switch orchestration replaces the skeleton, but every agent nudges
/// `rotation_angle` as it samples (rotation speed scales with agent count,
/// matching the source behavior).
#[derive(Debug, Clone)]
pub struct WorldState {
    pub shape: ShapeKind,
    pub skeleton: Vec<ControlPoint>,
    pub rotation_angle: f64,
    pub width: f64,
    pub height: f64,
    pub fast_mode: bool,
}

impl WorldState {
    pub fn new(shape: ShapeKind, width: f64, height: f64, rng: &mut dyn RngCore) -> Self {
        let radius = rng.gen_range(MIN_RADIUS..MAX_RADIUS);
        Self {
            shape,
            skeleton: shapes::generate(shape, radius),
            rotation_angle: rng.gen_range(0.0..std::f64::consts::TAU),
            width,
            height,
            fast_mode: false,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Advances to the cyclic successor shape and regenerates the skeleton
    /// with a freshly drawn radius. The old point sequence is dropped
    /// wholesale, never edited in place.
    pub fn advance_shape(&mut self, rng: &mut dyn RngCore) {
        self.shape = self.shape.successor();
        let radius = rng.gen_range(MIN_RADIUS..MAX_RADIUS);
        self.skeleton = shapes::generate(self.shape, radius);
    }
}

/// Deferred shape advance, modeled as an explicit due-time checked once per
/// tick instead of a fire-and-forget timer. A request arriving while one is
/// pending replaces it, so the swap fires exactly once, `delay_ms` after
/// the latest request.
#[derive(Debug, Clone, Default)]
pub struct SwitchScheduler {
    due_ms: Option<f64>,
}

impl SwitchScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, now_ms: f64, delay_ms: f64) {
        self.due_ms = Some(now_ms + delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    /// True exactly once, on the first poll at or past the due time.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}
