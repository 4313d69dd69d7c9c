use std::collections::VecDeque;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::color::Hsla;
use crate::sampler;
use crate::shapes::{SchemeTable, ShapeKind};
use crate::surface::{LineCap, LineJoin, RenderSurface, StrokeStyle};
use crate::world::WorldState;

/// Time-parameter advance per steady tick. Small on purpose: the pen drifts
/// slowly enough that consecutive segments stay connected.
const T_STEP: f64 = 0.0002;
/// Shared-rotation nudge applied by every agent that samples the skeleton.
const ROTATION_STEP: f64 = 0.001;
/// Fraction of the distance toward the smoothed target covered per tick.
const FOLLOW_EASE: f64 = 0.1;
const HISTORY_CAP: usize = 3;
/// Geometric weight base for the history blend; newest entries dominate.
const SMOOTHING_FACTOR: f64 = 0.5;

const HUE_EASE: f64 = 0.05;
const OPACITY_EASE: f64 = 0.15;
const COLOR_REROLL_PROBABILITY: f64 = 0.01;

const CHAOS_MIN_SPEED: f64 = 2.0;
const CHAOS_MAX_SPEED: f64 = 10.0;
const DIRECTION_JUMP_PROBABILITY: f64 = 0.05;
const SPEED_BURST_PROBABILITY: f64 = 0.03;

/// Engine tuning shared by all agents of one scene.
#[derive(Debug, Clone, Copy)]
pub struct AgentParams {
    pub transition_ms: f64,
    pub depth_min: f64,
    pub depth_max: f64,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            transition_ms: 2000.0,
            depth_min: 0.4,
            depth_max: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentState {
    Steady,
    Transitioning { started_ms: f64 },
}

/// Snapshot of the randomizable pen parameters, for tests and debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyle {
    pub min_width: f64,
    pub max_width: f64,
    pub opacity: f64,
    pub cap: LineCap,
}

/// One independent pen. Owns its position, a short history of raw skeleton
/// samples for curve smoothing, animated visual attributes, and a seeded RNG
/// so trajectories replay exactly under a fixed seed.
#[derive(Debug, Clone)]
pub struct Agent {
    id: usize,
    x: f64,
    y: f64,
    last_x: f64,
    last_y: f64,
    t: f64,
    state: AgentState,
    params: AgentParams,
    history: VecDeque<(f64, f64)>,

    min_width: f64,
    max_width: f64,
    line_width: f64,
    target_line_width: f64,

    hue: f64,
    target_hue: f64,
    saturation: f64,
    lightness: f64,
    opacity: f64,
    target_opacity: f64,
    cap: LineCap,
    join: LineJoin,
    schemes: SchemeTable,

    depth: f64,
    lighting: f64,

    chaos_speed: f64,
    chaos_direction: f64,
    direction_change_rate: f64,
    speed_variation: f64,

    rng: SmallRng,
}

impl Agent {
    pub fn new(id: usize, world: &WorldState, params: AgentParams, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let schemes = SchemeTable::default();
        let scheme = schemes.get(world.shape);

        let hue = scheme.hue + (rng.gen::<f64>() - 0.5) * scheme.hue_range;
        let saturation = scheme.saturation + (rng.gen::<f64>() - 0.5) * 20.0;
        let lightness = scheme.lightness + (rng.gen::<f64>() - 0.5) * 15.0;
        let opacity = rng.gen::<f64>() * 0.5 + 0.3;

        let chaos_speed = rng.gen_range(CHAOS_MIN_SPEED..CHAOS_MAX_SPEED);
        let chaos_direction = rng.gen_range(0.0..std::f64::consts::TAU);
        let direction_change_rate = rng.gen_range(0.1..0.5);
        let speed_variation = rng.gen_range(0.5..1.0);

        Self {
            id,
            x: world.center_x(),
            y: world.center_y(),
            last_x: world.center_x(),
            last_y: world.center_y(),
            t: id as f64 * 0.1,
            state: AgentState::Steady,
            params,
            history: VecDeque::with_capacity(HISTORY_CAP),
            min_width: 0.5,
            max_width: 14.0,
            line_width: 0.5,
            target_line_width: 0.5,
            hue,
            target_hue: hue,
            saturation,
            lightness,
            opacity,
            target_opacity: opacity,
            cap: LineCap::Round,
            join: LineJoin::Round,
            schemes,
            depth: 0.5,
            lighting: 1.0,
            chaos_speed,
            chaos_direction,
            direction_change_rate,
            speed_variation,
            rng,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn time_parameter(&self) -> f64 {
        self.t
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn pen_style(&self) -> PenStyle {
        PenStyle {
            min_width: self.min_width,
            max_width: self.max_width,
            opacity: self.opacity,
            cap: self.cap,
        }
    }

    pub fn scheme(&self, shape: ShapeKind) -> crate::shapes::ColorScheme {
        self.schemes.get(shape)
    }

    /// Enters the chaotic transition state with a fresh timestamp and a
    /// random initial heading.
    pub fn begin_transition(&mut self, now_ms: f64) {
        self.state = AgentState::Transitioning { started_ms: now_ms };
        self.chaos_direction = self.rng.gen_range(0.0..std::f64::consts::TAU);
    }

    /// Called when the orchestrator swaps in a new skeleton. Position is
    /// kept; only the time parameter rewinds to the per-agent phase offset.
    pub fn reset_phase(&mut self) {
        self.state = AgentState::Steady;
        self.t = self.id as f64 * 0.1;
    }

    /// Independently re-rolls the pen: width band, opacity, cap, and the
    /// color spread of this agent's private copy of the current scheme.
    pub fn randomize_pen(&mut self, shape: ShapeKind) {
        self.min_width = self.rng.gen_range(0.0..2.0);
        self.max_width = self.rng.gen_range(5.0..20.0);
        self.opacity = self.rng.gen_range(0.3..0.8);
        self.target_opacity = self.opacity;
        self.cap = match self.rng.gen_range(0..3) {
            0 => LineCap::Round,
            1 => LineCap::Butt,
            _ => LineCap::Square,
        };

        let scheme = self.schemes.get_mut(shape);
        scheme.hue_range = self.rng.gen_range(10.0..70.0);
        scheme.saturation = self.rng.gen_range(40.0..80.0);
        scheme.lightness = self.rng.gen_range(35.0..65.0);
    }

    /// One animation tick: advance the state machine, animate visual
    /// attributes, draw the connecting segment.
    pub fn update(&mut self, world: &mut WorldState, now_ms: f64, surface: &mut dyn RenderSurface) {
        self.last_x = self.x;
        self.last_y = self.y;

        match self.state {
            AgentState::Transitioning { started_ms } => {
                if now_ms - started_ms > self.params.transition_ms {
                    // Back to the skeleton on the next movement; this tick
                    // only flips state, matching the source timing.
                    self.state = AgentState::Steady;
                } else {
                    self.update_chaotic(world);
                }
            }
            AgentState::Steady => self.follow_skeleton(world),
        }

        self.animate_attributes(world);
        self.draw_segment(surface);
    }

    fn follow_skeleton(&mut self, world: &mut WorldState) {
        self.t += T_STEP;
        world.rotation_angle += ROTATION_STEP;

        let pos = sampler::sample(
            self.t,
            &world.skeleton,
            world.rotation_angle,
            world.center_x(),
            world.center_y(),
        );

        if self.history.len() == HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back((pos.x, pos.y));

        let (target_x, target_y) = self.smoothed_target();
        self.x += (target_x - self.x) * FOLLOW_EASE;
        self.y += (target_y - self.y) * FOLLOW_EASE;

        self.depth = pos.depth.clamp(self.params.depth_min, self.params.depth_max);
        self.lighting = pos.lighting;
        self.line_width = self.min_width + (self.max_width - self.min_width) * self.depth;
        self.opacity = 0.2 + self.depth * 0.8;
    }

    /// Weighted blend of the history ring, newest entries heaviest.
    fn smoothed_target(&self) -> (f64, f64) {
        let mut weight = 1.0;
        let mut total = 0.0;
        let mut x = 0.0;
        let mut y = 0.0;
        for (px, py) in self.history.iter().rev() {
            x += px * weight;
            y += py * weight;
            total += weight;
            weight *= SMOOTHING_FACTOR;
        }
        if total == 0.0 {
            return (self.x, self.y);
        }
        (x / total, y / total)
    }

    fn update_chaotic(&mut self, world: &WorldState) {
        self.chaos_direction += (self.rng.gen::<f64>() - 0.5) * self.direction_change_rate;

        self.chaos_speed *= 1.0 + (self.rng.gen::<f64>() - 0.5) * self.speed_variation;
        self.chaos_speed = self.chaos_speed.clamp(CHAOS_MIN_SPEED, CHAOS_MAX_SPEED);

        if self.rng.gen::<f64>() < DIRECTION_JUMP_PROBABILITY {
            self.chaos_direction += std::f64::consts::PI * (self.rng.gen::<f64>() - 0.5);
        }
        if self.rng.gen::<f64>() < SPEED_BURST_PROBABILITY {
            self.chaos_speed *= self.rng.gen::<f64>() * 2.0 + 1.0;
        }

        self.x += self.chaos_direction.cos() * self.chaos_speed;
        self.y += self.chaos_direction.sin() * self.chaos_speed;

        // Reflect off the edges; mirroring the heading keeps the path
        // bouncing instead of hugging the border.
        if self.x < 0.0 || self.x > world.width {
            self.chaos_direction = std::f64::consts::PI - self.chaos_direction;
            self.x = self.x.clamp(0.0, world.width);
        }
        if self.y < 0.0 || self.y > world.height {
            self.chaos_direction = -self.chaos_direction;
            self.y = self.y.clamp(0.0, world.height);
        }
    }

    /// Visual-only drift, independent of the movement state. Fast mode
    /// re-rolls the width target less often but relaxes toward it faster.
    fn animate_attributes(&mut self, world: &WorldState) {
        let (reroll_probability, relax_rate) = if world.fast_mode {
            (0.03, 0.1)
        } else {
            (0.1, 0.25)
        };

        if self.rng.gen::<f64>() < reroll_probability {
            self.target_line_width =
                self.rng.gen::<f64>() * (self.max_width - self.min_width) + self.min_width;
        }
        self.line_width += (self.target_line_width - self.line_width) * relax_rate;

        let scheme = self.schemes.get(world.shape);
        if self.rng.gen::<f64>() < COLOR_REROLL_PROBABILITY {
            self.target_hue = scheme.hue + (self.rng.gen::<f64>() - 0.5) * scheme.hue_range;
            self.saturation = scheme.saturation + (self.rng.gen::<f64>() - 0.5) * 20.0;
            self.lightness = scheme.lightness + (self.rng.gen::<f64>() - 0.5) * 15.0;
            self.target_opacity = self.rng.gen::<f64>() * 0.5 + 0.3;
        }

        self.hue += (self.target_hue - self.hue) * HUE_EASE;
        self.opacity += (self.target_opacity - self.opacity) * OPACITY_EASE;
    }

    /// Appends one stroked segment from the previous to the current
    /// position. Width and opacity scale up with depth, lightness with the
    /// lighting scalar.
    fn draw_segment(&mut self, surface: &mut dyn RenderSurface) {
        let width = self.line_width * (1.0 + self.depth);
        let alpha = (self.opacity * (0.5 + self.depth)).clamp(0.0, 1.0);
        let color = Hsla {
            hue: self.hue,
            saturation: self.saturation,
            lightness: (self.lightness * self.lighting).clamp(0.0, 100.0),
            alpha,
        };

        surface.begin_path();
        surface.move_to(self.last_x, self.last_y);
        if self.history.len() >= 2 {
            // Bow the segment toward the newest raw sample; the eased pen
            // trails it, so the curve leans into the upcoming path.
            let (control_x, control_y) = *self.history.back().unwrap_or(&(self.x, self.y));
            surface.quad_to(control_x, control_y, self.x, self.y);
        } else {
            surface.line_to(self.x, self.y);
        }
        surface.stroke(&StrokeStyle {
            width,
            color,
            cap: self.cap,
            join: self.join,
        });
    }
}
