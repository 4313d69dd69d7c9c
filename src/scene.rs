use rand::{rngs::SmallRng, SeedableRng};

use crate::agent::{Agent, AgentParams};
use crate::schema::SceneConfig;
use crate::surface::RenderSurface;
use crate::world::{SwitchScheduler, WorldState};

/// Splitmix-style spread so consecutive agent ids land on unrelated streams.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Top-level simulation: the shared world, the agent roster, and the
/// deferred shape-switch bookkeeping. Drives one deterministic tick at a
/// time against an externally supplied clock.
pub struct Scene {
    world: WorldState,
    agents: Vec<Agent>,
    scheduler: SwitchScheduler,
    transition_ms: f64,
    rng: SmallRng,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut world = WorldState::new(
            config.shape,
            config.canvas.width as f64,
            config.canvas.height as f64,
            &mut rng,
        );
        world.fast_mode = config.fast_mode;

        let params = AgentParams {
            transition_ms: config.transition_ms,
            depth_min: config.depth_band.min,
            depth_max: config.depth_band.max,
        };
        let agents = (0..config.dots)
            .map(|id| {
                let seed = config.seed.wrapping_add((id as u64).wrapping_mul(SEED_STRIDE));
                Agent::new(id, &world, params, seed)
            })
            .collect();

        Self {
            world,
            agents,
            scheduler: SwitchScheduler::new(),
            transition_ms: config.transition_ms,
            rng,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn switch_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Advances every agent by one frame in id order. If a scheduled shape
    /// switch has come due, the skeleton is swapped first so all agents see
    /// the new shape within the same tick.
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn RenderSurface) {
        if self.scheduler.poll(now_ms) {
            self.world.advance_shape(&mut self.rng);
            for agent in &mut self.agents {
                agent.reset_phase();
            }
            eprintln!(
                "[drawer] shape switch: now tracing {}",
                self.world.shape.label()
            );
        }

        for agent in &mut self.agents {
            agent.update(&mut self.world, now_ms, surface);
        }
    }

    /// Sends every agent into its chaotic transition and schedules the
    /// skeleton swap for when the transitions end. A request made while one
    /// is pending replaces it.
    pub fn request_shape_switch(&mut self, now_ms: f64) {
        self.scheduler.request(now_ms, self.transition_ms);
        for agent in &mut self.agents {
            agent.begin_transition(now_ms);
        }
    }

    /// Re-rolls every pen independently. Purely visual, no movement change.
    pub fn randomize_pens(&mut self) {
        let shape = self.world.shape;
        for agent in &mut self.agents {
            agent.randomize_pen(shape);
        }
    }

    pub fn set_fast_mode(&mut self, fast: bool) {
        self.world.fast_mode = fast;
    }

    pub fn toggle_fast_mode(&mut self) -> bool {
        self.world.fast_mode = !self.world.fast_mode;
        self.world.fast_mode
    }
}
