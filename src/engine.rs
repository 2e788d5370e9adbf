//! The engine facade: owns the ECS world, runs the tick chain, buffers
//! incoming pointer events and publishes the per-frame pose.

use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::PetConfig;
use crate::constants::MAX_DT;
use crate::error::{EngineError, EngineResult};
use crate::events::{PendingEvents, PetEvent};
use crate::formatter;
use crate::pose::{publish_pose_system, Pose, PoseSnapshot};
use crate::systems::{
    animation_system, behavior_system, drain_events_system, physics_system, AnimationState,
    AnimationTable, BehaviorTimers, BobPhase, Body, DeltaTime, DragState, HoverState, PetBundle,
    PetRng, Position, ScreenBounds, SimClock, Velocity,
};

/// The screen region the pet lives in, in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The simulation engine. Construct one per pet, push pointer events into it
/// as they arrive, call [`Engine::tick`] once per frame and read the
/// resulting [`Pose`] back with [`Engine::pose`].
pub struct Engine {
    world: World,
    schedule: Schedule,
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("world", &self.world)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine with an entropy-seeded behavior RNG.
    pub fn new(config: PetConfig, screen: ScreenRect) -> EngineResult<Self> {
        Self::with_rng(config, screen, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Creates an engine with a fixed RNG seed, for reproducible runs.
    pub fn with_seed(config: PetConfig, screen: ScreenRect, seed: u64) -> EngineResult<Self> {
        Self::with_rng(config, screen, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: PetConfig, screen: ScreenRect, mut rng: SmallRng) -> EngineResult<Self> {
        config.validate().map_err(EngineError::Config)?;

        let (width, height) = config.window.size;
        if screen.width < width as f32 || screen.height < height as f32 {
            return Err(EngineError::InvalidState(format!(
                "screen {}x{} cannot hold a {}x{} pet",
                screen.width, screen.height, width, height
            )));
        }

        let table = AnimationTable::new(&config.sprites).map_err(EngineError::Config)?;

        let min_x = screen.x;
        let max_x = min_x.max(screen.x + screen.width - width as f32);
        let floor_y = screen.y + screen.height - height as f32 - config.window.bottom_offset;
        let bounds = ScreenBounds { min_x, max_x, floor_y };

        let spawn = Vec2::new((min_x + max_x) / 2.0, floor_y);
        info!(
            x = spawn.x,
            y = spawn.y,
            floor_y = bounds.floor_y,
            states = table.state_names().count(),
            "engine created"
        );

        let timers = BehaviorTimers {
            next_hop_at: random_interval(config.physics.hop_interval_ms, &mut rng),
            next_push_at: random_interval(config.movement.walk_interval_ms, &mut rng),
            ..BehaviorTimers::default()
        };
        let bob = BobPhase(rng.random_range(0.0..std::f32::consts::TAU));

        let mut world = World::new();
        world.spawn(PetBundle {
            position: Position(spawn),
            velocity: Velocity(Vec2::ZERO),
            body: Body { on_ground: true },
            drag: DragState::default(),
            hover: HoverState::default(),
            timers,
            bob,
            animation: AnimationState::default(),
        });

        let initial = Pose {
            x: spawn.x,
            y: spawn.y,
            state: Default::default(),
            frame: 0,
            mirrored: false,
        };
        world.insert_resource(config);
        world.insert_resource(bounds);
        world.insert_resource(table);
        world.insert_resource(DeltaTime { seconds: 0.0 });
        world.insert_resource(SimClock::default());
        world.insert_resource(PendingEvents::default());
        world.insert_resource(PetRng(rng));
        world.insert_resource(PoseSnapshot(initial));

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                drain_events_system,
                physics_system,
                behavior_system,
                animation_system,
                publish_pose_system,
            )
                .chain(),
        );

        Ok(Self { world, schedule })
    }

    /// Buffers a pointer event for the next tick. Events never mutate the
    /// simulation between ticks, so this is safe to call at any point in the
    /// frame, including before the first tick.
    pub fn handle_event(&mut self, event: PetEvent) {
        self.world.resource_mut::<PendingEvents>().0.push(event);
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Non-finite or negative deltas are treated as zero and deltas above
    /// [`MAX_DT`] are clamped, so a suspended or lagging host wakes up to one
    /// bounded catch-up step instead of a teleport.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

        {
            let mut clock = self.world.resource_mut::<SimClock>();
            clock.now += dt;
            clock.tick += 1;
            if clock.tick % 600 == 0 {
                debug!(tick = clock.tick, now = clock.now, "simulation heartbeat");
            }
        }
        self.world.insert_resource(DeltaTime { seconds: dt });
        formatter::increment_tick();

        self.schedule.run(&mut self.world);
    }

    /// The pose published by the most recent tick.
    pub fn pose(&self) -> Pose {
        self.world.resource::<PoseSnapshot>().0
    }

    /// Seconds of simulated time since construction.
    pub fn now(&self) -> f32 {
        self.world.resource::<SimClock>().now
    }

    /// The compiled animation table, for callers preloading sprite sheets.
    pub fn animation_table(&self) -> &AnimationTable {
        self.world.resource::<AnimationTable>()
    }
}

fn random_interval(range_ms: (u32, u32), rng: &mut SmallRng) -> f32 {
    rng.random_range(range_ms.0..=range_ms.1) as f32 / 1000.0
}
