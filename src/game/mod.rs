pub mod collision;
pub mod entities;
pub mod geometry;
pub mod lifecycle;
pub mod movement;
pub mod scheduler;
pub mod snapshot;
pub mod spawning;
pub mod world;


use std::time::Duration;

pub use entities::{Direction, Tier};
pub use lifecycle::Phase;
pub use scheduler::Scheduler;
pub use snapshot::Snapshot;
pub use world::{TickReport, World};

/// A world plus the scheduler that drives it: the single entry point the
/// front end talks to.
pub struct Game {
    world: World,
    scheduler: Scheduler,
}

impl Game {
    pub fn new(world: World) -> Self {
        let scheduler = Scheduler::new(world.config());
        Self { world, scheduler }
    }

    /// Feeds wall-clock time to the scheduler.
    pub fn advance(&mut self, elapsed: Duration) -> TickReport {
        self.scheduler.advance(elapsed, &mut self.world)
    }

    /// Exactly one fixed step, independent of wall time.
    pub fn step(&mut self) -> TickReport {
        self.scheduler.step(&mut self.world)
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.world.set_direction(direction);
    }

    pub fn set_firing(&mut self, firing: bool) {
        self.world.set_firing(firing);
    }

    pub fn replay(&mut self) -> bool {
        let restarted = self.world.replay();
        if restarted {
            self.scheduler.reset();
        }
        restarted
    }

    pub fn toggle_pause(&mut self) {
        self.world.toggle_pause();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }
}
