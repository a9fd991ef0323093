//! Ball, goal and the win-condition state machine
//!
//! The controller places the maze into a [`PhysicsWorld`], maps released keys
//! to velocity changes, and watches started contact pairs for the ball
//! touching the goal. That transition happens once: gravity switches on and
//! every interior wall turns dynamic so the maze collapses.

use glam::Vec2;

use super::physics::{BodyDesc, BodyHandle, ContactPair, Material, PhysicsWorld};
use super::state::{BodyLabel, GameEvent, GamePhase, Key};
use crate::config::MazeConfig;
use crate::maze::WallRect;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys released since the last tick, in release order
    pub released: Vec<Key>,
}

/// Owns the ball and goal handles and the game phase
#[derive(Debug, Clone)]
pub struct GameController {
    ball: BodyHandle,
    goal: BodyHandle,
    phase: GamePhase,
    /// Velocity added per released key
    impulse: f32,
    /// Gravity Y applied on win
    win_gravity: f32,
    /// Pending notifications for the UI layer
    events: Vec<GameEvent>,
    /// Walls still to release once the goal is reached; the phase stays
    /// `Exploring` until this drains
    collapsing: Option<Vec<BodyHandle>>,
    /// Reused buffer for started contacts
    contacts: Vec<ContactPair>,
}

impl GameController {
    /// Register walls, goal and ball with `world`.
    ///
    /// The goal sits in the bottom-right cell and the ball in the top-left
    /// cell of a grid sized by `config`.
    pub fn setup<W: PhysicsWorld>(
        world: &mut W,
        config: &MazeConfig,
        walls: &[WallRect],
    ) -> Result<Self, W::Error> {
        world.add_bodies(walls.iter().map(|wall| {
            let label = if wall.is_interior() {
                BodyLabel::Wall
            } else {
                BodyLabel::Boundary
            };
            BodyDesc::static_rect(label, wall.center, wall.size)
        }))?;

        let unit = config.unit();
        let extent = Vec2::new(config.columns as f32, config.rows as f32) * unit;

        let goal = world.add_body(BodyDesc::static_rect(
            BodyLabel::Goal,
            extent - unit / 2.0,
            unit * config.goal_scale,
        ))?;

        let ball = world.add_body(
            BodyDesc::dynamic_circle(BodyLabel::Ball, unit / 2.0, config.ball_radius())
                .with_material(Material {
                    friction: config.ball_friction,
                    air_friction: config.ball_air_friction,
                    restitution: config.ball_restitution,
                }),
        )?;

        log::debug!(
            "Placed {} walls, goal {:?}, ball {:?}",
            walls.len(),
            goal,
            ball
        );

        Ok(Self {
            ball,
            goal,
            phase: GamePhase::Exploring,
            impulse: config.impulse,
            win_gravity: config.win_gravity,
            events: Vec::new(),
            collapsing: None,
            contacts: Vec::new(),
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn ball(&self) -> BodyHandle {
        self.ball
    }

    pub fn goal(&self) -> BodyHandle {
        self.goal
    }

    /// Take pending UI notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one released key to the ball's current velocity.
    ///
    /// Impulses stack without a speed cap. Ignored once the game is won.
    pub fn key_up<W: PhysicsWorld>(&mut self, world: &mut W, key: Key) -> Result<(), W::Error> {
        if self.phase == GamePhase::Won {
            log::debug!("Ignoring {:?} after win", key);
            return Ok(());
        }
        let velocity = world.velocity(self.ball)?;
        world.set_velocity(self.ball, velocity + key.velocity_delta(self.impulse))
    }

    /// Feed one step's batch of started contacts.
    ///
    /// Returns `true` if this batch completed the win. If the world fails
    /// while releasing walls the error is returned and the phase stays
    /// `Exploring`; the next call finishes the remaining walls without
    /// touching gravity again.
    pub fn on_collision_start<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        pairs: &[ContactPair],
    ) -> Result<bool, W::Error> {
        if self.phase == GamePhase::Won {
            return Ok(false);
        }
        if self.collapsing.is_none() {
            if !pairs
                .iter()
                .any(|pair| pair.is_between(BodyLabel::Ball, BodyLabel::Goal))
            {
                return Ok(false);
            }
            world.set_gravity_y(self.win_gravity);
            let walls = world.bodies_labeled(BodyLabel::Wall);
            log::info!("Goal reached, collapsing {} walls", walls.len());
            self.collapsing = Some(walls);
        }

        let pending = self.collapsing.get_or_insert_with(Vec::new);
        while let Some(&wall) = pending.last() {
            world.set_static(wall, false)?;
            pending.pop();
        }

        self.collapsing = None;
        self.phase = GamePhase::Won;
        self.events.push(GameEvent::Won);
        Ok(true)
    }
}

/// Advance the game by one fixed step: apply released keys, step the world,
/// then run the win check on the contacts that started.
pub fn tick<W: PhysicsWorld>(
    controller: &mut GameController,
    world: &mut W,
    input: &TickInput,
    dt: f32,
) -> Result<(), W::Error> {
    for &key in &input.released {
        controller.key_up(world, key)?;
    }

    let mut contacts = std::mem::take(&mut controller.contacts);
    contacts.clear();
    world.step(dt, &mut contacts)?;
    let result = controller.on_collision_start(world, &contacts);
    controller.contacts = contacts;
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::maze::{Cell, generate_maze, project};
    use crate::sim::world::{HeadlessWorld, WorldError};

    /// Records every call the controller makes
    #[derive(Debug, Default)]
    struct RecordingWorld {
        labels: Vec<BodyLabel>,
        statics: Vec<bool>,
        velocities: Vec<Vec2>,
        gravity_y: f32,
        gravity_sets: usize,
        static_toggles: usize,
        static_calls: usize,
        /// 1-based `set_static` call that fails
        fail_static_call: Option<usize>,
        /// Batches handed out by successive `step` calls
        scripted: Vec<Vec<ContactPair>>,
    }

    impl PhysicsWorld for RecordingWorld {
        type Error = WorldError;

        fn add_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, WorldError> {
            self.labels.push(desc.label);
            self.statics.push(desc.is_static);
            self.velocities.push(Vec2::ZERO);
            Ok(BodyHandle(self.labels.len() as u32 - 1))
        }

        fn velocity(&self, body: BodyHandle) -> Result<Vec2, WorldError> {
            self.velocities
                .get(body.0 as usize)
                .copied()
                .ok_or(WorldError::UnknownBody(body))
        }

        fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) -> Result<(), WorldError> {
            let slot = self
                .velocities
                .get_mut(body.0 as usize)
                .ok_or(WorldError::UnknownBody(body))?;
            *slot = velocity;
            Ok(())
        }

        fn set_static(&mut self, body: BodyHandle, is_static: bool) -> Result<(), WorldError> {
            self.static_calls += 1;
            if self.fail_static_call == Some(self.static_calls) {
                return Err(WorldError::UnknownBody(body));
            }
            let slot = self
                .statics
                .get_mut(body.0 as usize)
                .ok_or(WorldError::UnknownBody(body))?;
            *slot = is_static;
            self.static_toggles += 1;
            Ok(())
        }

        fn gravity_y(&self) -> f32 {
            self.gravity_y
        }

        fn set_gravity_y(&mut self, gravity_y: f32) {
            self.gravity_y = gravity_y;
            self.gravity_sets += 1;
        }

        fn bodies_labeled(&self, label: BodyLabel) -> Vec<BodyHandle> {
            self.labels
                .iter()
                .enumerate()
                .filter(|(_, l)| **l == label)
                .map(|(i, _)| BodyHandle(i as u32))
                .collect()
        }

        fn step(&mut self, _dt: f32, started: &mut Vec<ContactPair>) -> Result<(), WorldError> {
            if !self.scripted.is_empty() {
                started.extend(self.scripted.remove(0));
            }
            Ok(())
        }
    }

    fn small_config() -> MazeConfig {
        MazeConfig {
            rows: 3,
            columns: 3,
            viewport_width: 300.0,
            viewport_height: 300.0,
            seed: Some(1),
            ..Default::default()
        }
    }

    fn setup_recording() -> (RecordingWorld, GameController) {
        let config = small_config();
        let grid = generate_maze(3, 3, Cell::new(0, 0), 1).unwrap();
        let walls = project(&grid, config.unit_width(), config.unit_height());
        let mut world = RecordingWorld::default();
        let controller = GameController::setup(&mut world, &config, &walls).unwrap();
        (world, controller)
    }

    fn pair(
        world: &RecordingWorld,
        a: BodyHandle,
        b: BodyHandle,
    ) -> ContactPair {
        ContactPair {
            body_a: a,
            label_a: world.labels[a.0 as usize],
            body_b: b,
            label_b: world.labels[b.0 as usize],
        }
    }

    fn some_wall(world: &RecordingWorld) -> BodyHandle {
        world.bodies_labeled(BodyLabel::Wall)[0]
    }

    #[test]
    fn test_setup_places_bodies() {
        let (world, controller) = setup_recording();
        assert_eq!(world.bodies_labeled(BodyLabel::Boundary).len(), 4);
        assert_eq!(world.bodies_labeled(BodyLabel::Goal), vec![controller.goal()]);
        assert_eq!(world.bodies_labeled(BodyLabel::Ball), vec![controller.ball()]);
        // 3x3 spanning tree leaves 12 - 8 = 4 interior walls
        assert_eq!(world.bodies_labeled(BodyLabel::Wall).len(), 4);
        assert!(!world.statics[controller.ball().0 as usize]);
        assert!(world.statics[controller.goal().0 as usize]);
        assert_eq!(controller.phase(), GamePhase::Exploring);
    }

    #[test]
    fn test_win_transition_fires_once() {
        let (mut world, mut controller) = setup_recording();
        let hit = pair(&world, controller.ball(), controller.goal());
        let walls = world.bodies_labeled(BodyLabel::Wall).len();

        assert!(controller.on_collision_start(&mut world, &[hit]).unwrap());
        assert!(controller.is_won());
        assert_eq!(world.gravity_y, 1.0);
        assert_eq!(world.gravity_sets, 1);
        assert_eq!(world.static_toggles, walls);

        for _ in 0..5 {
            assert!(!controller.on_collision_start(&mut world, &[hit, hit]).unwrap());
        }
        assert_eq!(world.gravity_sets, 1);
        assert_eq!(world.static_toggles, walls);
        assert_eq!(controller.drain_events(), vec![GameEvent::Won]);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_collapse_spares_boundaries_and_goal() {
        let (mut world, mut controller) = setup_recording();
        let hit = pair(&world, controller.goal(), controller.ball());
        controller.on_collision_start(&mut world, &[hit]).unwrap();

        for wall in world.bodies_labeled(BodyLabel::Wall) {
            assert!(!world.statics[wall.0 as usize]);
        }
        for boundary in world.bodies_labeled(BodyLabel::Boundary) {
            assert!(world.statics[boundary.0 as usize]);
        }
        assert!(world.statics[controller.goal().0 as usize]);
    }

    #[test]
    fn test_non_goal_contacts_do_not_win() {
        let (mut world, mut controller) = setup_recording();
        let wall = some_wall(&world);
        let batch = [
            pair(&world, controller.ball(), wall),
            pair(&world, wall, controller.goal()),
        ];
        for _ in 0..3 {
            assert!(!controller.on_collision_start(&mut world, &batch).unwrap());
        }
        assert_eq!(controller.phase(), GamePhase::Exploring);
        assert_eq!(world.gravity_sets, 0);
        assert_eq!(world.static_toggles, 0);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_mixed_batch_wins() {
        let (mut world, mut controller) = setup_recording();
        let wall = some_wall(&world);
        let batch = [
            pair(&world, controller.ball(), wall),
            pair(&world, controller.goal(), controller.ball()),
        ];
        assert!(controller.on_collision_start(&mut world, &batch).unwrap());
    }

    #[test]
    fn test_impulses_accumulate_without_cap() {
        let (mut world, mut controller) = setup_recording();
        let ball = controller.ball();
        for _ in 0..10 {
            controller.key_up(&mut world, Key::Right).unwrap();
        }
        controller.key_up(&mut world, Key::Up).unwrap();
        controller.key_up(&mut world, Key::Down).unwrap();
        controller.key_up(&mut world, Key::Down).unwrap();
        assert_eq!(world.velocity(ball).unwrap(), Vec2::new(50.0, 5.0));

        controller.key_up(&mut world, Key::Left).unwrap();
        assert_eq!(world.velocity(ball).unwrap(), Vec2::new(45.0, 5.0));
    }

    #[test]
    fn test_keys_ignored_after_win() {
        let (mut world, mut controller) = setup_recording();
        let hit = pair(&world, controller.ball(), controller.goal());
        controller.on_collision_start(&mut world, &[hit]).unwrap();
        controller.key_up(&mut world, Key::Right).unwrap();
        assert_eq!(world.velocity(controller.ball()).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_tick_applies_keys_and_contacts() {
        let (mut world, mut controller) = setup_recording();
        let hit = pair(&world, controller.ball(), controller.goal());
        world.scripted = vec![Vec::new(), vec![hit], vec![hit]];

        let input = TickInput {
            released: vec![Key::Down, Key::Right],
        };
        tick(&mut controller, &mut world, &input, SIM_DT).unwrap();
        assert_eq!(world.velocity(controller.ball()).unwrap(), Vec2::new(5.0, 5.0));
        assert_eq!(controller.phase(), GamePhase::Exploring);

        tick(&mut controller, &mut world, &TickInput::default(), SIM_DT).unwrap();
        assert!(controller.is_won());
        tick(&mut controller, &mut world, &TickInput::default(), SIM_DT).unwrap();
        assert_eq!(world.gravity_sets, 1);
    }

    #[test]
    fn test_world_errors_pass_through() {
        let (_, mut controller) = setup_recording();
        let mut empty = RecordingWorld::default();
        let ball = controller.ball();
        assert_eq!(
            controller.key_up(&mut empty, Key::Up),
            Err(WorldError::UnknownBody(ball))
        );
    }

    #[test]
    fn test_failed_collapse_resumes_on_next_batch() {
        let (mut world, mut controller) = setup_recording();
        let hit = pair(&world, controller.ball(), controller.goal());
        let walls = world.bodies_labeled(BodyLabel::Wall);
        world.fail_static_call = Some(2);

        assert!(matches!(
            controller.on_collision_start(&mut world, &[hit]),
            Err(WorldError::UnknownBody(_))
        ));
        assert_eq!(controller.phase(), GamePhase::Exploring);
        assert!(controller.drain_events().is_empty());
        assert_eq!(world.static_toggles, 1);

        // The ball stays on the goal, so no new ball/goal pair arrives
        assert!(controller.on_collision_start(&mut world, &[]).unwrap());
        assert!(controller.is_won());
        assert_eq!(controller.drain_events(), vec![GameEvent::Won]);
        assert_eq!(world.gravity_sets, 1);
        assert_eq!(world.static_toggles, walls.len());
        for wall in walls {
            assert!(!world.statics[wall.0 as usize]);
        }

        assert!(!controller.on_collision_start(&mut world, &[hit]).unwrap());
        assert_eq!(world.gravity_sets, 1);
    }

    #[test]
    fn test_ball_reaches_goal_in_headless_world() {
        let config = MazeConfig {
            rows: 1,
            columns: 2,
            viewport_width: 200.0,
            viewport_height: 100.0,
            ..Default::default()
        };
        let grid = generate_maze(1, 2, Cell::new(0, 0), 0).unwrap();
        let walls = project(&grid, config.unit_width(), config.unit_height());
        let mut world = HeadlessWorld::new();
        let mut controller = GameController::setup(&mut world, &config, &walls).unwrap();

        let push = TickInput {
            released: vec![Key::Right, Key::Right],
        };
        tick(&mut controller, &mut world, &push, SIM_DT).unwrap();
        for _ in 0..120 {
            if controller.is_won() {
                break;
            }
            tick(&mut controller, &mut world, &TickInput::default(), SIM_DT).unwrap();
        }
        assert!(controller.is_won());
        assert_eq!(world.gravity_y(), config.win_gravity);
    }
}
