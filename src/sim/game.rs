//! One complete run: maze, geometry, headless world and controller

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::controller::{GameController, TickInput, tick};
use super::state::GamePhase;
use super::world::HeadlessWorld;
use crate::config::MazeConfig;
use crate::consts::SIM_DT;
use crate::error::MazeError;
use crate::maze::{Cell, GeometryProjector, GridModel, MazeGenerator, WallRect};

/// A generated maze placed into a [`HeadlessWorld`]
#[derive(Debug, Clone)]
pub struct Game {
    /// Seed the maze was generated from
    pub seed: u64,
    /// Cell generation started from
    pub start: Cell,
    pub grid: GridModel,
    pub walls: Vec<WallRect>,
    pub world: HeadlessWorld,
    pub controller: GameController,
}

impl Game {
    /// Validate `config`, generate the maze and build the world.
    ///
    /// With no configured seed one is drawn at random and logged so the
    /// maze can be reproduced.
    pub fn new(config: &MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let start = match config.start {
            Some((row, column)) => Cell::new(row, column),
            None => Cell::new(
                rng.random_range(0..config.rows),
                rng.random_range(0..config.columns),
            ),
        };
        log::info!(
            "Generating {}x{} maze (seed {}, start {:?})",
            config.rows,
            config.columns,
            seed,
            start
        );

        let mut grid = GridModel::new(config.rows, config.columns)?;
        MazeGenerator::from_rng(rng).generate(&mut grid, start)?;

        let walls = GeometryProjector::new(
            config.unit_width(),
            config.unit_height(),
            config.wall_thickness,
        )
        .project(&grid);

        let mut world = HeadlessWorld::new();
        let controller = GameController::setup(&mut world, config, &walls)?;

        Ok(Self {
            seed,
            start,
            grid,
            walls,
            world,
            controller,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.controller.phase()
    }

    /// Advance one fixed step
    pub fn tick(&mut self, input: &TickInput) -> Result<(), MazeError> {
        tick(&mut self.controller, &mut self.world, input, SIM_DT)?;
        Ok(())
    }
}
