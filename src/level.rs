//! Maze generation and the obstacle field derived from it.
//!
//! A level is built in two steps: `Maze::generate` carves a perfect maze
//! over a cell grid with randomized depth-first search, then
//! `Level::build` converts the surviving walls into rows and columns of
//! circular obstacles in screen space.

use crate::config;
use crate::types::Point;
use log::info;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Level construction errors
#[derive(Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("maze dimensions must be at least 1x1, got {width}x{height}")]
    DegenerateDimensions { width: u32, height: u32 },
    #[error("could not sample a target cell distinct from the start cell")]
    TargetSamplingExhausted,
    #[error("cell size {cell_width:.1}x{cell_height:.1} is too small for obstacle radius {radius}")]
    CellTooSmall {
        cell_width: f64,
        cell_height: f64,
        radius: f64,
    },
}

/// One maze grid unit. Only the up and left walls are stored; the down
/// and right walls belong to the neighboring cells (or the screen
/// border). Immutable once generation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub wall_up: bool,
    pub wall_left: bool,
    visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            wall_up: true,
            wall_left: true,
            visited: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Up,
    Down,
    Left,
    Right,
}

const SIDES: [Side; 4] = [Side::Up, Side::Down, Side::Left, Side::Right];

// One carving step in flight: a cell and its own shuffled direction
// order, tried one entry at a time.
struct Frame {
    x: u32,
    y: u32,
    order: [Side; 4],
    next: usize,
}

impl Frame {
    fn new(x: u32, y: u32, rng: &mut impl Rng) -> Self {
        let mut order = SIDES;
        order.shuffle(rng);
        Frame { x, y, order, next: 0 }
    }
}

/// A carved maze over a width x height cell grid, plus the sampled
/// start and target cells.
#[derive(Debug, Clone)]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    start: (u32, u32),
    target: (u32, u32),
}

impl Maze {
    /// Carve a perfect maze. Start and target cells are sampled
    /// uniformly, the target re-rolled until it differs from the start.
    pub fn generate(width: u32, height: u32, rng: &mut impl Rng) -> Result<Maze, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::DegenerateDimensions { width, height });
        }

        let start = (rng.gen_range(0..width), rng.gen_range(0..height));
        let mut target = (rng.gen_range(0..width), rng.gen_range(0..height));
        let mut attempts = 0;
        while target == start {
            attempts += 1;
            if attempts > config::TARGET_RESAMPLE_LIMIT {
                return Err(LevelError::TargetSamplingExhausted);
            }
            target = (rng.gen_range(0..width), rng.gen_range(0..height));
        }

        let mut maze = Maze {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            start,
            target,
        };
        maze.carve_passages(rng);

        info!("Generated {}x{} maze", width, height);
        crate::debug_level!("start cell {:?}, target cell {:?}", start, target);
        Ok(maze)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn start(&self) -> (u32, u32) {
        self.start
    }

    pub fn target(&self) -> (u32, u32) {
        self.target
    }

    pub fn cell(&self, x: u32, y: u32) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    fn cell_mut(&mut self, x: u32, y: u32) -> &mut Cell {
        let index = self.index(x, y);
        &mut self.cells[index]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    // Depth-first carving with an explicit stack. Every frame keeps its
    // own shuffled direction order, matching the recursive formulation
    // without risking stack exhaustion on large grids.
    fn carve_passages(&mut self, rng: &mut impl Rng) {
        let (start_x, start_y) = self.start;
        self.cell_mut(start_x, start_y).visited = true;
        let mut stack = vec![Frame::new(start_x, start_y, rng)];

        while let Some(top) = stack.last_mut() {
            if top.next >= top.order.len() {
                stack.pop();
                continue;
            }
            let side = top.order[top.next];
            top.next += 1;
            let (x, y) = (top.x, top.y);

            if let Some((nx, ny)) = self.neighbor(x, y, side) {
                if !self.cell(nx, ny).visited {
                    self.open_wall(x, y, nx, ny, side);
                    self.cell_mut(nx, ny).visited = true;
                    stack.push(Frame::new(nx, ny, rng));
                }
            }
        }
    }

    // Bounds-checked neighbor lookup, no wraparound.
    fn neighbor(&self, x: u32, y: u32, side: Side) -> Option<(u32, u32)> {
        match side {
            Side::Up => (y > 0).then(|| (x, y - 1)),
            Side::Down => (y + 1 < self.height).then(|| (x, y + 1)),
            Side::Left => (x > 0).then(|| (x - 1, y)),
            Side::Right => (x + 1 < self.width).then(|| (x + 1, y)),
        }
    }

    // The wall between two adjacent cells lives on exactly one of them:
    // up/left on the current cell, down/right on the neighbor.
    fn open_wall(&mut self, x: u32, y: u32, nx: u32, ny: u32, side: Side) {
        match side {
            Side::Up => self.cell_mut(x, y).wall_up = false,
            Side::Down => self.cell_mut(nx, ny).wall_up = false,
            Side::Left => self.cell_mut(x, y).wall_left = false,
            Side::Right => self.cell_mut(nx, ny).wall_left = false,
        }
    }
}

/// An obstacle in the navigation field: a fixed position plus the
/// display state toggled by the scan loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Point,
    pub in_sight: bool,
}

impl Obstacle {
    pub fn new(position: Point) -> Self {
        Obstacle {
            position,
            in_sight: false,
        }
    }
}

/// The screen-space realization of a maze: obstacle circles along every
/// remaining wall and the uncovered screen borders, pixel-center start
/// and target positions, and the per-level viewing radius.
#[derive(Debug, Clone)]
pub struct Level {
    pub maze: Maze,
    pub obstacles: Vec<Obstacle>,
    pub start: Point,
    pub target: Point,
    pub cell_width: f64,
    pub cell_height: f64,
    pub view_radius: f64,
}

impl Level {
    pub fn build(
        maze: Maze,
        screen_width: f64,
        screen_height: f64,
        obstacle_radius: f64,
    ) -> Result<Level, LevelError> {
        let cell_width = screen_width / maze.width() as f64;
        let cell_height = screen_height / maze.height() as f64;

        let per_horizontal_wall = (cell_width / obstacle_radius) as u32;
        let per_vertical_wall = (cell_height / obstacle_radius) as u32;
        if per_horizontal_wall == 0 || per_vertical_wall == 0 {
            return Err(LevelError::CellTooSmall {
                cell_width,
                cell_height,
                radius: obstacle_radius,
            });
        }

        let (start_x, start_y) = maze.start();
        let (target_x, target_y) = maze.target();
        let mut level = Level {
            start: Point::new(
                cell_width * (start_x as f64 + 0.5),
                cell_height * (start_y as f64 + 0.5),
            ),
            target: Point::new(
                cell_width * (target_x as f64 + 0.5),
                cell_height * (target_y as f64 + 0.5),
            ),
            view_radius: config::VIEW_CONE_RADIUS_SCALE * cell_width.min(cell_height),
            obstacles: Vec::new(),
            cell_width,
            cell_height,
            maze,
        };

        level.place_border_obstacles(screen_width, screen_height, obstacle_radius);

        for x in 0..level.maze.width() {
            for y in 0..level.maze.height() {
                let center_x = cell_width * (x as f64 + 0.5);
                let center_y = cell_height * (y as f64 + 0.5);
                let cell = *level.maze.cell(x, y);
                if cell.wall_up {
                    level.place_wall_above(center_x, center_y, per_horizontal_wall);
                }
                if cell.wall_left {
                    level.place_wall_left_of(center_x, center_y, per_vertical_wall);
                }
            }
        }

        info!("Placed {} obstacles", level.obstacles.len());
        Ok(level)
    }

    fn place_wall_above(&mut self, center_x: f64, center_y: f64, count: u32) {
        let step = self.cell_width / count as f64;
        let wall_y = center_y - self.cell_height / 2.0;
        let wall_x_start = center_x - self.cell_width / 2.0;

        for i in 0..count {
            let x = wall_x_start + i as f64 * step;
            self.obstacles.push(Obstacle::new(Point::new(x, wall_y)));
        }
    }

    fn place_wall_left_of(&mut self, center_x: f64, center_y: f64, count: u32) {
        let step = self.cell_height / count as f64;
        let wall_x = center_x - self.cell_width / 2.0;
        let wall_y_start = center_y - self.cell_height / 2.0;

        for i in 0..count {
            let y = wall_y_start + i as f64 * step;
            self.obstacles.push(Obstacle::new(Point::new(wall_x, y)));
        }
    }

    // The top and left screen borders coincide with the outermost
    // wall_up/wall_left rows; only the bottom and right edges need
    // their own obstacles.
    fn place_border_obstacles(&mut self, screen_width: f64, screen_height: f64, radius: f64) {
        let x_steps = (screen_width / radius) as u32;
        let y_steps = (screen_height / radius) as u32;

        for i in 0..x_steps {
            let x = i as f64 * radius;
            self.obstacles
                .push(Obstacle::new(Point::new(x, screen_height)));
        }

        for i in 0..y_steps {
            let y = i as f64 * radius;
            self.obstacles
                .push(Obstacle::new(Point::new(screen_width, y)));
        }
    }
}
