//! A square gridworld with slippery moves. A robot moves between
//! neighbouring cells; bumping into the outer wall costs a penalty, leaving a
//! penalty cell costs that cell's penalty, and any move out of a reward cell
//! pays the reward and teleports the robot to a random corner.

use crate::mdp::{Mdp, ValueIterationResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// (row, column) displacement.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Move::Up => '^',
            Move::Down => 'v',
            Move::Left => '<',
            Move::Right => '>',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// Which outcomes of a move out of a reward cell teleport to the corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teleport {
    /// Every in-bounds outcome teleports, so probabilities still sum to 1.
    #[default]
    AllOutcomes,
    /// Only the first in-bounds outcome teleports and later outcomes are
    /// dropped. Reproduces the classic script's tables, whose probabilities
    /// for these cells sum to less than 1.
    FirstOutcome,
}

/// Layout and dynamics of a gridworld.
#[derive(Debug, Clone, PartialEq)]
pub struct GridworldConfig {
    /// Side length of the grid
    pub size: usize,
    /// Probability of moving in the chosen direction
    pub intended: f64,
    /// Probability of moving in each of the three other directions
    pub slip: f64,
    /// Reward cells; leaving one pays the reward and teleports to a corner
    pub rewards: Vec<(Cell, f64)>,
    /// Penalty cells; an in-bounds move out of one pays the penalty
    pub penalties: Vec<(Cell, f64)>,
    /// Reward for an outcome that would leave the grid
    pub wall_penalty: f64,
    /// Discount factor the model is usually solved with
    pub gamma: f64,
    /// Teleport rule for reward cells
    pub teleport: Teleport,
}

impl Default for GridworldConfig {
    fn default() -> Self {
        Self {
            size: 10,
            intended: 0.7,
            slip: 0.1,
            rewards: vec![(Cell::new(7, 8), 10.0), (Cell::new(2, 7), 3.0)],
            penalties: vec![(Cell::new(4, 3), -5.0), (Cell::new(7, 3), -10.0)],
            wall_penalty: -1.0,
            gamma: 0.9,
            teleport: Teleport::AllOutcomes,
        }
    }
}

impl GridworldConfig {
    /// All cells in row-major order.
    pub fn cells(&self) -> Vec<Cell> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Cell::new(row, col)))
            .collect()
    }

    pub fn corners(&self) -> [Cell; 4] {
        let last = self.size.saturating_sub(1);
        [
            Cell::new(0, 0),
            Cell::new(0, last),
            Cell::new(last, 0),
            Cell::new(last, last),
        ]
    }

    /// The neighbour of `cell` in direction `m`, or `None` past the wall.
    pub fn step(&self, cell: Cell, m: Move) -> Option<Cell> {
        let (dr, dc) = m.offset();
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        (row < self.size && col < self.size).then_some(Cell::new(row, col))
    }

    fn reward_at(&self, cell: Cell) -> Option<f64> {
        lookup(&self.rewards, cell)
    }

    fn penalty_at(&self, cell: Cell) -> Option<f64> {
        lookup(&self.penalties, cell)
    }

    /// The chosen move first, then the other moves in [`Move::ALL`] order.
    fn outcomes(&self, chosen: Move) -> impl Iterator<Item = (f64, Move)> + '_ {
        std::iter::once((self.intended, chosen)).chain(
            Move::ALL
                .into_iter()
                .filter(move |&m| m != chosen)
                .map(move |m| (self.slip, m)),
        )
    }

    /// Builds the MDP. Every cell offers all four moves.
    pub fn build(&self) -> Mdp<Cell, Move> {
        let cells = self.cells();
        let mut mdp = Mdp::new(cells.clone());

        for &cell in &cells {
            for chosen in Move::ALL {
                mdp.add_action(cell, chosen);
                let mut teleport = 0.0;

                for (p, m) in self.outcomes(chosen) {
                    match self.step(cell, m) {
                        None => {
                            mdp.add_transition(cell, chosen, p, cell, self.wall_penalty);
                        }
                        Some(_) if self.reward_at(cell).is_some() => {
                            teleport += p;
                            if self.teleport == Teleport::FirstOutcome {
                                break;
                            }
                        }
                        Some(next) => {
                            let reward = self.penalty_at(cell).unwrap_or(0.0);
                            mdp.add_transition(cell, chosen, p, next, reward);
                        }
                    }
                }

                if let Some(reward) = self.reward_at(cell) {
                    for corner in self.corners() {
                        mdp.add_transition(cell, chosen, teleport / 4.0, corner, reward);
                    }
                }
            }
        }
        mdp
    }
}

fn lookup(cells: &[(Cell, f64)], cell: Cell) -> Option<f64> {
    cells.iter().find(|(c, _)| *c == cell).map(|&(_, r)| r)
}

/// Builds the default 10x10 gridworld.
pub fn gridworld() -> Mdp<Cell, Move> {
    GridworldConfig::default().build()
}

/// Draws the policy as one line of arrows per row; cells without an action
/// are drawn as `.`.
pub fn render_policy(size: usize, result: &ValueIterationResult<Cell, Move>) -> String {
    let mut out = String::with_capacity(size * (2 * size + 1));
    for row in 0..size {
        let line: Vec<String> = (0..size)
            .map(|col| {
                result
                    .action(&Cell::new(row, col))
                    .map_or('.', |m| m.arrow())
                    .to_string()
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
