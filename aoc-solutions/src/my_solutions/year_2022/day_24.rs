use std::iter;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{Cost, Search, StateGraph, ZeroOneFrontier};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 24, tags = ["search", "bfs", "time"])]
pub struct Solver;

/// Walled valley; blizzards move one tile per minute and wrap around the
/// inner area, so the whole valley repeats every `period` minutes.
#[derive(Debug)]
pub struct Valley {
    grid: Grid,
    width: i32,
    height: i32,
    entrance: Pos,
    exit: Pos,
    period: u32,
}

impl AocParser for Solver {
    type SharedData<'a> = Valley;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if grid.width() < 3 || grid.height() < 3 {
            return Err(ParseError::InvalidFormat("valley needs walls on all sides".into()));
        }
        let gap = |row: usize| {
            grid.row(row)
                .iter()
                .position(|&b| b == b'.')
                .map(|col| Pos::new(row as i32, col as i32))
        };
        let entrance =
            gap(0).ok_or_else(|| ParseError::MissingData("no gap in the top wall"))?;
        let exit = gap(grid.height() - 1)
            .ok_or_else(|| ParseError::MissingData("no gap in the bottom wall"))?;

        grid.validate(|b| matches!(b, b'#' | b'.' | b'>' | b'<' | b'^' | b'v'))?;

        let width = grid.width() as i32 - 2;
        let height = grid.height() as i32 - 2;
        Ok(Valley {
            period: lcm(width as u32, height as u32),
            grid,
            width,
            height,
            entrance,
            exit,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        fastest_trip(shared, 1).map(|minutes| minutes.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // there, back for the snacks, and there again
        fastest_trip(shared, 3).map(|minutes| minutes.to_string())
    }
}

impl Valley {
    /// Whether `pos` is free of walls and blizzards at minute `time`.
    fn is_clear(&self, pos: Pos, time: u32) -> bool {
        if pos == self.entrance || pos == self.exit {
            return true;
        }
        if !(1..=self.height).contains(&pos.row) || !(1..=self.width).contains(&pos.col) {
            return false;
        }
        let (row, col) = (pos.row - 1, pos.col - 1);
        let t = time as i32;
        let inner = |r: i32, c: i32| self.grid.get(Pos::new(r + 1, c + 1));

        inner(row, (col - t).rem_euclid(self.width)) != Some(b'>')
            && inner(row, (col + t).rem_euclid(self.width)) != Some(b'<')
            && inner((row - t).rem_euclid(self.height), col) != Some(b'v')
            && inner((row + t).rem_euclid(self.height), col) != Some(b'^')
    }

    /// Even legs head for the exit, odd legs back to the entrance.
    fn target(&self, leg: u8) -> Pos {
        if leg % 2 == 0 { self.exit } else { self.entrance }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Expedition {
    pos: Pos,
    phase: u32,
    leg: u8,
}

struct Trip<'a> {
    valley: &'a Valley,
    legs: u8,
}

impl StateGraph for Trip<'_> {
    type State = Expedition;

    fn neighbors(&self, state: &Expedition, out: &mut Vec<(Expedition, Cost)>) {
        let phase = (state.phase + 1) % self.valley.period;
        let target = self.valley.target(state.leg);
        let moves = Direction::ALL.map(|dir| state.pos.step(dir));

        for pos in iter::once(state.pos).chain(moves) {
            if self.valley.is_clear(pos, phase) {
                let leg = if pos == target { state.leg + 1 } else { state.leg };
                out.push((Expedition { pos, phase, leg }, 1));
            }
        }
    }

    fn is_goal(&self, state: &Expedition) -> bool {
        state.leg == self.legs
    }
}

fn fastest_trip(valley: &Valley, legs: u8) -> Result<Cost, SolveError> {
    let mut search = Search::with_frontier(Trip { valley, legs }, ZeroOneFrontier::new());
    search.start(Expedition {
        pos: valley.entrance,
        phase: 0,
        leg: 0,
    });
    search
        .run()
        .cost()
        .ok_or_else(|| SolveError::NoSolution("the blizzards never let up"))
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: u32, b: u32) -> u32 {
    a / gcd(a, b) * b
}
