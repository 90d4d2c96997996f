use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use smallvec::{SmallVec, smallvec};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{Cost, Search, SearchStatus, StateGraph};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["search", "flood"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        grid.validate(|b| matches!(b, b'.' | b'/' | b'\\' | b'|' | b'-'))?;
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energized(shared, Pos::new(0, 0), Direction::East).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid = shared;
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let rows = (0..height).flat_map(|row| {
            [
                (Pos::new(row, 0), Direction::East),
                (Pos::new(row, width - 1), Direction::West),
            ]
        });
        let cols = (0..width).flat_map(|col| {
            [
                (Pos::new(0, col), Direction::South),
                (Pos::new(height - 1, col), Direction::North),
            ]
        });

        rows.chain(cols)
            .map(|(pos, dir)| energized(grid, pos, dir))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| SolveError::NoSolution("no edge tiles"))
    }
}

/// A beam standing on `pos`, travelling towards `dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Beam {
    pos: Pos,
    dir: Direction,
}

struct Contraption<'a> {
    grid: &'a Grid,
}

impl Contraption<'_> {
    fn deflect(tile: u8, dir: Direction) -> SmallVec<[Direction; 2]> {
        use Direction::*;
        match (tile, dir) {
            (b'/', East) | (b'\\', West) => smallvec![North],
            (b'/', West) | (b'\\', East) => smallvec![South],
            (b'/', North) | (b'\\', South) => smallvec![East],
            (b'/', South) | (b'\\', North) => smallvec![West],
            (b'|', East | West) => smallvec![North, South],
            (b'-', North | South) => smallvec![East, West],
            _ => smallvec![dir],
        }
    }
}

impl StateGraph for Contraption<'_> {
    type State = Beam;

    fn neighbors(&self, beam: &Beam, out: &mut Vec<(Beam, Cost)>) {
        let Some(tile) = self.grid.get(beam.pos) else {
            return;
        };
        for dir in Self::deflect(tile, beam.dir) {
            let pos = beam.pos.step(dir);
            if self.grid.contains(pos) {
                out.push((Beam { pos, dir }, 1));
            }
        }
    }

    // Beams never stop; the search runs until every beam state is seen.
    fn is_goal(&self, _beam: &Beam) -> bool {
        false
    }
}

fn energized(grid: &Grid, pos: Pos, dir: Direction) -> usize {
    let mut search = Search::new(Contraption { grid });
    search.start(Beam { pos, dir });
    search.run();
    debug_assert_eq!(search.status(), SearchStatus::Exhausted);

    search
        .table()
        .iter()
        .map(|(beam, _)| beam.pos)
        .collect::<HashSet<_>>()
        .len()
}
