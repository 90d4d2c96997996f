use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{Cost, Search, StateGraph, ZeroOneFrontier};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["search", "bfs"])]
pub struct Solver;

#[derive(Debug)]
pub struct Heightmap {
    grid: Grid,
    start: Pos,
    end: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = Heightmap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut grid = Grid::parse(input)?;
        let start = grid
            .find(b'S')
            .ok_or_else(|| ParseError::MissingData("no start marker 'S'"))?;
        let end = grid
            .find(b'E')
            .ok_or_else(|| ParseError::MissingData("no summit marker 'E'"))?;
        grid.set(start, b'a');
        grid.set(end, b'z');

        grid.validate(|b| b.is_ascii_lowercase())?;

        Ok(Heightmap { grid, start, end })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        fewest_steps(shared, [shared.start]).map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let lowland = shared
            .grid
            .positions()
            .filter(|&pos| shared.grid.get(pos) == Some(b'a'));
        fewest_steps(shared, lowland).map(|steps| steps.to_string())
    }
}

/// Climb at most one elevation step per move; descents are unrestricted.
struct Climb<'a> {
    map: &'a Heightmap,
}

impl StateGraph for Climb<'_> {
    type State = Pos;

    fn neighbors(&self, &pos: &Pos, out: &mut Vec<(Pos, Cost)>) {
        let Some(here) = self.map.grid.get(pos) else {
            return;
        };
        for dir in Direction::ALL {
            let next = pos.step(dir);
            if let Some(there) = self.map.grid.get(next)
                && there <= here + 1
            {
                out.push((next, 1));
            }
        }
    }

    fn is_goal(&self, pos: &Pos) -> bool {
        *pos == self.map.end
    }
}

fn fewest_steps(
    map: &Heightmap,
    starts: impl IntoIterator<Item = Pos>,
) -> Result<Cost, SolveError> {
    let mut search = Search::with_frontier(Climb { map }, ZeroOneFrontier::new());
    search.start_all(starts);
    search
        .run()
        .cost()
        .ok_or_else(|| SolveError::NoSolution("summit is unreachable"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";

    fn solve(input: &str, part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part)
    }

    #[test]
    fn test_example_part1() {
        assert_eq!(solve(EXAMPLE, 1).unwrap(), "31");
    }

    #[test]
    fn test_example_part2() {
        assert_eq!(solve(EXAMPLE, 2).unwrap(), "29");
    }

    #[test]
    fn test_cliff_is_unreachable() {
        assert!(matches!(solve("SacE", 1), Err(SolveError::NoSolution(_))));
    }

    #[test]
    fn test_missing_markers() {
        assert!(matches!(
            Solver::parse("abc\nabE"),
            Err(ParseError::MissingData(_))
        ));
        assert_eq!(
            Solver::parse("Sa1\nabE").err(),
            Some(ParseError::UnexpectedTile {
                row: 0,
                col: 2,
                tile: '1'
            })
        );
    }
}
