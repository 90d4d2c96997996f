use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{BucketFrontier, Cost, Search, StateGraph};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["search", "astar"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        grid.validate(|b| matches!(b, b'1'..=b'9'))?;
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 1, 3).map(|loss| loss.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 4, 10).map(|loss| loss.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Crucible {
    pos: Pos,
    dir: Direction,
    run: u8,
}

/// Must move `min_run` blocks before turning or stopping, and may not move
/// more than `max_run` blocks in a straight line. No reversing.
struct City<'a> {
    grid: &'a Grid,
    factory: Pos,
    min_run: u8,
    max_run: u8,
}

impl StateGraph for City<'_> {
    type State = Crucible;

    fn neighbors(&self, crucible: &Crucible, out: &mut Vec<(Crucible, Cost)>) {
        let turns = [crucible.dir.turn_left(), crucible.dir.turn_right()];
        let straight = (crucible.run < self.max_run).then_some(crucible.dir);
        let turns = (crucible.run >= self.min_run).then_some(turns);

        for dir in straight.into_iter().chain(turns.into_iter().flatten()) {
            let pos = crucible.pos.step(dir);
            let Some(loss) = self.grid.get(pos) else {
                continue;
            };
            let run = if dir == crucible.dir { crucible.run + 1 } else { 1 };
            out.push((Crucible { pos, dir, run }, Cost::from(loss - b'0')));
        }
    }

    fn is_goal(&self, crucible: &Crucible) -> bool {
        crucible.pos == self.factory && crucible.run >= self.min_run
    }

    // every block loses at least 1 heat
    fn heuristic(&self, crucible: &Crucible) -> Cost {
        Cost::from(crucible.pos.manhattan(self.factory))
    }
}

fn least_heat_loss(grid: &Grid, min_run: u8, max_run: u8) -> Result<Cost, SolveError> {
    let factory = Pos::new(grid.height() as i32 - 1, grid.width() as i32 - 1);
    let city = City {
        grid,
        factory,
        min_run,
        max_run,
    };

    let mut search = Search::with_frontier(city, BucketFrontier::new());
    search.start_all([Direction::East, Direction::South].map(|dir| Crucible {
        pos: Pos::new(0, 0),
        dir,
        run: 0,
    }));
    search
        .run()
        .cost()
        .ok_or_else(|| SolveError::NoSolution("the factory cannot be reached"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    const UNLUCKY: &str = "\
111111111111
999999999991
999999999991
999999999991
999999999991
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example_part1() {
        assert_eq!(solve(EXAMPLE, 1), "102");
    }

    #[test]
    fn test_example_part2() {
        assert_eq!(solve(EXAMPLE, 2), "94");
        assert_eq!(solve(UNLUCKY, 2), "71");
    }

    #[test]
    fn test_ultra_crucible_cannot_stop_early() {
        // a 1x3 strip is too short for four straight blocks
        let mut shared = Solver::parse("111").unwrap();
        let result = <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2);
        assert!(matches!(result, Err(SolveError::NoSolution(_))));
        assert_eq!(solve("111", 1), "2");
    }
}
