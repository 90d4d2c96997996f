use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{Cost, Search, SearchMode, StateGraph};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["search", "all-paths"])]
pub struct Solver;

const STEP_COST: Cost = 1;
const TURN_COST: Cost = 1000;

#[derive(Debug)]
pub struct SharedData {
    grid: Grid,
    start: Pos,
    end: Pos,
    best_seats: Option<BestSeats>,
}

/// Lowest score and the number of tiles on any lowest-score path.
#[derive(Debug, Clone, Copy)]
pub struct BestSeats {
    score: Cost,
    tiles: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        grid.validate(|b| matches!(b, b'#' | b'.' | b'S' | b'E'))?;
        let start = grid
            .find(b'S')
            .ok_or_else(|| ParseError::MissingData("no start tile 'S'"))?;
        let end = grid
            .find(b'E')
            .ok_or_else(|| ParseError::MissingData("no end tile 'E'"))?;
        Ok(SharedData {
            grid,
            start,
            end,
            best_seats: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_once_for_both(shared).map(|seats| seats.score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_once_for_both(shared).map(|seats| seats.tiles.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Reindeer {
    pos: Pos,
    facing: Direction,
}

struct Maze<'a> {
    grid: &'a Grid,
    end: Pos,
}

impl StateGraph for Maze<'_> {
    type State = Reindeer;

    fn neighbors(&self, reindeer: &Reindeer, out: &mut Vec<(Reindeer, Cost)>) {
        let ahead = reindeer.pos.step(reindeer.facing);
        if self.grid.get(ahead).is_some_and(|tile| tile != b'#') {
            out.push((
                Reindeer {
                    pos: ahead,
                    ..*reindeer
                },
                STEP_COST,
            ));
        }
        for facing in [reindeer.facing.turn_left(), reindeer.facing.turn_right()] {
            out.push((Reindeer { facing, ..*reindeer }, TURN_COST));
        }
    }

    fn is_goal(&self, reindeer: &Reindeer) -> bool {
        reindeer.pos == self.end
    }
}

fn solve_once_for_both(shared: &mut SharedData) -> Result<BestSeats, SolveError> {
    if let Some(seats) = shared.best_seats {
        return Ok(seats);
    }

    let seats = {
        let maze = Maze {
            grid: &shared.grid,
            end: shared.end,
        };
        let mut search = Search::new(maze).mode(SearchMode::AllOptimal);
        search.start(Reindeer {
            pos: shared.start,
            facing: Direction::East,
        });
        let score = search
            .run()
            .cost()
            .ok_or_else(|| SolveError::NoSolution("the end tile is walled off"))?;
        let tiles = search
            .trace()
            .project(search.goals(), |reindeer| reindeer.pos)
            .len();
        BestSeats { score, tiles }
    };
    shared.best_seats = Some(seats);
    Ok(seats)
}
