use std::str::FromStr;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{Cost, StateGraph, shortest_path_cost};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["search", "binary-search"])]
pub struct Solver;

/// Falling byte positions plus the memory space they fall into.
#[derive(Debug)]
pub struct Memory {
    bytes: Vec<Pos>,
    /// Largest coordinate; the space is `(size + 1) x (size + 1)`.
    size: i32,
    /// How many bytes have fallen when part 1 starts walking.
    fallen: usize,
}

impl Memory {
    pub const SIZE: i32 = 70;
    pub const FALLEN: usize = 1024;

    pub fn with_dimensions(mut self, size: i32, fallen: usize) -> Self {
        self.size = size;
        self.fallen = fallen;
        self
    }

    fn corrupted(&self, count: usize) -> Grid {
        let side = (self.size + 1) as usize;
        let mut grid = Grid::filled(side, side, b'.');
        for &pos in self.bytes.iter().take(count) {
            grid.set(pos, b'#');
        }
        grid
    }

    fn steps_to_exit(&self, count: usize) -> Option<Cost> {
        let grid = self.corrupted(count);
        let exit = Pos::new(self.size, self.size);
        let start = Pos::new(0, 0);
        if grid.get(start) != Some(b'.') || grid.get(exit) != Some(b'.') {
            return None;
        }
        shortest_path_cost(MemorySpace { grid: &grid, exit }, start).cost()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Memory;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .map(|line| -> Result<Pos, anyhow::Error> {
                let (x, y) = line
                    .trim()
                    .split_once(',')
                    .ok_or_else(|| anyhow!("expected \"x,y\""))?;
                let x = i32::from_str(x.trim()).context("bad x")?;
                let y = i32::from_str(y.trim()).context("bad y")?;
                if x < 0 || y < 0 {
                    return Err(anyhow!("coordinates must be non negative"));
                }
                Ok(Pos::new(y, x))
            })
            .enumerate()
            .map(|(line_idx, pos_res)| pos_res.map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
            .map(|bytes| Memory {
                bytes,
                size: Memory::SIZE,
                fallen: Memory::FALLEN,
            })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .steps_to_exit(shared.fallen)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::NoSolution("the exit is already cut off"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // reachability only gets worse as bytes fall
        let counts: Vec<usize> = (0..=shared.bytes.len()).collect();
        let first_blocked = counts.partition_point(|&count| shared.steps_to_exit(count).is_some());

        match first_blocked.checked_sub(1).and_then(|i| shared.bytes.get(i)) {
            Some(byte) => Ok(format!("{},{}", byte.col, byte.row)),
            None => Err(SolveError::NoSolution(
                "no single byte cuts off the exit".into(),
            )),
        }
    }
}

struct MemorySpace<'a> {
    grid: &'a Grid,
    exit: Pos,
}

impl StateGraph for MemorySpace<'_> {
    type State = Pos;

    fn neighbors(&self, &pos: &Pos, out: &mut Vec<(Pos, Cost)>) {
        for dir in Direction::ALL {
            let next = pos.step(dir);
            if self.grid.get(next) == Some(b'.') {
                out.push((next, 1));
            }
        }
    }

    fn is_goal(&self, pos: &Pos) -> bool {
        *pos == self.exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    fn solve(part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(EXAMPLE).unwrap().with_dimensions(6, 12);
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part)
    }

    #[test]
    fn test_example_part1() {
        assert_eq!(solve(1).unwrap(), "22");
    }

    #[test]
    fn test_example_part2() {
        assert_eq!(solve(2).unwrap(), "6,1");
    }

    #[test]
    fn test_defaults_and_parse_errors() {
        let memory = Solver::parse("1,2").unwrap();
        assert_eq!((memory.size, memory.fallen), (70, 1024));
        assert_eq!(memory.bytes, vec![Pos::new(2, 1)]);

        for bad in ["1;2", "1,x", "-1,2"] {
            assert!(matches!(Solver::parse(bad), Err(ParseError::InvalidFormat(_))));
        }
    }

    #[test]
    fn test_never_blocked() {
        let mut shared = Solver::parse("1,1").unwrap().with_dimensions(2, 1);
        assert_eq!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 1).unwrap(),
            "4"
        );
        assert!(matches!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2),
            Err(SolveError::NoSolution(_))
        ));
    }
}
