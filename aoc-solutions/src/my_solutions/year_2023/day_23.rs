use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::search::{Cost, PathEnumerator};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["search", "longest-path"])]
pub struct Solver;

#[derive(Debug)]
pub struct Trails {
    grid: Grid,
    start: Pos,
    end: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        grid.validate(|b| matches!(b, b'#' | b'.' | b'^' | b'>' | b'v' | b'<'))?;

        let gap = |row: usize| {
            grid.row(row)
                .iter()
                .position(|&b| b == b'.')
                .map(|col| Pos::new(row as i32, col as i32))
        };
        let start = gap(0).ok_or_else(|| ParseError::MissingData("no path in the top row"))?;
        let end = gap(grid.height() - 1)
            .ok_or_else(|| ParseError::MissingData("no path in the bottom row"))?;

        Ok(Trails { grid, start, end })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared, true).map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared, false).map(|steps| steps.to_string())
    }
}

impl Trails {
    fn is_open(&self, pos: Pos) -> bool {
        matches!(self.grid.get(pos), Some(tile) if tile != b'#')
    }

    /// Standing on a slope while it is icy forces the next step downhill.
    fn can_step(&self, from: Pos, dir: Direction, icy: bool) -> bool {
        if !self.is_open(from.step(dir)) {
            return false;
        }
        if !icy {
            return true;
        }
        match self.grid.get(from) {
            Some(b'^') => dir == Direction::North,
            Some(b'>') => dir == Direction::East,
            Some(b'v') => dir == Direction::South,
            Some(b'<') => dir == Direction::West,
            _ => true,
        }
    }

    fn is_junction(&self, pos: Pos) -> bool {
        self.is_open(pos)
            && (pos == self.start
                || pos == self.end
                || Direction::ALL
                    .into_iter()
                    .filter(|&dir| self.is_open(pos.step(dir)))
                    .count()
                    >= 3)
    }

    /// Collapses every corridor into one weighted edge between junctions.
    fn compress(&self, icy: bool) -> (PathEnumerator, HashMap<Pos, usize>) {
        let junctions: HashMap<Pos, usize> = self
            .grid
            .positions()
            .filter(|&pos| self.is_junction(pos))
            .enumerate()
            .map(|(id, pos)| (pos, id))
            .collect();
        let mut graph = PathEnumerator::new(junctions.len());

        for (&junction, &from) in &junctions {
            for dir in Direction::ALL {
                if !self.can_step(junction, dir, icy) {
                    continue;
                }
                let (mut previous, mut current, mut length) = (junction, junction.step(dir), 1);
                loop {
                    if let Some(&to) = junctions.get(&current) {
                        graph.add_edge(from, to, length);
                        break;
                    }
                    let next = Direction::ALL
                        .into_iter()
                        .filter(|&d| self.can_step(current, d, icy))
                        .map(|d| current.step(d))
                        .find(|&pos| pos != previous);
                    let Some(next) = next else {
                        break;
                    };
                    (previous, current, length) = (current, next, length + 1);
                }
            }
        }

        (graph, junctions)
    }
}

fn longest_hike(trails: &Trails, icy: bool) -> Result<Cost, SolveError> {
    let (graph, junctions) = trails.compress(icy);
    debug!(junctions = junctions.len(), icy, "compressed trail map");

    let (Some(&start), Some(&end)) = (junctions.get(&trails.start), junctions.get(&trails.end))
    else {
        return Err(SolveError::NoSolution("missing trail endpoints"));
    };
    graph
        .longest_simple_path(start, end)
        .ok_or_else(|| SolveError::NoSolution("no hike reaches the bottom row"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#
";

    fn solve(part: u8) -> String {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        <Solver as aoc_solver::Solver>::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example_part1() {
        assert_eq!(solve(1), "94");
    }

    #[test]
    fn test_example_part2() {
        assert_eq!(solve(2), "154");
    }

    #[test]
    fn test_compression_keeps_junctions_only() {
        let trails = Solver::parse(EXAMPLE).unwrap();
        let (graph, junctions) = trails.compress(false);
        // start, end and seven forks
        assert_eq!(junctions.len(), 9);
        assert_eq!(graph.node_count(), 9);
        let start = junctions[&trails.start];
        assert_eq!(graph.edges(start).len(), 1);
    }

    #[test]
    fn test_uphill_slope_blocks() {
        let trails = Solver::parse("#.#\n#^#\n#.#").unwrap();
        assert!(matches!(
            longest_hike(&trails, true),
            Err(SolveError::NoSolution(_))
        ));
        assert_eq!(longest_hike(&trails, false).unwrap(), 2);
    }
}
