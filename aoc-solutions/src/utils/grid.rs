//! Rectangular character grids and compass moves.

use aoc_solver::ParseError;

/// A grid position. Signed so that neighbours of edge cells can be formed
/// and then rejected by [`Grid::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent position one step towards `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn reverse(self) -> Self {
        self.turn_left().turn_left()
    }

    /// `(row, col)` offset; north is row - 1.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

/// Rectangular byte grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Parses non-empty lines of equal length. Surrounding blank lines and
    /// trailing `\r` are ignored; spaces are kept as cells.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (line_idx, line) in input.trim_matches(['\n', '\r']).lines().enumerate() {
            let line = line.trim_end_matches('\r');
            match width {
                None if line.is_empty() => {
                    return Err(ParseError::MissingData("empty grid"));
                }
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::RaggedRow {
                        line: line_idx + 1,
                        expected: w,
                        found: line.len(),
                    });
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        let Some(width) = width else {
            return Err(ParseError::MissingData("empty grid"));
        };
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Fails on the first cell, in row-major order, that `allowed` rejects.
    pub fn validate(&self, allowed: impl Fn(u8) -> bool) -> Result<(), ParseError> {
        match self.cells.iter().position(|&b| !allowed(b)) {
            Some(i) => Err(ParseError::UnexpectedTile {
                row: i / self.width,
                col: i % self.width,
                tile: char::from(self.cells[i]),
            }),
            None => Ok(()),
        }
    }

    /// An all-`fill` grid.
    pub fn filled(width: usize, height: usize, fill: u8) -> Self {
        Self {
            cells: vec![fill; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    pub fn get(&self, pos: Pos) -> Option<u8> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrites a cell; positions outside the grid are ignored.
    pub fn set(&mut self, pos: Pos, value: u8) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = value;
        }
    }

    /// First position holding `value`, in row-major order.
    pub fn find(&self, value: u8) -> Option<Pos> {
        self.cells
            .iter()
            .position(|&b| b == value)
            .map(|i| self.pos_of(i))
    }

    /// Every position, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(|i| self.pos_of(i))
    }

    /// Dense index of a position, suitable for side tables.
    pub fn index(&self, pos: Pos) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }

    fn pos_of(&self, i: usize) -> Pos {
        Pos::new((i / self.width) as i32, (i % self.width) as i32)
    }

    /// Row `row` as a byte slice.
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let grid = Grid::parse("S.#\r\n..E\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(Pos::new(0, 2)), Some(b'#'));
        assert_eq!(grid.get(Pos::new(2, 0)), None);
        assert_eq!(grid.get(Pos::new(-1, 0)), None);
        assert_eq!(grid.find(b'E'), Some(Pos::new(1, 2)));
        assert_eq!(grid.find(b'x'), None);
        assert_eq!(grid.positions().count(), 6);
        assert_eq!(grid.row(1), b"..E");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(matches!(Grid::parse(""), Err(ParseError::MissingData(_))));
        assert!(matches!(Grid::parse("\n\n"), Err(ParseError::MissingData(_))));
        assert_eq!(
            Grid::parse("...\n..\n..."),
            Err(ParseError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_parse_keeps_edge_spaces() {
        let grid = Grid::parse("\n  #\n..#\n\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.row(0), b"  #");
        assert_eq!(grid.get(Pos::new(0, 0)), Some(b' '));
    }

    #[test]
    fn test_validate_reports_first_unknown_tile() {
        let grid = Grid::parse("#.#\n.x?").unwrap();
        assert_eq!(
            grid.validate(|b| b != b'x' && b != b'?'),
            Err(ParseError::UnexpectedTile {
                row: 1,
                col: 1,
                tile: 'x'
            })
        );
        assert_eq!(grid.validate(|b| b.is_ascii_graphic()), Ok(()));
    }

    #[test]
    fn test_direction_turns() {
        for dir in Direction::ALL {
            assert_eq!(dir.turn_left().turn_right(), dir);
            assert_eq!(dir.reverse().reverse(), dir);
            assert_ne!(dir.reverse(), dir);
            let (dr, dc) = dir.delta();
            assert_eq!(dir.reverse().delta(), (-dr, -dc));
        }
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Pos::new(1, 1).step(Direction::West), Pos::new(1, 0));
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(-2, 3)), 5);
    }

    #[test]
    fn test_set_ignores_outside() {
        let mut grid = Grid::filled(2, 2, b'.');
        grid.set(Pos::new(1, 1), b'#');
        grid.set(Pos::new(5, 5), b'#');
        assert_eq!(grid.get(Pos::new(1, 1)), Some(b'#'));
        assert_eq!(grid.cells.iter().filter(|&&b| b == b'#').count(), 1);
    }
}
