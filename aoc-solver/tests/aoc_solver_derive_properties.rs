//! Property-based tests for the AocSolver derive and the registry

use aoc_solver::{
    AocParser, AocSolver, ParseError, PartSolver, RegistrationError, SolveError, Solver,
    SolverError, SolverRegistryBuilder,
};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad int: {l}")))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

/// Part 2 reuses a value cached by part 1 in the shared data
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Cached;

struct CachedData {
    values: Vec<u32>,
    max: Option<u32>,
}

impl AocParser for Cached {
    type SharedData<'a> = CachedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let values = input
            .split(',')
            .map(|t| {
                t.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(t.to_string()))
            })
            .collect::<Result<Vec<u32>, _>>()?;
        Ok(CachedData { values, max: None })
    }
}

impl PartSolver<1> for Cached {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let max = shared
            .values
            .iter()
            .copied()
            .max()
            .ok_or_else(|| SolveError::NoSolution("empty input"))?;
        shared.max = Some(max);
        Ok(max.to_string())
    }
}

impl PartSolver<2> for Cached {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        match shared.max {
            Some(max) => Ok((max * 2).to_string()),
            None => Err(SolveError::NoSolution("part 1 not solved yet")),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// solve_part(N) matches PartSolver<N>::solve
    #[test]
    fn solve_part_dispatches_to_part_solver(
        numbers in prop::collection::vec(1i64..10, 1..6),
        part in 1u8..=2
    ) {
        let input = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut shared1 = SumProduct::parse(&input).unwrap();
        let mut shared2 = SumProduct::parse(&input).unwrap();

        let dispatched = SumProduct::solve_part(&mut shared1, part).unwrap();
        let direct = match part {
            1 => <SumProduct as PartSolver<1>>::solve(&mut shared2),
            2 => <SumProduct as PartSolver<2>>::solve(&mut shared2),
            _ => unreachable!(),
        }
        .unwrap();

        prop_assert_eq!(dispatched, direct);
    }

    /// Part numbers outside 1..=max_parts are PartNotImplemented
    #[test]
    fn invalid_part_returns_not_implemented(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = SumProduct::parse("1\n2\n3").unwrap();

        match SumProduct::solve_part(&mut shared, invalid_part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, invalid_part),
            other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
        }
    }
}

#[test]
fn parts_constant_matches_attribute() {
    assert_eq!(SumProduct::PARTS, 2);
    assert_eq!(Cached::PARTS, 2);
}

#[test]
fn shared_data_carries_state_between_parts() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Cached>(2020, 3)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2020, 3, "4, 9, 2").unwrap();
    assert!(solver.solve(2).is_err());
    assert_eq!(solver.solve(1).unwrap().answer, "9");
    assert_eq!(solver.solve(2).unwrap().answer, "18");
}

#[test]
fn registry_rejects_duplicates_and_bad_days() {
    let builder = SolverRegistryBuilder::new()
        .register_solver::<SumProduct>(2021, 1)
        .unwrap();

    assert_eq!(
        builder.register_solver::<Cached>(2021, 1).err(),
        Some(RegistrationError::DuplicateSolver(2021, 1))
    );
    assert_eq!(
        SolverRegistryBuilder::new()
            .register_solver::<Cached>(2021, 26)
            .err(),
        Some(RegistrationError::InvalidYearDay(2021, 26))
    );
}

#[test]
fn registry_reports_missing_and_parse_failures() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<SumProduct>(2022, 5)
        .unwrap()
        .build();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get_info(2022, 5).map(|i| i.parts), Some(2));
    assert!(matches!(
        registry.create_solver(2022, 6, "1"),
        Err(SolverError::NotFound(2022, 6))
    ));
    assert!(matches!(
        registry.create_solver(2022, 5, "1\nx"),
        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
}

#[test]
fn dyn_solver_rejects_out_of_range_parts() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<SumProduct>(2022, 5)
        .unwrap()
        .build();
    let mut solver = registry.create_solver(2022, 5, "2\n5").unwrap();

    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(2).unwrap().answer, "10");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}
