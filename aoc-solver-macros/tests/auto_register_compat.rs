use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, Solver,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 7, tags = ["macro-test", "lines"])]
struct LineCounter;

impl AocParser for LineCounter {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if input.is_empty() {
            return Err(ParseError::MissingData("no lines"));
        }
        Ok(input.lines().collect())
    }
}

impl PartSolver<1> for LineCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for LineCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 3)]
#[aoc(year = 2016, day = 8)]
struct ThreeParts;

impl AocParser for ThreeParts {
    type SharedData<'a> = u32;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(input.to_string()))
    }
}

impl PartSolver<1> for ThreeParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

impl PartSolver<2> for ThreeParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((*shared * 2).to_string())
    }
}

impl PartSolver<3> for ThreeParts {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((*shared * 3).to_string())
    }
}

#[test]
fn test_derive_dispatches_each_part() {
    let mut shared = ThreeParts::parse("7").unwrap();
    assert_eq!(ThreeParts::PARTS, 3);
    assert_eq!(ThreeParts::solve_part(&mut shared, 1).unwrap(), "7");
    assert_eq!(ThreeParts::solve_part(&mut shared, 2).unwrap(), "14");
    assert_eq!(ThreeParts::solve_part(&mut shared, 3).unwrap(), "21");
    assert!(matches!(
        ThreeParts::solve_part(&mut shared, 4),
        Err(SolveError::PartNotImplemented(4))
    ));
}

#[test]
fn test_plugins_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    assert!(registry.contains(2016, 7));
    assert!(registry.contains(2016, 8));
    assert_eq!(registry.get_info(2016, 8).map(|i| i.parts), Some(3));

    let mut solver = registry
        .create_solver(2016, 7, "ab\ncde")
        .expect("Failed to create solver");
    assert_eq!(solver.solve(1).unwrap().answer, "2");
    assert_eq!(solver.solve(2).unwrap().answer, "5");
}

#[test]
fn test_tag_filtering() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .expect("Failed to register plugins")
        .build();

    assert!(registry.contains(2016, 7));
    assert!(!registry.contains(2016, 8));
}
