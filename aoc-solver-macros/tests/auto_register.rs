//! Tests for `#[derive(AutoRegisterSolver)]` plugin submission

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 3, tags = ["macro-test", "grid"])]
pub struct TaggedSolver;

impl AocParser for TaggedSolver {
    type SharedData<'a> = usize;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.lines().count())
    }
}

impl PartSolver<1> for TaggedSolver {
    fn solve(rows: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(rows.to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 4)]
pub struct UntaggedSolver;

impl AocParser for UntaggedSolver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for UntaggedSolver {
    fn solve(input: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(input.len().to_string())
    }
}

impl PartSolver<2> for UntaggedSolver {
    fn solve(input: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(input.trim().len().to_string())
    }
}

#[test]
fn test_all_plugins_are_registered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(registry.contains(2016, 3));
    assert!(registry.contains(2016, 4));
    assert_eq!(registry.get_info(2016, 4).unwrap().parts, 2);
}

#[test]
fn test_tag_filter_selects_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert!(registry.contains(2016, 3));
    assert!(!registry.contains(2016, 4));

    let mut solver = registry.create_solver(2016, 3, "a\nb\nc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
}

#[test]
fn test_out_of_range_part_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2016 && plugin.day == 3)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2016, 3, "x").unwrap();
    assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
}
