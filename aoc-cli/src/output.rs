//! Output formatting for solver results

use crate::executor::SolverResult;
use aoc_solver::{SolveError, SolverError};
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Prints answers as they arrive and a summary at the end
pub struct OutputFormatter {
    quiet: bool,
    started: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            started: Instant::now(),
        }
    }

    /// Quiet mode prints the bare answer; otherwise the answer is labelled and
    /// timed. Unsolvable inputs go to stdout, every other error to stderr.
    pub fn print_result(&self, result: &SolverResult) {
        let label = format!("{}/{:02} Part {}", result.year, result.day, result.part);
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(answer), false) => {
                let parse = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                println!(
                    "{label}: {answer} ({parse}solve: {})",
                    format_duration(result.solve_duration)
                );
            }
            (Err(SolverError::SolveError(SolveError::NoSolution(reason))), _) => {
                println!("{label}: no solution - {reason}");
            }
            (Err(e), true) => eprintln!("Error: {e}"),
            (Err(e), false) => eprintln!("{label}: Error - {e}"),
        }
    }

    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed = self.started.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed ({} with no solution)",
            summary.solved,
            summary.failed.len(),
            summary.no_solution
        );
        for (year, day, part) in &summary.failed {
            println!("  - {year}/{day:02} part {part}");
        }
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if let Some(speedup) = summary.speedup(elapsed) {
            println!("Speedup factor: {speedup:.2}x");
        }
    }
}

/// Totals over one run. Timings count successful parts only.
#[derive(Debug, Default, PartialEq)]
struct Summary {
    solved: usize,
    failed: Vec<(u16, u8, u8)>,
    no_solution: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn of(results: &[SolverResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match &result.answer {
                Ok(_) => {
                    summary.solved += 1;
                    summary.parse_time += result.parse_duration.unwrap_or_default();
                    summary.solve_time += result.solve_duration;
                }
                Err(e) => {
                    summary
                        .failed
                        .push((result.year, result.day, result.part));
                    if matches!(e, SolverError::SolveError(SolveError::NoSolution(_))) {
                        summary.no_solution += 1;
                    }
                }
            }
            summary
        })
    }

    /// Summed parse and solve time over wall-clock time; above 1 when
    /// parallel execution paid off.
    fn speedup(&self, elapsed: Duration) -> Option<f64> {
        if elapsed.is_zero() {
            return None;
        }
        let compute = (self.parse_time + self.solve_time).num_microseconds()?;
        Some(compute as f64 / 1_000_000.0 / elapsed.as_secs_f64())
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        format!("-{}", format_duration(-d))
    } else if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

fn format_std_duration(d: Duration) -> String {
    TimeDelta::from_std(d).map_or_else(|_| "N/A".to_string(), format_duration)
}
