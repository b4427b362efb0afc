//! Coordinate descent over month-by-month operating options.
//!
//! The objective is the single global fraction
//! `(fixed + Σ variable cost) / Σ cargo` over the options chosen for every
//! month. Optimising each month on its own ratio ignores how the shared fixed
//! cost is spread and can pick a combination that is worse overall; the
//! descent below moves one month at a time on the global ratio instead.

use serde::Serialize;

use crate::simulation::per_ton;

/// Cost and cargo of one operating option of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionValue {
    pub variable_cost: f64,
    pub cargo_t: f64,
}

/// Global objective of choosing `indices[m]` in month `m`.
pub fn objective(fixed_cost: f64, table: &[Vec<OptionValue>], indices: &[usize]) -> f64 {
    let (cost, cargo) = table
        .iter()
        .zip(indices)
        .filter_map(|(options, &index)| options.get(index))
        .fold((fixed_cost, 0.0), |(cost, cargo), option| {
            (cost + option.variable_cost, cargo + option.cargo_t)
        });
    per_ton(cost, cargo)
}

/// One chosen option index per month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescentState {
    indices: Vec<usize>,
}

impl DescentState {
    /// Start at the middle option of every month. `None` if a month has no option.
    pub fn median(table: &[Vec<OptionValue>]) -> Option<Self> {
        if table.iter().any(Vec::is_empty) {
            return None;
        }
        Some(Self {
            indices: table.iter().map(|options| options.len() / 2).collect(),
        })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Sweep every month once, moving each to its best option when that
    /// strictly lowers the objective. Returns the objective after every
    /// accepted move.
    fn sweep(&mut self, fixed_cost: f64, table: &[Vec<OptionValue>]) -> Vec<f64> {
        let mut accepted = Vec::new();
        let mut current = objective(fixed_cost, table, &self.indices);

        for month in 0..table.len() {
            let mut trial = self.indices.clone();
            let mut best: Option<(usize, f64)> = None;

            for index in 0..table[month].len() {
                trial[month] = index;
                let value = objective(fixed_cost, table, &trial);
                if value < best.map_or(current, |(_, best_value)| best_value) {
                    best = Some((index, value));
                }
            }

            if let Some((index, value)) = best {
                self.indices[month] = index;
                current = value;
                accepted.push(value);
            }
        }

        accepted
    }
}

/// Converged descent for one design candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescentOutcome {
    pub indices: Vec<usize>,
    pub objective: f64,
    /// Sweeps run, including the final one without a move.
    pub sweeps: u32,
    /// Objective at the start and after every accepted move; strictly decreasing.
    pub objective_history: Vec<f64>,
}

/// Run coordinate descent to convergence: stop after a full sweep that
/// moves no month. Terminates because every move strictly lowers the
/// objective over a finite set of states.
///
/// Returns `None` when a month has no option.
///
/// # Examples
/// ```
/// use bargeflow_lib::optimizer::{coordinate_descent, OptionValue};
///
/// let month = vec![
///     OptionValue { variable_cost: 10.0, cargo_t: 100.0 },
///     OptionValue { variable_cost: 30.0, cargo_t: 400.0 },
/// ];
/// let outcome = coordinate_descent(1000.0, &vec![month; 12]).unwrap();
/// assert!(outcome.indices.iter().all(|&index| index == 1));
/// ```
pub fn coordinate_descent(fixed_cost: f64, table: &[Vec<OptionValue>]) -> Option<DescentOutcome> {
    let mut state = DescentState::median(table)?;
    let mut objective_history = vec![objective(fixed_cost, table, state.indices())];
    let mut sweeps = 0;

    loop {
        sweeps += 1;
        let accepted = state.sweep(fixed_cost, table);
        if accepted.is_empty() {
            break;
        }
        objective_history.extend(accepted);
    }

    Some(DescentOutcome {
        objective: objective(fixed_cost, table, state.indices()),
        indices: state.indices,
        sweeps,
        objective_history,
    })
}

/// Month cost per tonne with an even share of the fixed cost:
/// `(fixed / months + variable) / cargo`.
pub fn indicative_month_cost(fixed_cost: f64, months: usize, option: &OptionValue) -> f64 {
    per_ton(fixed_cost / months as f64 + option.variable_cost, option.cargo_t)
}

/// Pick every month's option on its own indicative cost, ignoring the others.
///
/// This is the per-month baseline that coordinate descent improves on.
pub fn isolated_month_choice(fixed_cost: f64, table: &[Vec<OptionValue>]) -> Vec<usize> {
    table
        .iter()
        .map(|options| {
            options
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (index, option)| {
                    let cost = indicative_month_cost(fixed_cost, table.len(), option);
                    match best {
                        Some((_, best_cost)) if best_cost <= cost => best,
                        _ => Some((index, cost)),
                    }
                })
                .map_or(0, |(index, _)| index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(variable_cost: f64, cargo_t: f64) -> OptionValue {
        OptionValue {
            variable_cost,
            cargo_t,
        }
    }

    /// One efficient fixed month and one month with a cheap and a
    /// high-volume option.
    fn biased_table() -> Vec<Vec<OptionValue>> {
        vec![
            vec![option(0.0, 1000.0)],
            vec![option(0.0, 10.0), option(50.0, 20.0)],
        ]
    }

    #[test]
    fn empty_month_has_no_state() {
        let table = vec![vec![option(1.0, 1.0)], vec![]];
        assert!(DescentState::median(&table).is_none());
        assert!(coordinate_descent(10.0, &table).is_none());
    }

    #[test]
    fn starts_from_middle_option() {
        let table = vec![vec![option(1.0, 1.0); 5], vec![option(1.0, 1.0); 4]];
        let state = DescentState::median(&table).expect("non-empty");
        assert_eq!(state.indices(), &[2, 2]);
    }

    #[test]
    fn isolated_choice_differs_from_global_optimum() {
        let table = biased_table();
        let isolated = isolated_month_choice(200.0, &table);
        assert_eq!(isolated, vec![0, 1]);

        let outcome = coordinate_descent(200.0, &table).expect("options");
        assert_eq!(outcome.indices, vec![0, 0]);
        assert!(outcome.objective < objective(200.0, &table, &isolated));
        assert_eq!(outcome.sweeps, 2);
    }

    #[test]
    fn history_strictly_decreases() {
        let month: Vec<OptionValue> = (1..=20)
            .map(|step| {
                let speed = f64::from(step);
                option(speed * speed * 3.0, 100.0 * speed / (1.0 + speed / 10.0))
            })
            .collect();
        let table = vec![month; 12];
        let outcome = coordinate_descent(50_000.0, &table).expect("options");
        assert!(outcome
            .objective_history
            .windows(2)
            .all(|pair| pair[1] < pair[0]));
        assert_eq!(outcome.objective_history.last(), Some(&outcome.objective));
    }

    #[test]
    fn converged_state_is_a_local_optimum() {
        let month: Vec<OptionValue> = (1..=15)
            .map(|step| {
                let speed = f64::from(step);
                option(speed.powi(3), 40.0 * speed.sqrt())
            })
            .collect();
        let table = vec![month; 12];
        let outcome = coordinate_descent(2_000.0, &table).expect("options");

        for month in 0..table.len() {
            for index in 0..table[month].len() {
                let mut trial = outcome.indices.clone();
                trial[month] = index;
                assert!(objective(2_000.0, &table, &trial) >= outcome.objective);
            }
        }
    }

    #[test]
    fn indicative_cost_without_cargo_is_infinite() {
        assert!(indicative_month_cost(1200.0, 12, &option(5.0, 0.0)).is_infinite());
        assert_eq!(indicative_month_cost(1200.0, 12, &option(100.0, 20.0)), 10.0);
    }
}
