use super::types::{ANNUAL_INFLATION, Projection, SimulationResult, SimulatorState};

/// Compounds a beginning-of-month contribution monthly at `annual_rate / 12`
/// and deflates the final balance by `ANNUAL_INFLATION` over the elapsed
/// fraction of years.
///
/// Inputs are assumed to be pre-validated (non-negative amounts, horizon in
/// `1..=60`); nothing here fails.
pub fn project(
    initial_balance: f64,
    monthly_contribution: f64,
    annual_rate: f64,
    horizon_months: u32,
) -> Projection {
    let growth = 1.0 + annual_rate / 12.0;
    let mut balance = initial_balance;
    let mut balances = Vec::with_capacity(horizon_months as usize);

    for _ in 0..horizon_months {
        balance = (balance + monthly_contribution) * growth;
        balances.push(balance);
    }

    Projection {
        balances,
        final_balance: balance,
        real_value: deflate(balance, horizon_months),
    }
}

pub fn run_simulation(state: &SimulatorState) -> SimulationResult {
    let annual_rate = state.strategy.annual_rate();
    let projection = project(
        state.initial_balance,
        state.monthly_contribution,
        annual_rate,
        state.horizon_months,
    );
    let goal_reached = goal_reached(projection.real_value, state.goal_amount);

    SimulationResult {
        strategy: state.strategy,
        annual_rate,
        goal_amount: state.goal_amount,
        projection,
        goal_reached,
    }
}

pub fn goal_reached(real_value: f64, goal_amount: f64) -> bool {
    real_value >= goal_amount
}

fn deflate(nominal: f64, horizon_months: u32) -> f64 {
    let years = f64::from(horizon_months) / 12.0;
    nominal / (1.0 + ANNUAL_INFLATION).powf(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FIXED_INCOME_RATE, Strategy, VARIABLE_INCOME_RATE};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_rel(actual: f64, expected: f64, tol: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() / scale <= tol,
            "expected {expected}, got {actual}, relative tolerance {tol}"
        );
    }

    fn sample_state() -> SimulatorState {
        SimulatorState {
            goal_amount: 50_000.0,
            horizon_months: 24,
            initial_balance: 5_000.0,
            monthly_contribution: 1_500.0,
            strategy: Strategy::FixedIncome,
        }
    }

    #[test]
    fn single_month_adds_contribution_then_compounds() {
        let projection = project(2_000.0, 500.0, 0.12, 1);

        assert_eq!(projection.balances.len(), 1);
        assert_approx(projection.balances[0], 2_500.0 * 1.01);
        assert_approx(projection.final_balance, projection.balances[0]);
    }

    #[test]
    fn sequence_length_matches_horizon() {
        for horizon in [1, 7, 12, 36, 60] {
            let projection = project(100.0, 10.0, 0.10, horizon);
            assert_eq!(projection.balances.len(), horizon as usize);
            assert_eq!(
                projection.balances.last().copied(),
                Some(projection.final_balance)
            );
        }
    }

    #[test]
    fn five_year_fixed_income_matches_direct_recurrence() {
        let projection = project(0.0, 1_000.0, 0.10, 60);

        let monthly: f64 = 0.10 / 12.0;
        let growth = 1.0 + monthly;
        let closed_form = 1_000.0 * growth * (growth.powi(60) - 1.0) / monthly;
        assert_rel(projection.final_balance, closed_form, 1e-9);

        let mut by_hand = 0.0;
        for _ in 0..60 {
            by_hand = (by_hand + 1_000.0) * growth;
        }
        assert_rel(projection.final_balance, by_hand, 1e-9);
        assert!((78_000.0..78_200.0).contains(&projection.final_balance));
    }

    #[test]
    fn one_year_real_value_divides_by_one_year_of_inflation() {
        let projection = project(10_000.0, 250.0, 0.12, 12);
        assert_rel(projection.real_value, projection.final_balance / 1.045, 1e-12);
    }

    #[test]
    fn fractional_years_deflate_with_fractional_exponent() {
        let projection = project(10_000.0, 0.0, 0.10, 18);
        let expected = projection.final_balance / 1.045_f64.powf(1.5);
        assert_rel(projection.real_value, expected, 1e-12);
    }

    #[test]
    fn zero_horizon_keeps_initial_balance() {
        let projection = project(3_000.0, 100.0, 0.10, 0);
        assert!(projection.balances.is_empty());
        assert_approx(projection.final_balance, 3_000.0);
        assert_approx(projection.real_value, 3_000.0);
    }

    #[test]
    fn strategies_map_to_fixed_rates() {
        assert_eq!(Strategy::FixedIncome.annual_rate(), FIXED_INCOME_RATE);
        assert_eq!(Strategy::VariableIncome.annual_rate(), VARIABLE_INCOME_RATE);
        assert_approx(FIXED_INCOME_RATE, 0.10);
        assert_approx(VARIABLE_INCOME_RATE, 0.12);
    }

    #[test]
    fn run_simulation_uses_strategy_rate() {
        let mut state = sample_state();
        let fixed = run_simulation(&state);
        state.strategy = Strategy::VariableIncome;
        let variable = run_simulation(&state);

        assert_approx(fixed.annual_rate, 0.10);
        assert_approx(variable.annual_rate, 0.12);
        assert!(variable.projection.final_balance > fixed.projection.final_balance);
        assert_eq!(
            fixed.projection,
            project(5_000.0, 1_500.0, 0.10, 24),
            "simulation must delegate to the plain projection"
        );
    }

    #[test]
    fn zero_goal_is_always_reached() {
        let state = SimulatorState {
            goal_amount: 0.0,
            ..SimulatorState::default()
        };
        let result = run_simulation(&state);
        assert!(result.goal_reached);
        assert_eq!(result.message(), crate::core::types::GOAL_REACHED_MESSAGE);
    }

    #[test]
    fn positive_goal_is_missed_with_nothing_saved() {
        let state = SimulatorState {
            goal_amount: 1.0,
            horizon_months: 60,
            initial_balance: 0.0,
            monthly_contribution: 0.0,
            strategy: Strategy::VariableIncome,
        };
        let result = run_simulation(&state);
        assert_approx(result.projection.real_value, 0.0);
        assert!(!result.goal_reached);
        assert_eq!(result.message(), crate::core::types::GOAL_MISSED_MESSAGE);
    }

    #[test]
    fn goal_comparison_is_inclusive() {
        assert!(goal_reached(100.0, 100.0));
        assert!(goal_reached(100.01, 100.0));
        assert!(!goal_reached(99.99, 100.0));
    }

    #[test]
    fn month_points_are_one_based() {
        let result = run_simulation(&sample_state());
        let points = result.month_points();
        assert_eq!(points.len(), 24);
        assert_eq!(points[0].month, 1);
        assert_eq!(points[23].month, 24);
        assert_approx(points[23].balance, result.projection.final_balance);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_balances_never_decrease(
            initial in 0u32..1_000_000,
            monthly in 0u32..50_000,
            horizon in 1u32..=60,
            variable in proptest::bool::ANY
        ) {
            let strategy = if variable { Strategy::VariableIncome } else { Strategy::FixedIncome };
            let projection = project(
                initial as f64,
                monthly as f64,
                strategy.annual_rate(),
                horizon,
            );

            prop_assert!(projection.balances[0] >= initial as f64);
            for pair in projection.balances.windows(2) {
                prop_assert!(pair[1] >= pair[0]);
            }
            prop_assert!(projection.real_value <= projection.final_balance);
            prop_assert!(projection.real_value.is_finite());
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_simulation_is_idempotent(
            goal in 0u32..200_000,
            initial in 0u32..100_000,
            monthly in 0u32..10_000,
            horizon in 1u32..=60,
            variable in proptest::bool::ANY
        ) {
            let state = SimulatorState {
                goal_amount: goal as f64,
                horizon_months: horizon,
                initial_balance: initial as f64,
                monthly_contribution: monthly as f64,
                strategy: if variable { Strategy::VariableIncome } else { Strategy::FixedIncome },
            };

            let first = run_simulation(&state);
            let second = run_simulation(&state);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.goal_reached, first.projection.real_value >= state.goal_amount);
        }
    }
}
