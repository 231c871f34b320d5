mod engine;
mod format;
mod types;

pub use engine::{goal_reached, project, run_simulation};
pub use format::format_currency;
pub use types::{
    ANNUAL_INFLATION, FIXED_INCOME_RATE, GOAL_MISSED_MESSAGE, GOAL_REACHED_MESSAGE,
    MAX_HORIZON_MONTHS, MIN_HORIZON_MONTHS, MonthPoint, Projection, SimulationResult,
    SimulatorState, Strategy, VARIABLE_INCOME_RATE,
};
