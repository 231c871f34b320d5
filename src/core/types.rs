use serde::Serialize;

/// Annual inflation assumed when deflating the final balance.
pub const ANNUAL_INFLATION: f64 = 0.045;

pub const FIXED_INCOME_RATE: f64 = 0.10;
pub const VARIABLE_INCOME_RATE: f64 = 0.12;

pub const MIN_HORIZON_MONTHS: u32 = 1;
pub const MAX_HORIZON_MONTHS: u32 = 60;

pub const GOAL_REACHED_MESSAGE: &str = "✅ ¡Meta alcanzada con esta estrategia!";
pub const GOAL_MISSED_MESSAGE: &str = "⚠️ Ajusta tu plazo o aportaciones para alcanzar la meta.";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Strategy {
    /// Government debt (CETES), the lower and safer rate.
    #[default]
    FixedIncome,
    /// Index fund, the higher and riskier rate.
    VariableIncome,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::FixedIncome, Strategy::VariableIncome];

    pub fn annual_rate(self) -> f64 {
        match self {
            Strategy::FixedIncome => FIXED_INCOME_RATE,
            Strategy::VariableIncome => VARIABLE_INCOME_RATE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::FixedIncome => "CETES (Renta Fija)",
            Strategy::VariableIncome => "Fondo Indexado (Renta Variable)",
        }
    }
}

/// Everything the simulator panel holds between interactions. Rebuilt from
/// each request and handed to the engine as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorState {
    pub goal_amount: f64,
    pub horizon_months: u32,
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub strategy: Strategy,
}

impl Default for SimulatorState {
    fn default() -> Self {
        Self {
            goal_amount: 0.0,
            horizon_months: MIN_HORIZON_MONTHS,
            initial_balance: 0.0,
            monthly_contribution: 0.0,
            strategy: Strategy::FixedIncome,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub balances: Vec<f64>,
    pub final_balance: f64,
    pub real_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPoint {
    pub month: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub strategy: Strategy,
    pub annual_rate: f64,
    pub goal_amount: f64,
    pub projection: Projection,
    pub goal_reached: bool,
}

impl SimulationResult {
    /// Balances indexed by 1-based month for the chart x axis.
    pub fn month_points(&self) -> Vec<MonthPoint> {
        self.projection
            .balances
            .iter()
            .enumerate()
            .map(|(idx, &balance)| MonthPoint {
                month: idx as u32 + 1,
                balance,
            })
            .collect()
    }

    pub fn message(&self) -> &'static str {
        if self.goal_reached {
            GOAL_REACHED_MESSAGE
        } else {
            GOAL_MISSED_MESSAGE
        }
    }
}
