use serde::{Deserialize, Serialize};

use crate::types::Age;

/// Monthly spending by category, in euros at today's price level.
/// Fixed named fields; the total is a plain fold over them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpenses {
    pub housing: f64,
    pub groceries: f64,
    pub health: f64,
    pub mobility: f64,
    pub leisure: f64,
}

impl MonthlyExpenses {
    pub fn total(&self) -> f64 {
        self.housing + self.groceries + self.health + self.mobility + self.leisure
    }
}

/// Once-a-year spending by category, in euros at today's price level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualExpenses {
    pub travel: f64,
    pub insurance: f64,
    pub repairs: f64,
}

impl AnnualExpenses {
    pub fn total(&self) -> f64 {
        self.travel + self.insurance + self.repairs
    }
}

/// Immutable input for one Monte Carlo run. Shared read-only across trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Base seed; trial `i` runs on an independent stream seeded `seed + i`.
    pub seed: u64,
    pub current_age: Age,
    /// First year without savings contributions; drawdown starts here.
    pub retirement_age: Age,
    /// Statutory pension payments start at this age, not at retirement.
    pub legal_pension_age: Age,
    pub horizon_age: Age,
    pub current_assets: f64,
    /// Contributed at the end of each working year; counts as cost basis.
    pub annual_savings: f64,
    pub monthly_pension: f64,
    pub monthly_expenses: MonthlyExpenses,
    pub annual_expenses: AnnualExpenses,
    /// Arithmetic mean / stdev of the yearly investment return rate.
    pub return_mean: f64,
    pub return_stdev: f64,
    /// Arithmetic mean / stdev of the yearly inflation rate.
    pub inflation_mean: f64,
    pub inflation_stdev: f64,
    /// Flat capital-gains tax rate in percent, e.g. 26.375.
    pub capital_gains_tax_pct: f64,
    pub simulation_runs: usize,
}

impl SimulationParams {
    /// Tax rate normalized to a fraction in [0, 1].
    pub fn capital_gains_tax_rate(&self) -> f64 {
        self.capital_gains_tax_pct / 100.0
    }

    /// Length of every per-age output series.
    pub fn horizon_years(&self) -> usize {
        self.current_age.years_until(self.horizon_age)
    }

    /// Reject invalid configurations before any trial runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.current_age > self.retirement_age
            || self.retirement_age > self.legal_pension_age
            || self.retirement_age > self.horizon_age
        {
            return Err(ConfigError::AgeOrdering {
                current: self.current_age,
                retirement: self.retirement_age,
                legal_pension: self.legal_pension_age,
                horizon: self.horizon_age,
            });
        }

        let monetary: [(&'static str, f64); 13] = [
            ("current_assets", self.current_assets),
            ("annual_savings", self.annual_savings),
            ("monthly_pension", self.monthly_pension),
            ("monthly_expenses.housing", self.monthly_expenses.housing),
            ("monthly_expenses.groceries", self.monthly_expenses.groceries),
            ("monthly_expenses.health", self.monthly_expenses.health),
            ("monthly_expenses.mobility", self.monthly_expenses.mobility),
            ("monthly_expenses.leisure", self.monthly_expenses.leisure),
            ("annual_expenses.travel", self.annual_expenses.travel),
            ("annual_expenses.insurance", self.annual_expenses.insurance),
            ("annual_expenses.repairs", self.annual_expenses.repairs),
            ("return_mean", self.return_mean),
            ("inflation_mean", self.inflation_mean),
        ];
        for (field, value) in monetary {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidField { field, value });
            }
        }
        for (field, value) in [
            ("return_stdev", self.return_stdev),
            ("inflation_stdev", self.inflation_stdev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidField { field, value });
            }
        }

        let rate = self.capital_gains_tax_rate();
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::TaxRateOutOfRange { pct: self.capital_gains_tax_pct });
        }

        if self.simulation_runs < 1 {
            return Err(ConfigError::NoTrials);
        }

        Ok(())
    }

    /// Reference household used by the CLI when no params file is given.
    pub fn canonical() -> Self {
        SimulationParams {
            seed: 42,
            // ── Ages ──────────────────────────────────────────────────────
            // Mid-career household retiring before the statutory pension
            // kicks in; three decades of drawdown to the horizon.
            current_age: Age(40),
            retirement_age: Age(63),
            legal_pension_age: Age(67),
            horizon_age: Age(95),
            // ── Balance sheet & flows (euros) ─────────────────────────────
            current_assets: 150_000.0,
            annual_savings: 12_000.0,
            monthly_pension: 2_400.0,
            monthly_expenses: MonthlyExpenses {
                housing: 1_200.0,
                groceries: 450.0,
                health: 280.0,
                mobility: 220.0,
                leisure: 350.0,
            },
            annual_expenses: AnnualExpenses {
                travel: 3_000.0,
                insurance: 1_200.0,
                repairs: 800.0,
            },
            // ── Market calibration ────────────────────────────────────────
            // Broad equity/bond mix: 5 % mean return at 12 % vol; inflation
            // anchored near the ECB target.
            return_mean: 0.05,
            return_stdev: 0.12,
            inflation_mean: 0.02,
            inflation_stdev: 0.01,
            // Abgeltungsteuer incl. solidarity surcharge.
            capital_gains_tax_pct: 26.375,
            simulation_runs: 1_000,
        }
    }
}

/// Configuration rejected before any trial ran.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Requires current ≤ retirement ≤ legal pension and retirement ≤ horizon.
    AgeOrdering { current: Age, retirement: Age, legal_pension: Age, horizon: Age },
    /// A monetary or rate field is negative or non-finite.
    InvalidField { field: &'static str, value: f64 },
    /// Normalized capital-gains tax rate falls outside [0, 1].
    TaxRateOutOfRange { pct: f64 },
    /// `simulation_runs` must be at least 1.
    NoTrials,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AgeOrdering { current, retirement, legal_pension, horizon } => write!(
                f,
                "invalid age ordering: current={current} retirement={retirement} \
                 legal_pension={legal_pension} horizon={horizon}"
            ),
            Self::InvalidField { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            Self::TaxRateOutOfRange { pct } => {
                write!(f, "capital gains tax rate {pct}% is outside [0%, 100%]")
            }
            Self::NoTrials => write!(f, "simulation_runs must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_params_validate() {
        assert_eq!(SimulationParams::canonical().validate(), Ok(()));
    }

    #[test]
    fn expense_totals_are_plain_sums() {
        let p = SimulationParams::canonical();
        assert_eq!(p.monthly_expenses.total(), 1_200.0 + 450.0 + 280.0 + 220.0 + 350.0);
        assert_eq!(p.annual_expenses.total(), 3_000.0 + 1_200.0 + 800.0);
    }

    #[test]
    fn rejects_retirement_before_current_age() {
        let mut p = SimulationParams::canonical();
        p.retirement_age = Age(39);
        assert!(matches!(p.validate(), Err(ConfigError::AgeOrdering { .. })));
    }

    #[test]
    fn rejects_legal_pension_before_retirement() {
        let mut p = SimulationParams::canonical();
        p.legal_pension_age = Age(60);
        assert!(matches!(p.validate(), Err(ConfigError::AgeOrdering { .. })));
    }

    #[test]
    fn rejects_horizon_before_retirement() {
        let mut p = SimulationParams::canonical();
        p.horizon_age = Age(50);
        assert!(matches!(p.validate(), Err(ConfigError::AgeOrdering { .. })));
    }

    #[test]
    fn rejects_negative_monetary_field() {
        let mut p = SimulationParams::canonical();
        p.monthly_pension = -1.0;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::InvalidField { field: "monthly_pension", .. })
        ));
    }

    #[test]
    fn rejects_nan_field() {
        let mut p = SimulationParams::canonical();
        p.return_stdev = f64::NAN;
        assert!(matches!(p.validate(), Err(ConfigError::InvalidField { .. })));
    }

    #[test]
    fn rejects_tax_rate_above_hundred_percent() {
        let mut p = SimulationParams::canonical();
        p.capital_gains_tax_pct = 150.0;
        assert!(matches!(p.validate(), Err(ConfigError::TaxRateOutOfRange { .. })));
    }

    #[test]
    fn rejects_zero_trials() {
        let mut p = SimulationParams::canonical();
        p.simulation_runs = 0;
        assert_eq!(p.validate(), Err(ConfigError::NoTrials));
    }

    #[test]
    fn params_round_trip_through_json() {
        let p = SimulationParams::canonical();
        let json = serde_json::to_string(&p).expect("serialize");
        let back: SimulationParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }
}
