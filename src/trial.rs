use rand::Rng;

use crate::config::SimulationParams;
use crate::sampling::sample_factor;
use crate::tax::{CostBasis, gross_withdrawal};

/// Per-age series for a single simulated lifetime, one entry per year
/// from the current age to the horizon age inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// End-of-year assets, floored at zero for reporting.
    pub assets: Vec<f64>,
    /// Monthly-equivalent retirement spending need; zero while working.
    pub spending: Vec<f64>,
    /// The pool ran dry in some retirement year. Stays set once set.
    pub exhausted: bool,
}

/// Project one household lifetime year by year.
///
/// Working years compound the pool by a drawn return factor and add the
/// annual savings. Retirement years compound first, then sell enough to
/// cover the inflation-adjusted expense baseline net of any statutory
/// pension, grossing the sale up for capital-gains tax. Pension income
/// beyond expenses flows back into the pool as new principal.
///
/// The trial keeps recording after exhaustion so the spending series
/// reflects the need in every retirement year, funded or not.
pub fn run_trial(params: &SimulationParams, rng: &mut impl Rng) -> Trajectory {
    let years = params.horizon_years();
    let tax_rate = params.capital_gains_tax_rate();

    let mut assets = params.current_assets;
    // Starting assets count fully as principal.
    let mut basis = CostBasis::new(params.current_assets);
    let mut exhausted = false;

    // Today's price level, compounded by drawn inflation each
    // retirement year.
    let mut monthly_need = params.monthly_expenses.total();
    let mut annual_need = params.annual_expenses.total();

    let mut trajectory = Trajectory {
        assets: Vec::with_capacity(years),
        spending: Vec::with_capacity(years),
        exhausted: false,
    };

    for age in params.current_age.0..=params.horizon_age.0 {
        let growth = sample_factor(params.return_mean, params.return_stdev, rng);

        if age < params.retirement_age.0 {
            assets = assets * growth + params.annual_savings;
            basis.contribute(params.annual_savings);
            trajectory.assets.push(assets.max(0.0));
            trajectory.spending.push(0.0);
            continue;
        }

        let need = monthly_need * 12.0 + annual_need;
        let pension = if age >= params.legal_pension_age.0 {
            params.monthly_pension * 12.0
        } else {
            0.0
        };
        let net = (need - pension).max(0.0);

        // Grow first, withdraw from the grown pool.
        assets *= growth;

        if net > 0.0 {
            let gross = gross_withdrawal(assets, basis.value(), net, tax_rate);
            basis.consume(gross, assets);
            assets -= gross;
            if assets < 0.0 {
                exhausted = true;
            }
        } else {
            let surplus = pension - need;
            assets += surplus;
            basis.contribute(surplus);
        }

        if exhausted {
            // Keep the internal pool at zero once dry; a later pension
            // surplus may still refill it.
            assets = assets.max(0.0);
        }

        trajectory.assets.push(assets.max(0.0));
        trajectory.spending.push(monthly_need + annual_need / 12.0);

        let inflation =
            sample_factor(params.inflation_mean, params.inflation_stdev, rng);
        monthly_need *= inflation;
        annual_need *= inflation;
    }

    trajectory.exhausted = exhausted;
    trajectory
}
