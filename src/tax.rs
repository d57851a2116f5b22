//! Capital-gains gross-up for withdrawals and the running cost basis.
//!
//! Withdrawing `net` euros of spending money requires selling more than
//! `net`, because the gain share of the sale is taxed. With basis ratio
//! `b = basis / assets` (the untaxed principal share) and flat tax rate
//! `t`, the gross sale solves
//!
//!   W = net / (1 − t · (1 − b))

/// Gross amount to sell so that `net_needed` remains after capital-gains
/// tax. `tax_rate` is a fraction in [0, 1].
///
/// When the pool is empty or negative the basis ratio is taken as 1
/// (everything left is principal) and the withdrawal passes through
/// untaxed. The denominator is bounded below by `1 − t`, so it never
/// reaches zero for `tax_rate < 1`.
pub fn gross_withdrawal(assets: f64, cost_basis: f64, net_needed: f64, tax_rate: f64) -> f64 {
    let basis_ratio = if assets <= 0.0 {
        1.0
    } else {
        (cost_basis / assets).clamp(0.0, 1.0)
    };
    net_needed / (1.0 - tax_rate * (1.0 - basis_ratio))
}

/// Untaxed principal remaining in the pool. Contributions add to it in
/// full; a withdrawal consumes it in proportion to the basis share of the
/// sale, mirroring how `gross_withdrawal` prices the gain share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBasis {
    value: f64,
}

impl CostBasis {
    pub fn new(value: f64) -> Self {
        CostBasis { value: value.max(0.0) }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn contribute(&mut self, amount: f64) {
        self.value += amount;
    }

    /// Basis share of the pool, 1 when the pool is empty or negative.
    pub fn ratio(&self, assets: f64) -> f64 {
        if assets <= 0.0 {
            1.0
        } else {
            (self.value / assets).clamp(0.0, 1.0)
        }
    }

    /// Reduce the basis after selling `gross` out of `assets_before`.
    /// The remaining basis can never exceed what is left in the pool.
    pub fn consume(&mut self, gross: f64, assets_before: f64) {
        let consumed = self.ratio(assets_before) * gross;
        let remaining_assets = (assets_before - gross).max(0.0);
        self.value = (self.value - consumed).clamp(0.0, remaining_assets);
    }
}
