use rand::Rng;
use rand_distr::{Distribution, LogNormal};

/// Draw a strictly positive multiplicative yearly factor whose rate
/// (`factor − 1`) has arithmetic mean `mean` and standard deviation `stdev`.
///
/// Returns are applied multiplicatively (`assets *= factor`), and a normal
/// draw on the rate can produce a factor at or below zero. The factor is
/// therefore drawn lognormal, with the ln-space parameters moment-matched
/// to the requested arithmetic moments:
///
///   σ² = ln(1 + s²/(1+m)²)
///   μ  = ln(1+m) − σ²/2
///
/// so that E[factor] = 1+m and SD[factor] = s over many draws.
///
/// Requires `mean > −1`. `stdev ≤ 0` degenerates to the deterministic
/// factor `1 + mean` rather than an invalid distribution.
pub fn sample_factor(mean: f64, stdev: f64, rng: &mut impl Rng) -> f64 {
    if stdev <= 0.0 {
        return 1.0 + mean;
    }
    let m1 = 1.0 + mean;
    debug_assert!(m1 > 0.0, "mean rate must exceed -1, got {mean}");
    let sigma_sq = (1.0 + (stdev * stdev) / (m1 * m1)).ln();
    let mu = m1.ln() - sigma_sq / 2.0;
    let dist = LogNormal::new(mu, sigma_sq.sqrt()).expect("invalid LogNormal params");
    dist.sample(rng)
}
