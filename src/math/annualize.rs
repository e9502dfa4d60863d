//! Geometric annualization of monthly rates.
//!
//! Given monthly percentage changes `r_1 … r_n`, the equivalent annual rate is:
//!
//! ```text
//! annual = ((Π (1 + r_i/100)) ^ (12 / n) - 1) × 100
//! ```
//!
//! i.e. the constant pace that, compounded monthly for a year, matches the
//! cumulative effect of the observed months.
//!
//! Implementation choices:
//! - Growth factors that are non-finite or `<= 0` are discarded before the
//!   product (a monthly change at or below −100% has no economic meaning).
//! - `n` counts the surviving factors, so dropped points do not distort the
//!   exponent.
//! - An empty (or all-invalid) input has no answer. We return `None` rather
//!   than `0.0` so callers can tell "insufficient data" from "zero inflation".

/// Annualize a sequence of monthly percentage rates.
pub fn geometric_annualized_pct(monthly_rates: &[f64]) -> Option<f64> {
    let factors: Vec<f64> = monthly_rates
        .iter()
        .map(|r| 1.0 + r / 100.0)
        .filter(|f| f.is_finite() && *f > 0.0)
        .collect();

    if factors.is_empty() {
        return None;
    }

    let product: f64 = factors.iter().product();
    let annual = product.powf(12.0 / factors.len() as f64) - 1.0;
    Some(annual * 100.0)
}

/// Convert an annual percentage rate back to the equivalent constant monthly rate.
pub fn monthly_from_annual_pct(annual_pct: f64) -> f64 {
    ((1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_months_of_one_percent() {
        let annual = geometric_annualized_pct(&[1.0, 1.0, 1.0]).unwrap();
        let expected = (1.01_f64.powi(3).powi(4) - 1.0) * 100.0;
        assert!((annual - expected).abs() < 1e-10);
        assert!((annual - 12.6825).abs() < 1e-3, "got {annual}");
    }

    #[test]
    fn empty_or_all_invalid_is_none() {
        assert_eq!(geometric_annualized_pct(&[]), None);
        assert_eq!(geometric_annualized_pct(&[-100.0, -150.0]), None);
        assert_eq!(geometric_annualized_pct(&[f64::NAN, f64::INFINITY]), None);
    }

    #[test]
    fn invalid_points_do_not_count_in_exponent() {
        let clean = geometric_annualized_pct(&[0.5, 0.3]).unwrap();
        let dirty = geometric_annualized_pct(&[0.5, -120.0, f64::NAN, 0.3]).unwrap();
        assert!((clean - dirty).abs() < 1e-12);
    }

    #[test]
    fn twelve_months_is_the_compounded_year() {
        let rates = [0.4, 0.5, -0.2, 0.3, 0.8, 0.1, 0.0, 0.6, 0.45, 0.2, -0.1, 0.55];
        let annual = geometric_annualized_pct(&rates).unwrap();
        let cumulative: f64 = rates.iter().map(|r| 1.0 + r / 100.0).product();
        assert!((annual - (cumulative - 1.0) * 100.0).abs() < 1e-10);
    }

    #[test]
    fn deannualized_rate_reproduces_cumulative_product() {
        let samples: [&[f64]; 4] = [
            &[0.5],
            &[0.5, -0.2, 0.3],
            &[1.2, 0.9, 0.7, 0.3, -0.4, 0.2, 0.1],
            &[-5.0, 12.0, 0.0, 3.3, -0.9],
        ];
        for rates in samples {
            let annual = geometric_annualized_pct(rates).unwrap();
            let monthly = monthly_from_annual_pct(annual);
            let rebuilt = (1.0 + monthly / 100.0).powi(rates.len() as i32);
            let cumulative: f64 = rates.iter().map(|r| 1.0 + r / 100.0).product();
            assert!(
                (rebuilt - cumulative).abs() < 1e-9,
                "rates={rates:?} rebuilt={rebuilt} cumulative={cumulative}"
            );
        }
    }
}
