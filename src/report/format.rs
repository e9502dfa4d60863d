//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the adapters and aggregation stay free of presentation concerns
//! - output changes are localized

use crate::data::HistoricalSeries;
use crate::domain::{ForecastMedian, MonthlyObservation};

/// Percentage with two decimals, or `n/a` when the figure is absent.
pub fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.2}%"),
        _ => "n/a".to_string(),
    }
}

/// Brazilian number formatting: `.` groups thousands, `,` marks decimals.
pub fn fmt_number_br(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    let raw = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }

    let mut out = String::new();
    let rounds_to_zero = raw.chars().all(|c| c == '0' || c == '.');
    if v < 0.0 && !rounds_to_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Annual percentage in the calculator's style: `4,50% a.a.`
pub fn fmt_annual_br(v: f64) -> String {
    format!("{}% a.a.", fmt_number_br(v, 2))
}

/// Summary of a historical request plus its last `last_n` months.
pub fn format_historical(h: &HistoricalSeries, last_n: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== infl - {} monthly change ({}) ===\n",
        h.index.display_name(),
        h.source
    ));
    out.push_str(&format!(
        "Window: {} .. {} (period {})\n",
        h.range.start, h.range.end, h.period
    ));
    match (h.series.first(), h.series.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Months: n={} | {} .. {}\n",
            h.series.len(),
            first.year_month,
            last.year_month
        )),
        _ => out.push_str("Months: n=0\n"),
    }

    out.push_str("\nAnnualized (geometric):\n");
    out.push_str(&format!("- last 12m: {}\n", fmt_pct(h.series.avg_12m())));
    out.push_str(&format!("- 5y avg  : {}\n", fmt_pct(h.avg_5y)));
    out.push_str(&format!("- 10y avg : {}\n", fmt_pct(h.avg_10y)));

    let tail = h.series.trailing(last_n);
    if !tail.is_empty() {
        out.push('\n');
        out.push_str(&format_table(tail));
    }

    out
}

pub fn format_forecast(median: &ForecastMedian, provider: &str) -> String {
    format!(
        "{} median ({} {}, via {}): {}\n",
        median.source,
        median.index.display_name(),
        median.horizon.as_str(),
        provider,
        fmt_pct(Some(median.value))
    )
}

fn format_table(rows: &[MonthlyObservation]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>10}\n", "month", "monthly %"));
    out.push_str(&format!("{:-<8} {:-<10}\n", "", ""));
    for r in rows {
        out.push_str(&format!("{:<8} {:>10.2}\n", r.year_month, r.percent_change));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::sgs::SGS_SOURCE;
    use crate::domain::{InflationIndex, MonthRange, PeriodKeyword};
    use crate::series::MonthlySeries;

    #[test]
    fn brazilian_formatting() {
        assert_eq!(fmt_number_br(4.5, 2), "4,50");
        assert_eq!(fmt_number_br(-0.214, 2), "-0,21");
        assert_eq!(fmt_number_br(1234567.891, 2), "1.234.567,89");
        assert_eq!(fmt_number_br(-0.001, 2), "0,00");
        assert_eq!(fmt_number_br(12.0, 0), "12");
        assert_eq!(fmt_annual_br(3.96), "3,96% a.a.");
    }

    #[test]
    fn missing_figures_print_as_na() {
        assert_eq!(fmt_pct(None), "n/a");
        assert_eq!(fmt_pct(Some(f64::NAN)), "n/a");
        assert_eq!(fmt_pct(Some(4.567)), "4.57%");
    }

    #[test]
    fn historical_summary_lists_tail() {
        let series = MonthlySeries::from_rows([
            ("01/01/2024", "0,42"),
            ("01/02/2024", "0,83"),
            ("01/03/2024", "0,16"),
        ]);
        let h = HistoricalSeries {
            index: InflationIndex::Ipca,
            period: PeriodKeyword::Years10,
            range: MonthRange::resolve(
                PeriodKeyword::Years10,
                None,
                None,
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ),
            avg_5y: series.avg_5y(),
            avg_10y: series.avg_10y(),
            series,
            source: SGS_SOURCE,
        };

        let text = format_historical(&h, 2);
        assert!(text.contains("IPCA monthly change (BCB/SGS)"));
        assert!(text.contains("Window: 2014-03 .. 2024-03"));
        assert!(text.contains("n=3 | 2024-01 .. 2024-03"));

        let table = text.split("monthly %").nth(1).unwrap();
        assert!(!table.contains("2024-01"));
        assert!(table.contains("2024-02"));
        assert!(table.contains("0.16"));
    }
}
