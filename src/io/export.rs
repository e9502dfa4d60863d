//! Export a monthly series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::HistoricalSeries;
use crate::error::AppError;

/// Write one row per month: `index,year_month,monthly_percent`.
pub fn write_series_csv(path: &Path, history: &HistoricalSeries) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::internal(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series(&mut file, history)
}

fn write_series<W: Write>(out: &mut W, history: &HistoricalSeries) -> Result<(), AppError> {
    writeln!(out, "index,year_month,monthly_percent")
        .map_err(|e| AppError::internal(format!("Failed to write export CSV header: {e}")))?;

    for obs in history.series.observations() {
        writeln!(
            out,
            "{},{},{}",
            history.index.display_name(),
            obs.year_month,
            obs.percent_change
        )
        .map_err(|e| AppError::internal(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::sgs::SGS_SOURCE;
    use crate::domain::{InflationIndex, MonthRange, PeriodKeyword};
    use crate::series::MonthlySeries;

    #[test]
    fn writes_header_and_rows_in_order() {
        let series = MonthlySeries::from_rows([("01/02/2024", "0,83"), ("01/01/2024", "0,42")]);
        let history = HistoricalSeries {
            index: InflationIndex::Igpm,
            period: PeriodKeyword::Years5,
            range: MonthRange::resolve(
                PeriodKeyword::Years5,
                None,
                None,
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ),
            avg_5y: None,
            avg_10y: None,
            series,
            source: SGS_SOURCE,
        };

        let mut buf = Vec::new();
        write_series(&mut buf, &history).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "index,year_month,monthly_percent\nIGP-M,2024-01,0.42\nIGP-M,2024-02,0.83\n"
        );
    }
}
