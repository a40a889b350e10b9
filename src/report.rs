//! Plain-text cost report and its export file.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use crate::calculator::CalculationResult;

const EXPORT_PREFIX: &str = "reporte_costos_";
const UNTITLED_PROJECT: &str = "Untitled";

/// Project name as printed in reports; blank names become "Untitled".
pub fn project_title(name: &str) -> &str {
    match name.trim() {
        "" => UNTITLED_PROJECT,
        trimmed => trimmed,
    }
}

/// Format an amount in euros with two decimals (e.g. "531.84 €").
pub fn format_eur(amount: f64) -> String {
    format!("{amount:.2} €")
}

/// Round to a whole number and group thousands with commas ("200,000,000").
pub fn format_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && digits.chars().any(|c| c != '0') {
        grouped.insert(0, '-');
    }
    grouped
}

/// Render the report for `result`.
pub fn format_report<Tz>(result: &CalculationResult, project_name: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "Cost Report - {}", project_title(project_name));
    let _ = writeln!(out, "Date: {}", timestamp.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Tokens processed: {}", format_thousands(result.tokens));
    let _ = writeln!(out, "Estimated time: {:.2} hours", result.total_hours);
    let _ = writeln!(out);
    let _ = writeln!(out, "Results by provider:");

    for b in result.iter() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", b.provider_name);
        let _ = writeln!(out, "- Total cost: {}", format_eur(b.total_cost));
        let _ = writeln!(out, "- Compute: {}", format_eur(b.compute_cost));
        let _ = writeln!(out, "- Storage: {}", format_eur(b.storage_cost));
        let _ = writeln!(out, "- Network: {}", format_eur(b.network_cost));
    }
    out
}

/// `reporte_costos_YYYYMMDD.txt`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_PREFIX}{}.txt", date.format("%Y%m%d"))
}

/// Write the report into `dir`, creating it if needed. Returns the file path.
pub fn export_report<Tz>(
    result: &CalculationResult,
    project_name: &str,
    timestamp: &DateTime<Tz>,
    dir: &Path,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(timestamp.date_naive()));
    let report = format_report(result, project_name, timestamp);
    std::fs::write(&path, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    tracing::info!(path = %path.display(), project = project_title(project_name), "exported cost report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate, CalcInput, Throughput};
    use crate::rates::RateTable;
    use chrono::Utc;

    fn result() -> CalculationResult {
        let input = CalcInput {
            tokens: 200_000_000.0,
            throughput: Throughput::DEFAULT,
        };
        calculate(&input, &RateTable::builtin())
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 3, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(200_000_000.0), "200,000,000");
        assert_eq!(format_thousands(1_234_567.4), "1,234,567");
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(2.15), "2.15 €");
        assert_eq!(format_eur(0.0), "0.00 €");
    }

    #[test]
    fn test_report_header() {
        let report = format_report(&result(), "Demo", &timestamp());
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Cost Report - Demo");
        assert_eq!(lines[1], "Date: 2024-12-03 14:05:09");
        assert_eq!(lines[2], "Tokens processed: 200,000,000");
        assert_eq!(lines[3], "Estimated time: 1111.11 hours");
    }

    #[test]
    fn test_report_provider_section() {
        let report = format_report(&result(), "Demo", &timestamp());
        assert!(report.contains(
            "AWS:\n- Total cost: 538.19 €\n- Compute: 531.84 €\n- Storage: 2.15 €\n- Network: 4.20 €\n"
        ));
    }

    #[test]
    fn test_blank_project_is_untitled() {
        assert_eq!(project_title("  Apollo "), "Apollo");
        assert_eq!(project_title("   "), "Untitled");
        let report = format_report(&result(), "", &timestamp());
        assert!(report.starts_with("Cost Report - Untitled\n"));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        assert_eq!(export_file_name(date), "reporte_costos_20241203.txt");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let path = export_report(&result(), "Demo", &timestamp(), &target).unwrap();
        assert_eq!(path, target.join("reporte_costos_20241203.txt"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Cost Report - Demo\n"));
    }
}
