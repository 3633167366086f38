//! CSV market universe and backtest report adapters.
//!
//! Market files carry a header row followed by
//! `id,question,category,liquidity,yes_price,no_price,ends_at`, where
//! `ends_at` is RFC 3339 or a bare `YYYY-MM-DD` date (midnight UTC).

use crate::domain::backtest::BacktestReport;
use crate::domain::error::GuardrailError;
use crate::domain::market::Market;
use crate::ports::market_port::MarketPort;
use crate::ports::report_port::ReportPort;
use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::PathBuf;

pub struct CsvMarketAdapter {
    path: PathBuf,
}

impl CsvMarketAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn market_error(line: u64, reason: impl std::fmt::Display) -> GuardrailError {
    GuardrailError::MarketData {
        reason: format!("line {line}: {reason}"),
    }
}

fn column<'r>(record: &'r csv::StringRecord, idx: usize, name: &str, line: u64) -> Result<&'r str, GuardrailError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| market_error(line, format!("missing {name} column")))
}

fn number(record: &csv::StringRecord, idx: usize, name: &str, line: u64) -> Result<f64, GuardrailError> {
    column(record, idx, name, line)?
        .parse()
        .map_err(|e| market_error(line, format!("invalid {name} value: {e}")))
}

fn parse_ends_at(value: &str, line: u64) -> Result<DateTime<Utc>, GuardrailError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| market_error(line, format!("invalid ends_at value: {value}")))
}

impl MarketPort for CsvMarketAdapter {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        let content = fs::read_to_string(&self.path).map_err(|e| GuardrailError::MarketData {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut markets = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| GuardrailError::MarketData {
                reason: format!("CSV parse error: {e}"),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            markets.push(Market {
                id: column(&record, 0, "id", line)?.to_string(),
                question: column(&record, 1, "question", line)?.to_string(),
                category: column(&record, 2, "category", line)?.to_string(),
                liquidity: number(&record, 3, "liquidity", line)?,
                yes_price: number(&record, 4, "yes_price", line)?,
                no_price: number(&record, 5, "no_price", line)?,
                ends_at: parse_ends_at(column(&record, 6, "ends_at", line)?, line)?,
            });
        }

        Ok(markets)
    }
}

/// Writes one row per evaluated market.
pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &BacktestReport, output_path: &str) -> Result<(), GuardrailError> {
        let io_err = |e: csv::Error| GuardrailError::Serialization {
            reason: format!("failed to write {output_path}: {e}"),
        };

        let mut wtr = csv::Writer::from_path(output_path).map_err(io_err)?;
        wtr.write_record([
            "policy_id",
            "market_id",
            "question",
            "category",
            "liquidity",
            "yes_price",
            "no_price",
            "allowed",
            "reason",
        ])
        .map_err(io_err)?;

        for row in &report.results {
            wtr.write_record([
                report.policy_id.as_str(),
                row.market_id.as_str(),
                row.market_question.as_str(),
                row.market_category.as_str(),
                &row.liquidity.to_string(),
                &row.yes_price.to_string(),
                &row.no_price.to_string(),
                if row.allowed { "true" } else { "false" },
                row.reason.as_str(),
            ])
            .map_err(io_err)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
