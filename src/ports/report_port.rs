//! Report generation port trait.

use crate::domain::backtest::BacktestReport;
use crate::domain::error::GuardrailError;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(&self, report: &BacktestReport, output_path: &str) -> Result<(), GuardrailError>;
}
