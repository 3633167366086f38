//! Configuration validation.
//!
//! Checks every INI section a command depends on before any store or market
//! source is opened.

use crate::domain::error::GuardrailError;
use crate::domain::intent::Side;
use crate::domain::rule_parser;
use crate::ports::config_port::ConfigPort;

pub const MARKET_SOURCES: [&str; 4] = ["sample", "csv", "gamma", "gamma_http"];

pub const MAX_POOL_SIZE: i64 = 64;

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> GuardrailError {
    GuardrailError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn missing(section: &str, key: &str) -> GuardrailError {
    GuardrailError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    }
}

/// Validate an inline `[policy]` section. Absent sections are fine.
pub fn validate_policy_config(config: &dyn ConfigPort) -> Result<(), GuardrailError> {
    let Some(rules) = config.get_string("policy", "rules") else {
        return Ok(());
    };

    match config.get_string("policy", "name") {
        Some(s) if !s.trim().is_empty() => {}
        _ => return Err(missing("policy", "name")),
    }

    if let Some(id) = config.get_string("policy", "id")
        && id.trim().is_empty()
    {
        return Err(invalid("policy", "id", "id must not be empty"));
    }

    rule_parser::parse(&rules).map_err(|e| invalid("policy", "rules", e.to_string()))?;
    Ok(())
}

pub fn validate_store_config(config: &dyn ConfigPort) -> Result<(), GuardrailError> {
    if let Some(path) = config.get_string("store", "path")
        && path.trim().is_empty()
    {
        return Err(invalid("store", "path", "path must not be empty"));
    }

    if config.get_string("sqlite", "path").is_some() {
        let pool_size = config.get_int("sqlite", "pool_size", 4);
        if !(1..=MAX_POOL_SIZE).contains(&pool_size) {
            return Err(invalid(
                "sqlite",
                "pool_size",
                format!("pool_size must be between 1 and {MAX_POOL_SIZE}"),
            ));
        }
    }
    Ok(())
}

pub fn validate_markets_config(config: &dyn ConfigPort) -> Result<(), GuardrailError> {
    let source = config
        .get_string("markets", "source")
        .unwrap_or_else(|| "sample".to_string());
    let source = source.trim().to_lowercase();

    if !MARKET_SOURCES.contains(&source.as_str()) {
        return Err(invalid(
            "markets",
            "source",
            format!("unknown source '{source}', expected one of {}", MARKET_SOURCES.join(", ")),
        ));
    }

    match source.as_str() {
        "sample" => {}
        "gamma_http" => {
            if let Some(url) = config.get_string("markets", "url")
                && url.trim().is_empty()
            {
                return Err(invalid("markets", "url", "url must not be empty"));
            }
            if config.get_int("markets", "timeout_secs", 10) < 1 {
                return Err(invalid(
                    "markets",
                    "timeout_secs",
                    "timeout_secs must be at least 1",
                ));
            }
        }
        _ => match config.get_string("markets", "path") {
            Some(s) if !s.trim().is_empty() => {}
            _ => return Err(missing("markets", "path")),
        },
    }
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), GuardrailError> {
    if let Some(side) = config.get_string("backtest", "side") {
        side.parse::<Side>()
            .map_err(|reason| invalid("backtest", "side", reason))?;
    }

    if let Some(size) = config.get_string("backtest", "size") {
        match size.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => {}
            _ => {
                return Err(invalid(
                    "backtest",
                    "size",
                    format!("size must be a finite number, got '{size}'"),
                ));
            }
        }
    }

    if let Some(output) = config.get_string("backtest", "output")
        && output.trim().is_empty()
    {
        return Err(invalid("backtest", "output", "output must not be empty"));
    }
    Ok(())
}

pub fn validate_attestation_config(config: &dyn ConfigPort) -> Result<(), GuardrailError> {
    if let Some(path) = config.get_string("attestation", "path")
        && path.trim().is_empty()
    {
        return Err(invalid("attestation", "path", "path must not be empty"));
    }
    Ok(())
}

/// Run every section validator in a fixed order.
pub fn validate_config(config: &dyn ConfigPort) -> Result<(), GuardrailError> {
    validate_policy_config(config)?;
    validate_store_config(config)?;
    validate_markets_config(config)?;
    validate_backtest_config(config)?;
    validate_attestation_config(config)?;
    Ok(())
}
