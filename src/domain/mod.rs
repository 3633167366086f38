//! Core domain types and logic.
//!
//! Everything here is pure: the evaluator, engine and backtest runner take
//! their inputs by reference and perform no I/O.

pub mod error;
pub mod intent;
pub mod market;
pub mod rule;
pub mod rule_parser;
pub mod rule_eval;
pub mod evaluation;
pub mod policy;
pub mod engine;
pub mod backtest;
pub mod audit;
pub mod agent;
pub mod config_validation;
