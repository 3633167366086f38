//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod gamma_adapter;
pub mod json_policy_store;
pub mod jsonl_attestation;
pub mod sample_markets;
#[cfg(feature = "sqlite")]
pub mod sqlite_adapter;
