//! Port traits: the boundaries between domain logic and the outside world.

pub mod attestation_port;
pub mod audit_port;
pub mod config_port;
pub mod market_port;
pub mod policy_port;
pub mod report_port;
