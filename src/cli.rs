//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

use crate::adapters::csv_adapter::{CsvMarketAdapter, CsvReportAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::gamma_adapter::{GammaHttpAdapter, GammaSnapshotAdapter};
use crate::adapters::json_policy_store::JsonPolicyStore;
use crate::adapters::jsonl_attestation::JsonlAttestationSink;
use crate::adapters::sample_markets::{FallbackMarketSource, SampleMarketSource};
use crate::domain::agent::propose_intent;
use crate::domain::audit::{AttestationReceipt, AttestationRecord, AuditEntry};
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestReport};
use crate::domain::config_validation::{validate_config, validate_policy_config};
use crate::domain::engine::{evaluate_intent, evaluate_verbose};
use crate::domain::error::GuardrailError;
use crate::domain::evaluation::{EvaluationResult, RuleVerdict};
use crate::domain::intent::{Intent, Side};
use crate::domain::market::Market;
use crate::domain::policy::{NewPolicy, Policy, PolicySelector, resolve_policy, seed_policies};
use crate::domain::rule::PolicyRule;
use crate::domain::rule_parser;
use crate::ports::attestation_port::AttestationPort;
use crate::ports::audit_port::AuditPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketPort;
use crate::ports::policy_port::PolicyPort;
use crate::ports::report_port::ReportPort;

pub const INLINE_POLICY_ID: &str = "inline";
pub const DEFAULT_LOG_LIMIT: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "guardrail", about = "Policy guardrails for prediction-market trading agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one trading intent against a policy
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        market_id: String,
        #[arg(long, default_value = "YES")]
        side: Side,
        #[arg(long)]
        size: f64,
        #[arg(long)]
        policy_id: Option<String>,
        /// Report every rule's verdict, not just the first denial
        #[arg(short, long)]
        verbose: bool,
        #[arg(long)]
        json: bool,
        /// Skip the audit log
        #[arg(long)]
        no_audit: bool,
    },
    /// Replay a policy against the configured market universe
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        policy_id: Option<String>,
        #[arg(long)]
        side: Option<Side>,
        #[arg(long)]
        size: Option<f64>,
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        json: bool,
    },
    /// Parse and print the rules of an inline policy
    Validate {
        #[arg(short, long)]
        policy: PathBuf,
    },
    /// List stored policies, newest first
    Policies {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Store the inline [policy] section as a new policy
    Create {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Insert the starter policies into the store
    Seed {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run the example agent once and evaluate its proposal
    Agent {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        policy_id: Option<String>,
        /// Seed for reproducible proposals
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show recent audit log entries
    Logs {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: usize,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            market_id,
            side,
            size,
            policy_id,
            verbose,
            json,
            no_audit,
        } => run_evaluate(
            &config,
            Intent::new(market_id, side, size),
            policy_id.as_deref(),
            verbose,
            json,
            no_audit,
        ),
        Command::Backtest {
            config,
            output,
            policy_id,
            side,
            size,
            parallel,
            json,
        } => run_backtest(
            &config,
            output.as_ref(),
            policy_id.as_deref(),
            BacktestOverrides {
                side,
                size,
                parallel,
            },
            json,
        ),
        Command::Validate { policy } => run_validate(&policy),
        Command::Policies { config } => run_policies(&config),
        Command::Create { config } => run_create(&config),
        Command::Seed { config } => run_seed(&config),
        Command::Agent {
            config,
            policy_id,
            seed,
        } => run_agent(&config, policy_id.as_deref(), seed),
        Command::Logs { config, limit } => run_logs(&config, limit),
    }
}

fn fail(e: &GuardrailError) -> ExitCode {
    eprintln!("error: {e}");
    e.into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GuardrailError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        fail(&err)
    })
}

/// Build the inline `[policy]` section, if the config carries one.
pub fn build_policy(adapter: &dyn ConfigPort) -> Result<Option<Policy>, GuardrailError> {
    let Some(rules_str) = adapter.get_string("policy", "rules") else {
        return Ok(None);
    };

    let rules = rule_parser::parse(&rules_str)?;
    let id = adapter
        .get_string("policy", "id")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| INLINE_POLICY_ID.to_string());
    let name = adapter
        .get_string("policy", "name")
        .unwrap_or_else(|| "Unnamed".to_string());

    let mut policy = Policy::new(id, name, rules);
    policy.description = adapter
        .get_string("policy", "description")
        .unwrap_or_default();
    Ok(Some(policy))
}

/// Insert the inline `[policy]` section into the configured store. The store
/// assigns the id; `[policy] id` is ignored.
pub fn create_policy_from_config(adapter: &dyn ConfigPort) -> Result<Policy, GuardrailError> {
    validate_policy_config(adapter)?;
    let policy = build_policy(adapter)?.ok_or_else(|| GuardrailError::ConfigMissing {
        section: "policy".into(),
        key: "rules".into(),
    })?;
    open_policy_store(adapter)?.create_policy(&NewPolicy::from(policy))
}

#[cfg(feature = "sqlite")]
fn open_sqlite(
    adapter: &dyn ConfigPort,
) -> Result<Option<crate::adapters::sqlite_adapter::SqliteAdapter>, GuardrailError> {
    use crate::adapters::sqlite_adapter::SqliteAdapter;

    if adapter.get_string("sqlite", "path").is_none() {
        return Ok(None);
    }
    let db = SqliteAdapter::from_config(adapter)?;
    db.initialize_schema()?;
    Ok(Some(db))
}

/// Open the configured policy store: `[sqlite]` when present, else `[store]`.
pub fn open_policy_store(adapter: &dyn ConfigPort) -> Result<Box<dyn PolicyPort>, GuardrailError> {
    #[cfg(feature = "sqlite")]
    {
        if let Some(db) = open_sqlite(adapter)? {
            return Ok(Box::new(db));
        }
    }

    match adapter.get_string("store", "path") {
        Some(path) => Ok(Box::new(JsonPolicyStore::new(path.trim()))),
        None => Err(GuardrailError::ConfigMissing {
            section: "store".into(),
            key: "path".into(),
        }),
    }
}

/// The audit log lives in SQLite; without it evaluations are not recorded.
pub fn open_audit_log(adapter: &dyn ConfigPort) -> Result<Option<Box<dyn AuditPort>>, GuardrailError> {
    #[cfg(feature = "sqlite")]
    {
        if let Some(db) = open_sqlite(adapter)? {
            return Ok(Some(Box::new(db)));
        }
    }

    #[cfg(not(feature = "sqlite"))]
    let _ = adapter;
    Ok(None)
}

pub fn open_attestation_sink(adapter: &dyn ConfigPort) -> Option<JsonlAttestationSink> {
    adapter
        .get_string("attestation", "path")
        .filter(|p| !p.trim().is_empty())
        .map(|p| JsonlAttestationSink::new(p.trim()))
}

pub fn open_market_source(adapter: &dyn ConfigPort) -> Result<Box<dyn MarketPort>, GuardrailError> {
    let source = adapter
        .get_string("markets", "source")
        .unwrap_or_else(|| "sample".to_string())
        .trim()
        .to_lowercase();

    let market_path = || {
        adapter
            .get_string("markets", "path")
            .ok_or_else(|| GuardrailError::ConfigMissing {
                section: "markets".into(),
                key: "path".into(),
            })
    };

    let primary: Box<dyn MarketPort> = match source.as_str() {
        "sample" => return Ok(Box::new(SampleMarketSource)),
        "csv" => Box::new(CsvMarketAdapter::new(market_path()?.trim())),
        "gamma" => Box::new(GammaSnapshotAdapter::new(market_path()?.trim())),
        "gamma_http" => Box::new(GammaHttpAdapter::from_config(adapter)?),
        other => {
            return Err(GuardrailError::ConfigInvalid {
                section: "markets".into(),
                key: "source".into(),
                reason: format!("unknown source '{other}'"),
            });
        }
    };

    if adapter.get_bool("markets", "fallback", true) {
        Ok(Box::new(FallbackMarketSource::new(primary)))
    } else {
        Ok(primary)
    }
}

/// Pick the policy to evaluate against.
///
/// An explicit id always goes to the store. Otherwise an inline `[policy]`
/// section wins over the store's most recent policy.
pub fn select_policy(adapter: &dyn ConfigPort, policy_id: Option<&str>) -> Result<Policy, GuardrailError> {
    if policy_id.is_none()
        && let Some(policy) = build_policy(adapter)?
    {
        return Ok(policy);
    }

    let store = open_policy_store(adapter)?;
    resolve_policy(store.as_ref(), &PolicySelector::from(policy_id))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BacktestOverrides {
    pub side: Option<Side>,
    pub size: Option<f64>,
    pub parallel: bool,
}

pub fn build_backtest_config(
    adapter: &dyn ConfigPort,
    overrides: BacktestOverrides,
) -> Result<BacktestConfig, GuardrailError> {
    let defaults = BacktestConfig::default();

    let side = match overrides.side {
        Some(side) => side,
        None => match adapter.get_string("backtest", "side") {
            Some(s) => s.parse().map_err(|reason| GuardrailError::ConfigInvalid {
                section: "backtest".into(),
                key: "side".into(),
                reason,
            })?,
            None => defaults.side,
        },
    };

    Ok(BacktestConfig {
        side,
        size: overrides
            .size
            .unwrap_or_else(|| adapter.get_double("backtest", "size", defaults.size)),
        parallel: overrides.parallel || adapter.get_bool("backtest", "parallel", defaults.parallel),
    })
}

/// Everything one evaluation produced, in the shape printed by `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub policy_id: String,
    pub policy_name: String,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
    pub result: EvaluationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdicts: Option<Vec<RuleVerdict>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation: Option<AttestationReceipt>,
}

/// Evaluate one intent and publish the verdict.
///
/// Audit and attestation failures are logged and never change the verdict.
pub fn evaluate_and_record(
    policy: &Policy,
    intent: Intent,
    market: Option<Market>,
    audit: Option<&dyn AuditPort>,
    attestation: Option<&dyn AttestationPort>,
    verbose: bool,
) -> EvaluationOutcome {
    if market.is_none() && policy.needs_market() {
        warn!(
            policy = %policy.id,
            market = %intent.market_id,
            "no market snapshot; market rules will deny"
        );
    }

    let (result, verdicts) = if verbose {
        let trace = evaluate_verbose(&intent, policy, market.as_ref());
        (trace.result, Some(trace.verdicts))
    } else {
        (evaluate_intent(&intent, policy, market.as_ref()), None)
    };

    if let Some(audit) = audit {
        let entry = AuditEntry::new(policy, &intent, market.as_ref(), &result, Utc::now());
        if let Err(e) = audit.record(&entry) {
            warn!(error = %e, "failed to record evaluation");
        }
    }

    let receipt = attestation.and_then(|sink| {
        let record = AttestationRecord::from_evaluation(policy, &intent, &result);
        sink.attest(&record)
            .map_err(|e| warn!(error = %e, "failed to attest evaluation"))
            .ok()
    });

    EvaluationOutcome {
        policy_id: policy.id.clone(),
        policy_name: policy.name.clone(),
        intent,
        market,
        result,
        verdicts,
        attestation: receipt,
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&GuardrailError::from(e)),
    }
}

fn print_outcome(outcome: &EvaluationOutcome) {
    let verdict = if outcome.result.allowed {
        "ALLOWED"
    } else {
        "DENIED"
    };
    println!("{verdict}: {}", outcome.result.reason);

    if let Some(verdicts) = &outcome.verdicts {
        for v in verdicts {
            let mark = if v.result.allowed { "pass" } else { "deny" };
            eprintln!("  [{}] {:<17} {}  {}", v.index, v.kind, mark, v.result.reason);
        }
    }
    if let Some(receipt) = &outcome.attestation {
        eprintln!("Attested #{} ({})", receipt.sequence, receipt.digest);
    }
}

/// Open the audit log unless disabled. A log that fails to open is skipped.
fn audit_for(adapter: &dyn ConfigPort, no_audit: bool) -> Option<Box<dyn AuditPort>> {
    if no_audit {
        return None;
    }
    open_audit_log(adapter).unwrap_or_else(|e| {
        warn!(error = %e, "audit log unavailable");
        None
    })
}

fn run_evaluate(
    config_path: &PathBuf,
    intent: Intent,
    policy_id: Option<&str>,
    verbose: bool,
    json: bool,
    no_audit: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(&e);
    }

    // Stage 2: Resolve policy
    let policy = match select_policy(&adapter, policy_id) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };
    eprintln!("Policy: {} ({})", policy.name, policy.id);

    // Stage 3: Look up the market snapshot
    let markets = match open_market_source(&adapter) {
        Ok(m) => m,
        Err(e) => return fail(&e),
    };
    let market = match markets.find_market(&intent.market_id) {
        Ok(m) => m,
        Err(e) => return fail(&e),
    };
    if market.is_none() {
        eprintln!("warning: no market data for {}", intent.market_id);
    }

    // Stage 4: Evaluate, audit, attest
    let audit = audit_for(&adapter, no_audit);
    let sink = open_attestation_sink(&adapter);
    let outcome = evaluate_and_record(
        &policy,
        intent,
        market,
        audit.as_deref(),
        sink.as_ref().map(|s| s as &dyn AttestationPort),
        verbose,
    );

    // Stage 5: Report
    if json {
        return print_json(&outcome);
    }
    print_outcome(&outcome);
    ExitCode::SUCCESS
}

pub fn print_backtest_summary(report: &BacktestReport) {
    let s = &report.summary;
    eprintln!("\n=== Backtest: {} ({}) ===", report.policy_name, report.policy_id);
    eprintln!("Total Markets:    {}", s.total_markets);
    eprintln!("Allowed:          {}", s.allowed_count);
    eprintln!("Blocked:          {}", s.blocked_count);

    if !s.breakdown_by_reason.is_empty() {
        eprintln!("\n=== Blocked By Reason ===");
        for (reason, count) in &s.breakdown_by_reason {
            eprintln!("  {count:>4}  {reason}");
        }
    }
}

/// Stages after the policy is known: fetch markets, replay, report.
pub fn run_backtest_pipeline(
    markets: &dyn MarketPort,
    report_port: &dyn ReportPort,
    policy: &Policy,
    bt_config: &BacktestConfig,
    output_path: Option<&PathBuf>,
) -> Result<BacktestReport, GuardrailError> {
    let universe = markets.fetch_markets()?;
    eprintln!(
        "Running backtest: {} markets, {} {} per market",
        universe.len(),
        bt_config.side,
        bt_config.size
    );

    let report = backtest_engine::run_backtest(policy, &universe, bt_config);

    if let Some(path) = output_path {
        report_port.write(&report, &path.display().to_string())?;
        eprintln!("Report written to: {}", path.display());
    }
    Ok(report)
}

fn run_backtest(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    policy_id: Option<&str>,
    overrides: BacktestOverrides,
    json: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(&e);
    }

    // Stage 2: Resolve policy and backtest settings
    let policy = match select_policy(&adapter, policy_id) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };
    let bt_config = match build_backtest_config(&adapter, overrides) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    // Stage 3: Market source and report destination
    let markets = match open_market_source(&adapter) {
        Ok(m) => m,
        Err(e) => return fail(&e),
    };
    let output = output_path
        .cloned()
        .or_else(|| adapter.get_string("backtest", "output").map(PathBuf::from));

    // Stage 4: Run
    let report = match run_backtest_pipeline(
        markets.as_ref(),
        &CsvReportAdapter,
        &policy,
        &bt_config,
        output.as_ref(),
    ) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    if json {
        return print_json(&report);
    }
    print_backtest_summary(&report);
    ExitCode::SUCCESS
}

fn print_rules(rules: &[PolicyRule]) {
    for (i, rule) in rules.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, rule);
    }
}

fn run_validate(policy_path: &PathBuf) -> ExitCode {
    eprintln!("Validating policy: {}", policy_path.display());
    let adapter = match load_config(policy_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let Some(rules_str) = adapter.get_string("policy", "rules") else {
        return fail(&GuardrailError::ConfigMissing {
            section: "policy".into(),
            key: "rules".into(),
        });
    };

    if let Err(e) = rule_parser::parse(&rules_str) {
        eprintln!("  error: {}", e.display_with_context(&rules_str));
        return (&GuardrailError::from(e)).into();
    }
    if let Err(e) = validate_policy_config(&adapter) {
        return fail(&e);
    }

    let policy = match build_policy(&adapter) {
        Ok(Some(p)) => p,
        Ok(None) => return ExitCode::from(2),
        Err(e) => return fail(&e),
    };

    eprintln!("\nPolicy: {} ({})", policy.name, policy.id);
    if policy.rules.is_empty() {
        eprintln!("  (no rules: every intent is allowed)");
    }
    print_rules(&policy.rules);
    eprintln!("\nPolicy configuration is valid.");
    ExitCode::SUCCESS
}

fn run_policies(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let store = match open_policy_store(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let policies = match store.list_policies() {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    if policies.is_empty() {
        eprintln!("No policies found");
        return ExitCode::SUCCESS;
    }

    for policy in &policies {
        println!("{}\t{}\t{} rules", policy.id, policy.name, policy.rules.len());
        print_rules(&policy.rules);
    }
    eprintln!("{} policies found", policies.len());
    ExitCode::SUCCESS
}

fn run_create(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match create_policy_from_config(&adapter) {
        Ok(created) => {
            println!("{}\t{}", created.id, created.name);
            print_rules(&created.rules);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_seed(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let store = match open_policy_store(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    for new_policy in seed_policies() {
        match store.create_policy(&new_policy) {
            Ok(created) => println!("{}\t{}", created.id, created.name),
            Err(e) => return fail(&e),
        }
    }
    ExitCode::SUCCESS
}

/// Restrict the agent to `[agent] markets`, a comma-separated id list. An
/// absent or empty list keeps the whole universe.
pub fn agent_universe(adapter: &dyn ConfigPort, universe: Vec<Market>) -> Vec<Market> {
    let allowed = adapter.get_list("agent", "markets");
    if allowed.is_empty() {
        return universe;
    }
    universe
        .into_iter()
        .filter(|m| allowed.contains(&m.id))
        .collect()
}

fn run_agent(config_path: &PathBuf, policy_id: Option<&str>, seed: Option<u64>) -> ExitCode {
    // Stage 1: Load and validate config
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(&e);
    }

    // Stage 2: Policy and markets
    let policy = match select_policy(&adapter, policy_id) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };
    let universe = match open_market_source(&adapter).and_then(|m| m.fetch_markets()) {
        Ok(u) => agent_universe(&adapter, u),
        Err(e) => return fail(&e),
    };

    // Stage 3: Propose and evaluate
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let (intent, market) = propose_intent(&universe, &mut rng);
    eprintln!(
        "Agent proposes: {} {} on {}",
        intent.side, intent.size, intent.market_id
    );

    let audit = audit_for(&adapter, false);
    let sink = open_attestation_sink(&adapter);
    let outcome = evaluate_and_record(
        &policy,
        intent,
        market,
        audit.as_deref(),
        sink.as_ref().map(|s| s as &dyn AttestationPort),
        false,
    );
    print_outcome(&outcome);
    ExitCode::SUCCESS
}

fn run_logs(config_path: &PathBuf, limit: usize) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let audit = match open_audit_log(&adapter) {
        Ok(Some(a)) => a,
        Ok(None) => {
            return fail(&GuardrailError::ConfigMissing {
                section: "sqlite".into(),
                key: "path".into(),
            });
        }
        Err(e) => return fail(&e),
    };

    let entries = match audit.recent(limit) {
        Ok(e) => e,
        Err(e) => return fail(&e),
    };

    for entry in &entries {
        let verdict = if entry.result.allowed { "ALLOW" } else { "DENY " };
        println!(
            "{}  {}  {:<12} {} {} on {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            verdict,
            entry.policy_name,
            entry.intent.side,
            entry.intent.size,
            entry.intent.market_id,
            entry.result.reason
        );
    }
    eprintln!("{} entries", entries.len());
    ExitCode::SUCCESS
}
