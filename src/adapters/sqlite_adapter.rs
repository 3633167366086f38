//! SQLite policy store and evaluation audit log.
//!
//! Rules are stored as a JSON array in a TEXT column and decoded leniently,
//! so rows written by newer tools still load and fail closed.

use crate::domain::audit::AuditEntry;
use crate::domain::config_validation::MAX_POOL_SIZE;
use crate::domain::error::GuardrailError;
use crate::domain::evaluation::EvaluationResult;
use crate::domain::intent::{Intent, Side};
use crate::domain::policy::{NewPolicy, Policy};
use crate::domain::rule::PolicyRule;
use crate::ports::audit_port::AuditPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::policy_port::PolicyPort;
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};
use tracing::warn;
use uuid::Uuid;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn query_err(e: rusqlite::Error) -> GuardrailError {
    GuardrailError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn conversion_err<E>(len: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(len, rusqlite::types::Type::Text, Box::new(e))
}

/// Decode a stored rules column. A column that is not a JSON array becomes
/// a single unrecognized rule so the policy denies everything.
fn decode_rules(policy_id: &str, raw: &str) -> Vec<PolicyRule> {
    match serde_json::from_str::<Vec<PolicyRule>>(raw) {
        Ok(rules) => {
            let unknown = rules.iter().filter(|r| r.as_known().is_none()).count();
            if unknown > 0 {
                warn!(policy = %policy_id, unknown, "policy carries unrecognized rules");
            }
            rules
        }
        Err(e) => {
            warn!(policy = %policy_id, error = %e, "policy rules column is not a JSON array");
            vec![PolicyRule::Unrecognized(serde_json::Value::String(
                raw.to_string(),
            ))]
        }
    }
}

fn policy_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Policy> {
    let id: String = row.get(0)?;
    let rules_json: String = row.get(3)?;
    let rules = decode_rules(&id, &rules_json);
    Ok(Policy {
        id,
        name: row.get(1)?,
        description: row.get(2)?,
        rules,
    })
}

fn audit_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEntry> {
    let side_str: String = row.get(4)?;
    let side = side_str.parse::<Side>().map_err(|reason| {
        conversion_err(
            side_str.len(),
            std::io::Error::new(std::io::ErrorKind::InvalidData, reason),
        )
    })?;

    let ts_str: String = row.get(8)?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map_err(|e| conversion_err(ts_str.len(), e))?
        .with_timezone(&Utc);

    Ok(AuditEntry {
        id: row.get(0)?,
        policy_id: row.get(1)?,
        policy_name: row.get(2)?,
        intent: Intent::new(row.get::<_, String>(3)?, side, row.get(5)?),
        result: EvaluationResult {
            allowed: row.get(6)?,
            reason: row.get(7)?,
        },
        timestamp,
        market_question: row.get(9)?,
        market_category: row.get(10)?,
    })
}

/// `[sqlite] pool_size`, clamped to `1..=MAX_POOL_SIZE`.
fn pool_size(config: &dyn ConfigPort) -> u32 {
    let requested = config.get_int("sqlite", "pool_size", 4);
    u32::try_from(requested.clamp(1, MAX_POOL_SIZE)).unwrap_or(1)
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, GuardrailError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| GuardrailError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size(config))
            .build(manager)
            .map_err(|e: r2d2::Error| GuardrailError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// A private database. The pool holds one connection since every
    /// in-memory connection is its own database.
    pub fn in_memory() -> Result<Self, GuardrailError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| GuardrailError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, GuardrailError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| GuardrailError::Database {
                reason: e.to_string(),
            })
    }

    pub fn initialize_schema(&self) -> Result<(), GuardrailError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS policies (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                rules TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS evaluation_logs (
                id TEXT PRIMARY KEY,
                policy_id TEXT NOT NULL,
                policy_name TEXT NOT NULL,
                market_id TEXT NOT NULL,
                side TEXT NOT NULL,
                size REAL NOT NULL,
                allowed INTEGER NOT NULL,
                reason TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                market_question TEXT,
                market_category TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_evaluation_logs_timestamp
                ON evaluation_logs(timestamp);",
        )
        .map_err(query_err)?;

        Ok(())
    }

    /// Insert a policy row verbatim, keeping its id.
    pub fn insert_policy(&self, policy: &Policy) -> Result<(), GuardrailError> {
        let conn = self.conn()?;
        let rules = serde_json::to_string(&policy.rules)?;
        conn.execute(
            "INSERT OR REPLACE INTO policies (id, name, description, rules, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                policy.id,
                policy.name,
                policy.description,
                rules,
                Utc::now().to_rfc3339()
            ],
        )
        .map_err(query_err)?;
        Ok(())
    }
}

impl PolicyPort for SqliteAdapter {
    fn get_policy(&self, id: &str) -> Result<Option<Policy>, GuardrailError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, description, rules FROM policies WHERE id = ?1",
            params![id],
            policy_from_row,
        )
        .optional()
        .map_err(query_err)
    }

    fn list_policies(&self) -> Result<Vec<Policy>, GuardrailError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, description, rules FROM policies
                 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(query_err)?;

        let rows = stmt.query_map([], policy_from_row).map_err(query_err)?;

        let mut policies = Vec::new();
        for row in rows {
            policies.push(row.map_err(query_err)?);
        }
        Ok(policies)
    }

    fn create_policy(&self, policy: &NewPolicy) -> Result<Policy, GuardrailError> {
        let created = Policy {
            id: Uuid::new_v4().to_string(),
            name: policy.name.clone(),
            description: policy.description.clone(),
            rules: policy.rules.clone(),
        };
        self.insert_policy(&created)?;
        Ok(created)
    }
}

impl AuditPort for SqliteAdapter {
    fn record(&self, entry: &AuditEntry) -> Result<(), GuardrailError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO evaluation_logs (id, policy_id, policy_name, market_id, side, size,
                allowed, reason, timestamp, market_question, market_category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                entry.id,
                entry.policy_id,
                entry.policy_name,
                entry.intent.market_id,
                entry.intent.side.to_string(),
                entry.intent.size,
                entry.result.allowed,
                entry.result.reason,
                entry.timestamp.to_rfc3339(),
                entry.market_question,
                entry.market_category
            ],
        )
        .map_err(query_err)?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, GuardrailError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, policy_id, policy_name, market_id, side, size, allowed, reason,
                        timestamp, market_question, market_category
                 FROM evaluation_logs
                 ORDER BY timestamp DESC, rowid DESC
                 LIMIT ?1",
            )
            .map_err(query_err)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], audit_from_row).map_err(query_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(query_err)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::seed_policies;
    use crate::domain::rule::Rule;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    struct EmptyConfig;

    impl ConfigPort for EmptyConfig {
        fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
            None
        }
        fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
            default
        }
        fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
            default
        }
        fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
            default
        }
    }

    fn adapter() -> SqliteAdapter {
        let adapter = SqliteAdapter::in_memory().unwrap();
        adapter.initialize_schema().unwrap();
        adapter
    }

    fn entry(market_id: &str, allowed: bool, timestamp: DateTime<Utc>) -> AuditEntry {
        let policy = Policy::new("p1", "Cap", vec![Rule::MaxSize { max: 10.0 }]);
        let result = if allowed {
            EvaluationResult::all_rules_passed()
        } else {
            EvaluationResult::deny("Position size 20 exceeds maximum allowed 10")
        };
        AuditEntry::new(
            &policy,
            &Intent::new(market_id, Side::No, 20.0),
            None,
            &result,
            timestamp,
        )
    }

    #[test]
    fn from_config_missing_path() {
        match SqliteAdapter::from_config(&EmptyConfig) {
            Err(GuardrailError::ConfigMissing { section, key }) => {
                assert_eq!(section, "sqlite");
                assert_eq!(key, "path");
            }
            Err(other) => panic!("expected ConfigMissing, got: {other}"),
            Ok(_) => panic!("expected error, got Ok"),
        }
    }

    struct PoolSizeConfig(i64);

    impl ConfigPort for PoolSizeConfig {
        fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
            None
        }
        fn get_int(&self, _section: &str, _key: &str, _default: i64) -> i64 {
            self.0
        }
        fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
            default
        }
        fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
            default
        }
    }

    #[test]
    fn pool_size_is_clamped() {
        assert_eq!(pool_size(&EmptyConfig), 4);
        assert_eq!(pool_size(&PoolSizeConfig(0)), 1);
        assert_eq!(pool_size(&PoolSizeConfig(-7)), 1);
        assert_eq!(pool_size(&PoolSizeConfig(8)), 8);
        assert_eq!(pool_size(&PoolSizeConfig(5_000_000_000)), 64);
    }

    #[test]
    fn initialize_schema_is_idempotent() {
        let adapter = adapter();
        adapter.initialize_schema().unwrap();
    }

    #[test]
    fn create_and_get_policy() {
        let adapter = adapter();
        let created = adapter.create_policy(&seed_policies()[0]).unwrap();
        let loaded = adapter.get_policy(&created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
        assert!(adapter.get_policy("missing").unwrap().is_none());
    }

    #[test]
    fn list_policies_newest_first() {
        let adapter = adapter();
        for policy in seed_policies() {
            adapter.create_policy(&policy).unwrap();
        }
        let names: Vec<String> = adapter
            .list_policies()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Market Restricted Policy",
                "Aggressive Trading Policy",
                "Conservative Trading Policy"
            ]
        );
    }

    #[test]
    fn unknown_rules_load_as_unrecognized() {
        let adapter = adapter();
        let conn = adapter.conn().unwrap();
        conn.execute(
            "INSERT INTO policies (id, name, description, rules, created_at)
             VALUES ('p1', 'Legacy', '', ?1, '2024-01-01T00:00:00+00:00')",
            params![r#"[{"type":"maxSize","max":5},{"type":"maxLeverage","max":2}]"#],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO policies (id, name, description, rules, created_at)
             VALUES ('p2', 'Broken', '', 'garbage', '2024-01-02T00:00:00+00:00')",
            [],
        )
        .unwrap();
        drop(conn);

        let legacy = adapter.get_policy("p1").unwrap().unwrap();
        assert_eq!(legacy.rules.len(), 2);
        assert_eq!(
            legacy.rules[1],
            PolicyRule::Unrecognized(json!({"type": "maxLeverage", "max": 2}))
        );

        let broken = adapter.get_policy("p2").unwrap().unwrap();
        assert_eq!(broken.unrecognized_count(), 1);
    }

    #[test]
    fn audit_roundtrip_newest_first() {
        let adapter = adapter();
        let t0 = Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap();
        let older = entry("a", true, t0);
        let newer = entry("b", false, t0 + Duration::minutes(5));
        adapter.record(&older).unwrap();
        adapter.record(&newer).unwrap();

        let recent = adapter.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], newer);
        assert_eq!(recent[1], older);
        assert_eq!(recent[0].intent.side, Side::No);
    }

    #[test]
    fn audit_limit_is_respected() {
        let adapter = adapter();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for i in 0..5 {
            adapter
                .record(&entry(&format!("m{i}"), true, t0 + Duration::seconds(i)))
                .unwrap();
        }
        let recent = adapter.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].intent.market_id, "m4");
        assert!(adapter.recent(0).unwrap().is_empty());
    }
}
