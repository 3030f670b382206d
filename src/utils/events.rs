//! Structured adapter events.
//!
//! These mirror the host framework's `ConnectionUsed`, `SQLQuery` and
//! `SQLQueryStatus` events. They are emitted as `tracing` events under the
//! `dbt_impala::events` target so subscribers can filter on them.

use std::time::Duration;

pub const EVENTS_TARGET: &str = "dbt_impala::events";

/// Characters of SQL kept when a query log is abridged.
pub const ABRIDGED_SQL_LEN: usize = 512;

pub fn connection_used(conn_type: &str, conn_name: &str) {
    tracing::debug!(
        target: EVENTS_TARGET,
        event = "ConnectionUsed",
        conn_type,
        conn_name,
        "Using {} connection \"{}\"",
        conn_type,
        conn_name
    );
}

pub fn sql_query(conn_name: &str, sql: &str) {
    tracing::debug!(
        target: EVENTS_TARGET,
        event = "SQLQuery",
        conn_name,
        sql,
        "On {}: {}",
        conn_name,
        sql
    );
}

pub fn sql_query_status(status: &str, elapsed: Duration) {
    let elapsed = round_elapsed(elapsed);
    tracing::debug!(
        target: EVENTS_TARGET,
        event = "SQLQueryStatus",
        status,
        elapsed,
        "SQL status: {} in {:.2} seconds",
        status,
        elapsed
    );
}

/// Seconds rounded to two decimals.
pub fn round_elapsed(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

/// The SQL text as it should appear in the query log.
pub fn log_sql(sql: &str, abridge: bool) -> String {
    if abridge {
        let head: String = sql.chars().take(ABRIDGED_SQL_LEN).collect();
        format!("{}...", head)
    } else {
        sql.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_elapsed() {
        assert_eq!(round_elapsed(Duration::from_millis(1234)), 1.23);
        assert_eq!(round_elapsed(Duration::from_millis(5)), 0.01);
        assert_eq!(round_elapsed(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_log_sql_abridged() {
        let sql = "x".repeat(600);
        let logged = log_sql(&sql, true);
        assert_eq!(logged.len(), ABRIDGED_SQL_LEN + 3);
        assert!(logged.ends_with("..."));

        // short statements still get the suffix
        assert_eq!(log_sql("select 1", true), "select 1...");
        assert_eq!(log_sql("select 1", false), "select 1");
    }

    #[test]
    fn test_log_sql_respects_char_boundaries() {
        let sql = "é".repeat(600);
        let logged = log_sql(&sql, true);
        assert_eq!(logged.chars().count(), ABRIDGED_SQL_LEN + 3);
    }
}
