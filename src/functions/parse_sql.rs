//! `ParseSQL` — extract a low-cardinality `OPERATION TABLE` label from a SQL
//! statement (§4.A).

use regex::Regex;
use std::sync::LazyLock;

const QUOTE_CHARS: [char; 5] = ['`', '"', '\'', '[', ']'];

static SELECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*select\s+.*?\s+from\s+(\S+)").expect("valid regex"));
static INSERT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*insert\s+into\s+(\S+)").expect("valid regex"));
static UPDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*update\s+(\S+)").expect("valid regex"));
static DELETE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*delete\s+from\s+(\S+)").expect("valid regex"));

/// Extracts `OPERATION TABLE` from common SQL statements, falling back to the
/// uppercased first word (or `"UNKNOWN"` for an empty statement).
pub fn parse_sql(s: &str) -> String {
    if let Some(captures) = SELECT_RE.captures(s) {
        return format!("SELECT {}", clean_table(&captures[1]));
    }
    if let Some(captures) = INSERT_RE.captures(s) {
        return format!("INSERT {}", clean_table(&captures[1]));
    }
    if let Some(captures) = UPDATE_RE.captures(s) {
        return format!("UPDATE {}", clean_table(&captures[1]));
    }
    if let Some(captures) = DELETE_RE.captures(s) {
        return format!("DELETE {}", clean_table(&captures[1]));
    }

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return "UNKNOWN".to_string();
    }
    trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_uppercase()
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c: char| QUOTE_CHARS.contains(&c))
}

fn clean_table(raw: &str) -> String {
    let stripped = strip_quotes(raw);
    if stripped.contains('.') {
        let last = stripped.rsplit('.').next().unwrap_or(stripped);
        strip_quotes(last).to_string()
    } else {
        stripped.to_string()
    }
}
