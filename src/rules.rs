//! Module C: compiles user-authored [`RuleConfig`] entries into a
//! ready-to-evaluate [`CompiledRules`] (§3 "Rule", §4.B "compilation
//! algorithm"). Compilation happens once, at processor construction; the
//! result is immutable and shared read-only across every subsequent
//! evaluation (§5).

use crate::config::{Mode, ProcessorConfig, RuleConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::etl::{Condition, Engine, ValueExpr};
use crate::model::SpanKind;
use std::collections::HashSet;

/// One compiled rule: expressions are pre-parsed `rhai` ASTs, ready to
/// evaluate against a span without touching the ETL compiler again.
pub struct Rule {
    pub id: String,
    pub priority: i64,
    /// Empty means "matches every span kind" (§3).
    pub span_kinds: Vec<SpanKind>,
    pub condition: Condition,
    pub operation_name: ValueExpr,
    pub operation_type: Option<ValueExpr>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("span_kinds", &self.span_kinds)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Whether this rule applies to spans of `kind` (§3: an empty `span_kinds`
    /// list matches every kind).
    pub fn matches_kind(&self, kind: SpanKind) -> bool {
        self.span_kinds.is_empty() || self.span_kinds.contains(&kind)
    }
}

/// The compiled, immutable rule set plus the resolved top-level settings it
/// was compiled alongside (§3, §6).
#[derive(Debug)]
pub struct CompiledRules {
    /// `span_processing.enabled` (§3) — the evaluator's second pre-check.
    pub span_processing_enabled: bool,
    pub mode: Mode,
    pub operation_name_attribute: String,
    pub operation_type_attribute: String,
    pub preserve_original_name: bool,
    pub original_name_attribute: String,
    /// Sorted by ascending priority — lower wins (§3) — ties broken by original
    /// config order (§4.B).
    pub rules: Vec<Rule>,
}

/// Compiles a [`ProcessorConfig`] into [`CompiledRules`] (§4.B). The only
/// entry point into Module C; called once at processor construction.
pub struct RuleCompiler;

impl RuleCompiler {
    pub fn compile(config: &ProcessorConfig, engine: &Engine) -> ConfigResult<CompiledRules> {
        let sp = &config.span_processing;

        let mode = Mode::parse(&sp.mode).ok_or_else(|| ConfigError::InvalidMode(sp.mode.clone()))?;

        if sp.enabled && sp.rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }

        let mut seen_ids = HashSet::with_capacity(sp.rules.len());
        for rule in &sp.rules {
            if !seen_ids.insert(rule.id.as_str()) {
                return Err(ConfigError::DuplicateRuleId(rule.id.clone()));
            }
        }

        let mut rules = Vec::with_capacity(sp.rules.len());
        for rule_config in &sp.rules {
            rules.push(compile_rule(rule_config, engine)?);
        }

        // `sort_by_key` is stable: ties keep their original config order.
        // Lower priority wins (§3), so ascending order puts the winner first.
        rules.sort_by_key(|r| r.priority);

        Ok(CompiledRules {
            span_processing_enabled: sp.enabled,
            mode,
            operation_name_attribute: sp.operation_name_attribute.clone(),
            operation_type_attribute: sp.operation_type_attribute.clone(),
            preserve_original_name: sp.preserve_original_name,
            original_name_attribute: sp.original_name_attribute.clone(),
            rules,
        })
    }
}

fn compile_rule(config: &RuleConfig, engine: &Engine) -> ConfigResult<Rule> {
    if config.id.is_empty() {
        return Err(ConfigError::EmptyField {
            rule_id: config.id.clone(),
            field: "id",
        });
    }
    if config.condition.is_empty() {
        return Err(ConfigError::EmptyField {
            rule_id: config.id.clone(),
            field: "condition",
        });
    }
    if config.operation_name.is_empty() {
        return Err(ConfigError::EmptyField {
            rule_id: config.id.clone(),
            field: "operation_name",
        });
    }

    let mut span_kinds = Vec::with_capacity(config.span_kind.len());
    for kind in &config.span_kind {
        let parsed = SpanKind::parse(kind).ok_or_else(|| ConfigError::UnknownSpanKind {
            rule_id: config.id.clone(),
            kind: kind.clone(),
        })?;
        span_kinds.push(parsed);
    }

    let condition = engine
        .compile_condition(&config.condition)
        .map_err(|source| ConfigError::ExpressionCompile {
            rule_id: config.id.clone(),
            field: "condition",
            source: Box::new(source),
        })?;

    let operation_name =
        engine
            .compile_value(&config.operation_name)
            .map_err(|source| ConfigError::ExpressionCompile {
                rule_id: config.id.clone(),
                field: "operation_name",
                source: Box::new(source),
            })?;

    let operation_type = match &config.operation_type {
        Some(expr) if !expr.is_empty() => Some(engine.compile_value(expr).map_err(|source| {
            ConfigError::ExpressionCompile {
                rule_id: config.id.clone(),
                field: "operation_type",
                source: Box::new(source),
            }
        })?),
        _ => None,
    };

    Ok(Rule {
        id: config.id.clone(),
        priority: config.priority,
        span_kinds,
        condition,
        operation_name,
        operation_type,
    })
}
