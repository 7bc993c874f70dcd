//! Wraps a `rhai` engine configured as the processor's ETL: the four custom
//! functions of §4.A registered under their exact names, plus execution
//! bounds so a pathological expression cannot hang the hot path (§5).

use super::context::TransformContext;
use super::value::stringify_dynamic;
use crate::functions::{normalize_path, parse_sql, remove_query_params};
use rhai::{Array, Dynamic, FnPtr, ImmutableString, AST};
use std::fmt;

/// A compiled boolean condition expression.
#[derive(Clone)]
pub struct Condition {
    ast: AST,
}

/// A compiled value-producing expression (`operation_name`/`operation_type`).
#[derive(Clone)]
pub struct ValueExpr {
    ast: AST,
}

/// Error compiling a rule's expression against the ETL grammar (§7 "Validation").
#[derive(Debug)]
pub struct CompileError(rhai::ParseError);

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Error evaluating a compiled expression against a span (§7 "Processing").
#[derive(Debug)]
pub struct EvalError(Box<rhai::EvalAltResult>);

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for EvalError {}

/// The compiled-expression evaluator: one instance is built at processor
/// construction and shared (read-only) across all concurrent evaluations, the
/// same sharing model the compiled rule vector itself uses (§3, §5).
#[derive(Clone)]
pub struct Engine {
    inner: rhai::Engine,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        let mut inner = rhai::Engine::new();
        // Pure, CPU-bound expressions only: bound them so a malformed rule
        // cannot hang the hot path.
        inner.set_max_operations(200_000);
        inner.set_max_expr_depths(64, 32);
        inner.set_max_string_size(64 * 1024);
        inner.set_max_array_size(10_000);

        register_functions(&mut inner);
        Engine { inner }
    }

    pub fn compile_condition(&self, expr: &str) -> Result<Condition, CompileError> {
        let ast = self.inner.compile_expression(expr).map_err(CompileError)?;
        Ok(Condition { ast })
    }

    pub fn compile_value(&self, expr: &str) -> Result<ValueExpr, CompileError> {
        let ast = self.inner.compile_expression(expr).map_err(CompileError)?;
        Ok(ValueExpr { ast })
    }

    pub fn evaluate_condition(
        &self,
        condition: &Condition,
        ctx: &TransformContext,
    ) -> Result<bool, EvalError> {
        let mut scope = ctx.to_scope();
        self.inner
            .eval_ast_with_scope::<bool>(&mut scope, &condition.ast)
            .map_err(EvalError)
    }

    /// Evaluates `expr` and returns its result already stringified per §7.
    pub fn evaluate_value(&self, expr: &ValueExpr, ctx: &TransformContext) -> Result<String, EvalError> {
        let mut scope = ctx.to_scope();
        let result = self
            .inner
            .eval_ast_with_scope::<Dynamic>(&mut scope, &expr.ast)
            .map_err(EvalError)?;
        Ok(stringify_dynamic(&result))
    }
}

fn register_functions(engine: &mut rhai::Engine) {
    engine.register_fn("NormalizePath", |s: ImmutableString| -> ImmutableString {
        normalize_path(&s).into()
    });
    engine.register_fn("ParseSQL", |s: ImmutableString| -> ImmutableString {
        parse_sql(&s).into()
    });
    engine.register_fn("RemoveQueryParams", |s: ImmutableString| -> ImmutableString {
        remove_query_params(&s).into()
    });

    // `FirstNonNil` needs true laziness: each argument is a closure (rhai
    // function pointer) rather than an already-evaluated value, so a getter
    // that errors (e.g. a missing attribute) can be skipped instead of
    // failing the whole expression. Rule authors write e.g.
    // `FirstNonNil([|| attributes["operation.name"], || attributes["http.route"]])`.
    engine.register_fn(
        "FirstNonNil",
        |context: rhai::NativeCallContext, getters: Array| -> Dynamic {
            for getter in getters {
                let Some(fp) = getter.try_cast::<FnPtr>() else {
                    continue;
                };
                match fp.call_within_context::<Dynamic>(&context, ()) {
                    Ok(value) if !value.is_unit() => return value,
                    _ => continue,
                }
            }
            Dynamic::UNIT
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeMap, SpanKind};

    fn ctx<'a>(attrs: &'a AttributeMap) -> TransformContext<'a> {
        TransformContext {
            name: "whatever",
            kind: SpanKind::Server,
            attributes: attrs,
            resource_attributes: attrs,
            scope_attributes: attrs,
        }
    }

    #[test]
    fn normalize_path_is_reachable_from_expressions() {
        let engine = Engine::new();
        let mut attrs = AttributeMap::new();
        attrs.insert("http.target", "/users/12345/profile");
        let expr = engine
            .compile_value("NormalizePath(attributes[\"http.target\"])")
            .unwrap();
        let result = engine.evaluate_value(&expr, &ctx(&attrs)).unwrap();
        assert_eq!(result, "/users/{id}/profile");
    }

    #[test]
    fn first_non_nil_skips_missing_attribute_getters() {
        let engine = Engine::new();
        let mut attrs = AttributeMap::new();
        attrs.insert("http.route", "/users/{id}");
        let expr = engine
            .compile_value(
                "FirstNonNil([|| attributes[\"operation.name\"], || attributes[\"http.route\"]])",
            )
            .unwrap();
        let result = engine.evaluate_value(&expr, &ctx(&attrs)).unwrap();
        assert_eq!(result, "/users/{id}");
    }

    #[test]
    fn first_non_nil_returns_nil_when_everything_is_missing() {
        let engine = Engine::new();
        let attrs = AttributeMap::new();
        let expr = engine
            .compile_value(
                "FirstNonNil([|| attributes[\"a\"], || attributes[\"b\"]])",
            )
            .unwrap();
        let result = engine.evaluate_value(&expr, &ctx(&attrs)).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn condition_reads_span_kind_and_attributes() {
        let engine = Engine::new();
        let mut attrs = AttributeMap::new();
        attrs.insert("http.method", "GET");
        let condition = engine
            .compile_condition("kind == \"server\" && attributes[\"http.method\"] == \"GET\"")
            .unwrap();
        assert!(engine.evaluate_condition(&condition, &ctx(&attrs)).unwrap());
    }

    #[test]
    fn invalid_expression_fails_to_compile() {
        let engine = Engine::new();
        assert!(engine.compile_condition("this is not ) valid (").is_err());
    }
}
