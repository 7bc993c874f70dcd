//! Module B: the embedded ETL that backs a rule's `condition`, `operation_name`,
//! and `operation_type` expressions (§3, §4.B). Built on `rhai` — the same
//! role a `rhai`-backed scripting surface plays in other embedding-heavy Rust
//! services — kept to a sandboxed expression subset rather than full scripts.

mod context;
mod engine;
mod value;

pub use context::TransformContext;
pub use engine::{CompileError, Condition, EvalError, Engine, ValueExpr};
