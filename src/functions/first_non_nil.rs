//! `FirstNonNil` — the lazy-getter fallback function (§4.A).
//!
//! The ETL-facing binding (`crate::etl`) adapts `rhai::FnPtr` closures to this
//! pure core so the evaluation policy — skip erroring getters, stop at the
//! first non-nil value — is tested independently of the scripting engine.

use std::error::Error as StdError;

/// A getter: evaluated lazily, at most once, left-to-right.
pub type Getter<'a> = Box<dyn Fn() -> Result<Option<String>, Box<dyn StdError + Send + Sync>> + 'a>;

/// Evaluates `getters` left-to-right, returning the first value that
/// evaluates without error *and* is not nil. A getter that errors is skipped,
/// not treated as the overall result. Returns `None` if every getter errors
/// or evaluates to nil.
pub fn first_non_nil(getters: &[Getter]) -> Option<String> {
    for getter in getters {
        if let Ok(Some(value)) = getter() {
            return Some(value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nil() -> Getter<'static> {
        Box::new(|| Ok(None))
    }

    fn value(v: &'static str) -> Getter<'static> {
        Box::new(move || Ok(Some(v.to_string())))
    }

    fn erroring() -> Getter<'static> {
        Box::new(|| Err("attribute missing".into()))
    }

    #[test]
    fn returns_first_non_nil() {
        let getters = vec![nil(), nil(), value("x")];
        assert_eq!(first_non_nil(&getters), Some("x".to_string()));
    }

    #[test]
    fn returns_none_when_all_nil() {
        let getters = vec![nil(), nil()];
        assert_eq!(first_non_nil(&getters), None);
    }

    #[test]
    fn skips_erroring_getters_rather_than_failing() {
        let getters = vec![erroring(), erroring(), value("fallback")];
        assert_eq!(first_non_nil(&getters), Some("fallback".to_string()));
    }

    #[test]
    fn none_when_every_getter_errors() {
        let getters = vec![erroring(), erroring()];
        assert_eq!(first_non_nil(&getters), None);
    }

    #[test]
    fn stops_at_first_match_without_evaluating_later_getters() {
        use std::cell::Cell;
        let evaluated_third = Cell::new(false);
        let getters: Vec<Getter> = vec![
            value("first"),
            Box::new(|| {
                evaluated_third.set(true);
                Ok(Some("second".to_string()))
            }),
        ];
        assert_eq!(first_non_nil(&getters), Some("first".to_string()));
        assert!(!evaluated_third.get());
    }
}
