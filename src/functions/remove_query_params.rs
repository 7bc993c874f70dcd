//! `RemoveQueryParams` — drop everything from the first `?` onward (§4.A).

/// Returns the substring of `s` preceding the first `?`, or `s` unchanged if
/// there is none.
pub fn remove_query_params(s: &str) -> String {
    match s.find('?') {
        Some(idx) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_string() {
        assert_eq!(remove_query_params("/a?b=c"), "/a");
    }

    #[test]
    fn leaves_unchanged_without_query() {
        assert_eq!(remove_query_params("/a/b/c"), "/a/b/c");
    }

    #[test]
    fn idempotent() {
        let once = remove_query_params("/a?b=c&d=e");
        let twice = remove_query_params(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn bare_question_mark() {
        assert_eq!(remove_query_params("/a?"), "/a");
        assert_eq!(remove_query_params("?"), "");
    }
}
