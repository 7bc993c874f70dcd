//! The custom-function table from §8, exercised through the crate's public
//! `functions` module.

use rstest::rstest;
use semconv_processor::functions::{first_non_nil, normalize_path, parse_sql, remove_query_params, Getter};

#[rstest]
#[case("/users/550e8400-e29b-41d4-a716-446655440000/x", "/users/{id}/x")]
#[case("/users/123/posts/456", "/users/{id}/posts/{id}")]
#[case("/objects/507f1f77bcf86cd799439011", "/objects/{id}")]
#[case("/search?q=t&n=1", "/search")]
fn normalize_path_matches_spec_table(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_path(input), expected);
}

#[rstest]
#[case("SELECT * FROM users WHERE id=?", "SELECT users")]
#[case(
    "SELECT u.name FROM `schema`.`users` u JOIN orders o ON u.id=o.user_id",
    "SELECT users"
)]
#[case("TRUNCATE TABLE sessions", "TRUNCATE")]
fn parse_sql_matches_spec_table(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse_sql(input), expected);
}

#[test]
fn remove_query_params_matches_spec_table() {
    assert_eq!(remove_query_params("/a?b=c"), "/a");
}

#[test]
fn first_non_nil_matches_spec_table() {
    let matching: Vec<Getter> = vec![Box::new(|| Ok(None)), Box::new(|| Ok(None)), Box::new(|| Ok(Some("x".to_string())))];
    assert_eq!(first_non_nil(&matching), Some("x".to_string()));

    let all_nil: Vec<Getter> = vec![Box::new(|| Ok(None)), Box::new(|| Ok(None))];
    assert_eq!(first_non_nil(&all_nil), None);
}
