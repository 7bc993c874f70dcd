//! Custom ETL functions (§4.A): pure string transforms with no I/O and no
//! global mutable state, registered into the ETL engine's function table
//! under the exact names `NormalizePath`, `ParseSQL`, `RemoveQueryParams`,
//! `FirstNonNil`.

mod first_non_nil;
mod normalize_path;
mod parse_sql;
mod remove_query_params;

pub use first_non_nil::{first_non_nil, Getter};
pub use normalize_path::normalize_path;
pub use parse_sql::parse_sql;
pub use remove_query_params::remove_query_params;
