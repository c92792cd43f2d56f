mod decimal_utils;
mod time_utils;

pub use decimal_utils::{parse_decimal, parse_decimal_f64};
pub use time_utils::rfc3339_to_unix_or_zero;
