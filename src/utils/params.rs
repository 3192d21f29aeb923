//! Parsing of `NAME=VALUE` procedure parameters given on the command line.

use crate::db::command::Params;
use crate::errors::{AppError, AppResult};
use rusqlite::types::Value;

/// Guess the SQL type of a command-line value.
///
/// `NULL` → null, integers and reals as numbers, `'quoted'` → text with the
/// quotes stripped, anything else → text.
pub fn parse_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("null") {
        return Value::Null;
    }

    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        return Value::Text(trimmed[1..trimmed.len() - 1].to_string());
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Integer(n);
    }

    if let Ok(f) = trimmed.parse::<f64>()
        && f.is_finite()
    {
        return Value::Real(f);
    }

    Value::Text(raw.to_string())
}

/// Split one `NAME=VALUE` argument.
pub fn parse_param(arg: &str) -> AppResult<(String, Value)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| AppError::InvalidParameter(format!("'{arg}' is not in NAME=VALUE form")))?;

    let name = name.trim();
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(AppError::InvalidParameter(format!(
            "'{arg}' has an empty or malformed name"
        )));
    }

    Ok((name.to_string(), parse_value(value)))
}

/// Build a parameter set; `None` when no parameters were given.
pub fn parse_params(args: &[String]) -> AppResult<Option<Params>> {
    if args.is_empty() {
        return Ok(None);
    }

    let mut params = Params::new();
    for arg in args {
        let (name, value) = parse_param(arg)?;
        let key = name.trim_start_matches(['@', ':', '$']).to_ascii_lowercase();
        if params
            .keys()
            .any(|k| k.trim_start_matches(['@', ':', '$']).to_ascii_lowercase() == key)
        {
            return Err(AppError::InvalidParameter(format!(
                "parameter '{name}' given more than once"
            )));
        }
        params.insert(name, value);
    }
    Ok(Some(params))
}
