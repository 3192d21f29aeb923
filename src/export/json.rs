use crate::models::data_table::DataTable;
use crate::utils::formatting::hex;
use rusqlite::types::Value;
use serde_json::{Map, Value as Json};

pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Integer(n) => Json::from(*n),
        // NaN / infinity have no JSON form
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Text(s) => Json::String(s.clone()),
        Value::Blob(b) => Json::String(hex(b)),
    }
}

/// Object keys for `columns`. A repeated name gets a `_2`, `_3`, ... suffix
/// so no value is overwritten.
fn unique_keys(columns: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        let mut key = column.clone();
        let mut n = 2;
        while keys.contains(&key) {
            key = format!("{column}_{n}");
            n += 1;
        }
        keys.push(key);
    }
    keys
}

/// Array of objects, keys in column order.
pub fn table_to_json(dt: &DataTable) -> Json {
    let keys = unique_keys(dt.columns());
    let rows = dt
        .rows()
        .map(|row| {
            let mut obj = Map::new();
            for (key, value) in keys.iter().zip(row.values()) {
                obj.insert(key.clone(), value_to_json(value));
            }
            Json::Object(obj)
        })
        .collect();
    Json::Array(rows)
}
