use serde::Serialize;

/// A stored procedure as kept in a catalog's procedure store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Procedure {
    pub name: String,
    pub body: String,
    pub parameters: Vec<String>,
    pub created_at: String, // RFC 3339
}
