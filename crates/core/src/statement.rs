/// SQL text with positional `?` placeholders and their values in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSql {
    pub sql: String,
    pub bindings: Vec<String>,
}

impl BoundSql {
    #[must_use]
    pub const fn new(sql: String, bindings: Vec<String>) -> Self {
        Self { sql, bindings }
    }
}
