use std::sync::LazyLock;

use regex::Regex;

static ARRAY_INDEX_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\[[^\]]+\])+$").expect("array index suffix pattern should compile")
});

/// Quotes identifiers and literals for one dialect and applies the table prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrap {
    prefix: String,
    identifier_quote: char,
    backslash_escapes: bool,
}

impl Wrap {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            identifier_quote: '"',
            backslash_escapes: false,
        }
    }

    #[must_use]
    pub fn with_identifier_quote(mut self, identifier_quote: char) -> Self {
        self.identifier_quote = identifier_quote;
        self
    }

    /// String literals treat `\` as an escape character and need it doubled.
    #[must_use]
    pub fn with_backslash_escapes(mut self) -> Self {
        self.backslash_escapes = true;
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn value(&self, value: &str) -> String {
        if value == "*" {
            return value.to_string();
        }

        let quote = self.identifier_quote;
        let escaped = value.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    #[must_use]
    pub fn table(&self, table: &str) -> String {
        if let Some((name, alias)) = split_alias(table) {
            let alias = format!("{}{alias}", self.prefix);
            return format!("{} as {}", self.table(name), self.value(&alias));
        }

        match table.rsplit_once('.') {
            Some((schema, name)) => {
                let schema = schema
                    .split('.')
                    .map(|segment| self.value(segment))
                    .collect::<Vec<_>>()
                    .join(".");
                format!("{schema}.{}", self.value(&format!("{}{name}", self.prefix)))
            }
            None => self.value(&format!("{}{table}", self.prefix)),
        }
    }

    #[must_use]
    pub fn column(&self, column: &str) -> String {
        if let Some((name, alias)) = split_alias(column) {
            return format!("{} as {}", self.column(name), self.value(alias));
        }

        match column.rsplit_once('.') {
            Some((table, name)) => format!("{}.{}", self.table(table), self.value(name)),
            None => self.value(column),
        }
    }

    #[must_use]
    pub fn columns<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        columns
            .iter()
            .map(|column| self.column(column.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn columnize<S: AsRef<str>>(&self, columns: &[S]) -> String {
        self.columns(columns).join(", ")
    }

    #[must_use]
    pub fn prefix_array<S: AsRef<str>>(&self, prefix: &str, values: &[S]) -> Vec<String> {
        values
            .iter()
            .map(|value| format!("{prefix} {}", value.as_ref()))
            .collect()
    }

    /// Renders a single-quoted string literal.
    #[must_use]
    pub fn quote(&self, value: &str) -> String {
        format!("'{}'", self.escape(value))
    }

    #[must_use]
    pub fn quotes<S: AsRef<str>>(&self, values: &[S]) -> Vec<String> {
        values.iter().map(|value| self.quote(value.as_ref())).collect()
    }

    /// Escapes text placed between single quotes.
    #[must_use]
    pub fn escape(&self, value: &str) -> String {
        let escaped = value.replace('\'', "''");
        if self.backslash_escapes {
            escaped.replace('\\', "\\\\")
        } else {
            escaped
        }
    }

    #[must_use]
    pub fn not(&self, sql: &str, negate: bool) -> String {
        if negate {
            format!("not {sql}")
        } else {
            sql.to_string()
        }
    }

    /// Splits `field->a->b[0]` into the quoted field and a `, '<path>'` argument.
    #[must_use]
    pub fn json_field_and_path(&self, column: &str) -> (String, String) {
        match column.split_once("->") {
            Some((field, path)) => (self.column(field), format!(", {}", self.json_path(path))),
            None => (self.column(column), String::new()),
        }
    }

    /// Renders `a->b[0]->[1]` as the literal `'$."a"."b"[0][1]'`.
    #[must_use]
    pub fn json_path(&self, value: &str) -> String {
        let mut path = String::from("$");
        for segment in value.split("->") {
            push_json_path_segment(&mut path, segment);
        }

        self.quote(&path)
    }
}

fn push_json_path_segment(path: &mut String, segment: &str) {
    let (key, indexes) = match ARRAY_INDEX_SUFFIX.find(segment) {
        Some(indexes) => (&segment[..indexes.start()], indexes.as_str()),
        None => (segment, ""),
    };

    // Bare `[n]` segments index the previous member.
    if !key.is_empty() || indexes.is_empty() {
        path.push_str(".\"");
        path.push_str(&key.replace('\\', "\\\\").replace('"', "\\\""));
        path.push('"');
    }
    path.push_str(indexes);
}

fn split_alias(value: &str) -> Option<(&str, &str)> {
    let position = value.to_ascii_lowercase().find(" as ")?;
    Some((value[..position].trim(), value[position + 4..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_path_segment_keeps_bare_array_indexes() {
        let mut path = String::from("$");
        push_json_path_segment(&mut path, "items[1][2]");
        push_json_path_segment(&mut path, "[0]");
        push_json_path_segment(&mut path, "name");

        assert_eq!(path, "$.\"items\"[1][2][0].\"name\"");
    }

    #[test]
    fn split_alias_is_case_insensitive() {
        assert_eq!(split_alias("users AS u"), Some(("users", "u")));
        assert_eq!(split_alias("users"), None);
    }
}
