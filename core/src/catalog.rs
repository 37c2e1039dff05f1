//! Canned SQL text for the catalog entry points (`SQLTables`, `SQLColumns`,
//! ...). Each builder returns a string the caller hands to
//! `Connection::execute` unchanged; the catalog functions never speak a
//! distinct wire protocol of their own.

/// Builds `SHOW TABLES [LIKE pattern]`. `catalog`/`schema` are accepted for
/// signature compatibility with `SQLTables` but carry no filter here: this
/// engine exposes a single catalog per connection.
pub fn show_tables(table_pattern: &str) -> String {
    let pattern = like_pattern(table_pattern);
    match pattern {
        Some(p) => format!("SHOW TABLES LIKE '{p}'"),
        None => "SHOW TABLES".to_string(),
    }
}

/// Builds `SHOW COLUMNS IN table [LIKE pattern]`.
pub fn show_columns(table: &str, column_pattern: &str) -> String {
    let pattern = like_pattern(column_pattern);
    match pattern {
        Some(p) => format!("SHOW COLUMNS IN {} LIKE '{p}'", quote_ident(table)),
        None => format!("SHOW COLUMNS IN {}", quote_ident(table)),
    }
}

/// Escapes an identifier pattern's single quotes for embedding in the
/// literal above. Empty and `%` (ODBC's "match everything") both map to no
/// filter at all.
fn like_pattern(raw: &str) -> Option<String> {
    if raw.is_empty() || raw == "%" {
        return None;
    }
    Some(raw.replace('\'', "''"))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
