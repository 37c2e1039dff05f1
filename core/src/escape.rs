//! Translates ODBC escape-clause syntax (`{d '...'}`, `{t '...'}`,
//! `{ts '...'}`, `{fn ...}`, `{escape '...'}`) into the SQL the server
//! understands. A single-pass scanner, not a general SQL parser: escape
//! clauses don't nest in practice and this doesn't attempt to handle them if
//! they do.

pub fn translate_escapes(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;
    while !rest.is_empty() {
        match rest.find('{') {
            None => {
                out.push_str(rest);
                break;
            }
            Some(start) => {
                out.push_str(&rest[..start]);
                let tail = &rest[start..];
                match translate_one(tail) {
                    Some((replacement, consumed)) => {
                        out.push_str(&replacement);
                        rest = &tail[consumed..];
                    }
                    None => {
                        out.push('{');
                        rest = &tail[1..];
                    }
                }
            }
        }
    }
    out
}

/// `tail` starts with `{`. Returns the replacement text and how many bytes
/// of `tail` it consumes, or `None` if `tail` isn't a recognized escape
/// clause (the leading `{` is then copied through literally).
fn translate_one(tail: &str) -> Option<(String, usize)> {
    let end = tail.find('}')?;
    let inner = tail[1..end].trim();
    let consumed = end + 1;
    if let Some(lit) = inner.strip_prefix("ts ") {
        return Some((format!("TIMESTAMP {}", lit.trim()), consumed));
    }
    if let Some(lit) = inner.strip_prefix("d ") {
        return Some((format!("DATE {}", lit.trim()), consumed));
    }
    if let Some(lit) = inner.strip_prefix("t ") {
        return Some((format!("TIME {}", lit.trim()), consumed));
    }
    if let Some(call) = inner.strip_prefix("fn ") {
        return Some((call.trim().to_string(), consumed));
    }
    if let Some(esc) = inner.strip_prefix("escape ") {
        return Some((format!("ESCAPE {}", esc.trim()), consumed));
    }
    None
}
