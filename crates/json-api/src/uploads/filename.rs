//! Stored file names for uploads.

/// Name an upload is stored under: `<millis>-<base><ext>`.
///
/// The original name is lower-cased, anything outside `[a-z0-9._-]` becomes
/// `-`, dash runs collapse and edge dashes are trimmed. The extension is kept
/// and an empty base becomes `image`.
pub(crate) fn stored_file_name(unix_millis: i64, original: &str) -> String {
    let safe = sanitize(original);
    let (base, extension) = split_extension(&safe);
    let base = if base.is_empty() { "image" } else { base };

    format!("{unix_millis}-{base}{extension}")
}

fn sanitize(original: &str) -> String {
    let mut safe = String::with_capacity(original.len());

    for c in original.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-') {
            c
        } else {
            '-'
        };

        if c == '-' && safe.ends_with('-') {
            continue;
        }

        safe.push(c);
    }

    safe.trim_matches('-').to_string()
}

/// Split at the last dot, unless that dot starts the name.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}
