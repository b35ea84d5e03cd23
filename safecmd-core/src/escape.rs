//! POSIX single-quote escaping.
//!
//! Inside single quotes a POSIX shell interprets nothing, so the only
//! character that needs care is the single quote itself: it becomes `'\''`
//! (close the quote, emit a literal quote, reopen). Embedded NUL bytes pass
//! through untouched; what happens to them is up to the process primitive.

/// Quote one value so a POSIX shell reads it back as exactly one literal word.
pub fn escape(value: impl AsRef<str>) -> String {
    let value = value.as_ref();
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Escape each value and join them with single spaces. An empty list yields `""`.
pub fn escape_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter().map(escape).collect::<Vec<_>>().join(" ")
}
