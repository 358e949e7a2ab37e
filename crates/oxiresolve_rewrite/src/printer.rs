use log::debug;

use crate::rewriter::LiteralEdit;

/// Prints `source` with every changed specifier literal rewritten in place.
///
/// The suffix is inserted just before the closing quote, so quote style and
/// escape sequences inside the literal survive. Bytes outside the edited
/// literals are copied unchanged; with no changes the output equals `source`.
pub fn print(source: &str, edits: &[LiteralEdit]) -> String {
    let mut out = String::with_capacity(source.len() + edits.len() * 4);
    let mut last = 0usize;

    for edit in edits {
        let Some(appended) = edit.appended() else {
            continue;
        };
        let end = edit.span.end as usize;
        if end == 0 || end > source.len() {
            debug!("Literal span {:?} outside source, skipping '{}'", edit.span, edit.original);
            continue;
        }
        let close = end - 1;
        if close < last || !matches!(source.as_bytes()[close], b'"' | b'\'') {
            debug!("No closing quote at {:?}, skipping '{}'", edit.span, edit.original);
            continue;
        }
        out.push_str(&source[last..close]);
        out.push_str(appended);
        last = close;
    }

    out.push_str(&source[last..]);
    out
}
