//! Fully-qualified name handling.
//!
//! An FQN uniquely identifies a symbol within an index. Three separators
//! structure it:
//!
//! - `\` joins namespace segments (`App\Model\User`)
//! - `::` accesses a static member (`App\User::create`)
//! - `->` accesses an instance member (`App\User->name`)
//!
//! The helpers here are pure string slicing; no allocation, no validation.
//! An empty FQN is never a valid symbol name and the index guards against
//! it explicitly at the prefix-trie boundary.

/// Namespace separator between qualifier segments.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Static member access operator.
pub const STATIC_ACCESS: &str = "::";

/// Instance member access operator.
pub const INSTANCE_ACCESS: &str = "->";

/// Extract the scope key of an FQN: the portion before the first member
/// access operator (`::` or `->`, whichever occurs first).
///
/// An FQN containing neither operator is its own scope key, so a class and
/// its members share one scope group:
///
/// ```
/// use cairn::fqn::scope_key;
///
/// assert_eq!(scope_key("App\\User::save"), "App\\User");
/// assert_eq!(scope_key("App\\User->name"), "App\\User");
/// assert_eq!(scope_key("App\\User"), "App\\User");
/// ```
pub fn scope_key(fqn: &str) -> &str {
    let end = match (fqn.find(STATIC_ACCESS), fqn.find(INSTANCE_ACCESS)) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => fqn.len(),
    };
    &fqn[..end]
}

/// The trailing segment of an FQN: the text after the last separator of any
/// kind. This is the name a reference falls back to when no namespaced match
/// exists — global symbols are never namespaced further, so one hop suffices.
///
/// ```
/// use cairn::fqn::last_segment;
///
/// assert_eq!(last_segment("Foo\\Bar"), "Bar");
/// assert_eq!(last_segment("App\\User::save"), "save");
/// assert_eq!(last_segment("strlen"), "strlen");
/// ```
pub fn last_segment(fqn: &str) -> &str {
    let mut start = 0;
    if let Some(pos) = fqn.rfind(NAMESPACE_SEPARATOR) {
        start = start.max(pos + NAMESPACE_SEPARATOR.len_utf8());
    }
    if let Some(pos) = fqn.rfind(STATIC_ACCESS) {
        start = start.max(pos + STATIC_ACCESS.len());
    }
    if let Some(pos) = fqn.rfind(INSTANCE_ACCESS) {
        start = start.max(pos + INSTANCE_ACCESS.len());
    }
    &fqn[start..]
}

/// Split an FQN into qualifier segments, each separator attached to the end
/// of the segment it closes. This is the unit the prefix trie is keyed on.
///
/// ```
/// use cairn::fqn::split_segments;
///
/// assert_eq!(split_segments("App\\User::save"), ["App\\", "User::", "save"]);
/// assert_eq!(split_segments("A\\B"), ["A\\", "B"]);
/// assert_eq!(split_segments("A\\"), ["A\\"]);
/// assert_eq!(split_segments("strlen"), ["strlen"]);
/// ```
pub fn split_segments(fqn: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = fqn;
    let mut offset = 0;

    while let Some((sep_start, sep_len)) = next_separator(rest) {
        let end = sep_start + sep_len;
        segments.push(&fqn[offset..offset + end]);
        offset += end;
        rest = &fqn[offset..];
    }
    if !rest.is_empty() {
        segments.push(rest);
    }
    segments
}

/// Position and byte length of the earliest separator in `s`, if any.
fn next_separator(s: &str) -> Option<(usize, usize)> {
    let candidates = [
        (s.find(NAMESPACE_SEPARATOR), NAMESPACE_SEPARATOR.len_utf8()),
        (s.find(STATIC_ACCESS), STATIC_ACCESS.len()),
        (s.find(INSTANCE_ACCESS), INSTANCE_ACCESS.len()),
    ];
    candidates
        .into_iter()
        .filter_map(|(pos, len)| pos.map(|p| (p, len)))
        .min_by_key(|&(pos, _)| pos)
}
