// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipient-number canonicalisation and archive-basename sanitisation.

/// Strips everything but digits, for comparing recipient numbers across
/// jobs regardless of formatting (spaces, parens, country-code dashes).
pub fn normalize_number(num: &str) -> String {
    num.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Derives `<base>` (used in archive filenames) from a source filename:
/// trim, collapse whitespace runs to `_`, replace runs of characters
/// outside `[A-Za-z0-9._-]` with `_`, strip leading/trailing `._-`,
/// default to `fax` if the result is empty.
pub fn sanitize_basename(name: &str) -> String {
    let trimmed = name.trim();
    // Two independent collapsing passes, matching the source's two regex
    // substitutions: a run of underscores introduced by the first pass is
    // NOT merged with a run of disallowed characters collapsed by the
    // second (e.g. "a  !!b" -> "a__b", not "a_b").
    let whitespace_collapsed = collapse_runs(trimmed, char::is_whitespace, '_');
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-';
    let sanitized = collapse_runs(&whitespace_collapsed, |c| !allowed(c), '_');

    let stripped = sanitized.trim_matches(|c| c == '.' || c == '_' || c == '-');

    if stripped.is_empty() {
        "fax".to_string()
    } else {
        stripped.to_string()
    }
}

/// Replaces every maximal run of characters matching `matches` with a
/// single `replacement` character.
fn collapse_runs(s: &str, matches: impl Fn(char) -> bool, replacement: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if matches(c) {
            if !in_run {
                out.push(replacement);
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
