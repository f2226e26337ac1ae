//! Redis-style glob matching
//!
//! Supports `*`, `?`, character classes (`[abc]`, `[^a]`, `[a-z]`) and
//! backslash escapes, which is the subset `KEYS` and `SCAN MATCH` accept.

/// Check whether `text` matches the glob `pattern`
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0usize, 0usize);
    // Position of the last `*` and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, t));
            p += 1;
            continue;
        }

        if p < pattern.len() {
            if let Some(next) = match_one(&pattern, p, text[t]) {
                p = next;
                t += 1;
                continue;
            }
        }

        match backtrack {
            Some((star, absorbed)) => {
                backtrack = Some((star, absorbed + 1));
                p = star + 1;
                t = absorbed + 1;
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

/// Match one text character against the pattern element at `p`,
/// returning the index of the next pattern element
fn match_one(pattern: &[char], p: usize, c: char) -> Option<usize> {
    match pattern[p] {
        '?' => Some(p + 1),
        '\\' if p + 1 < pattern.len() => (pattern[p + 1] == c).then_some(p + 2),
        '[' => match match_class(pattern, p, c) {
            Some((true, next)) => Some(next),
            Some((false, _)) => None,
            // Unterminated class: treat `[` literally
            None => (c == '[').then_some(p + 1),
        },
        literal => (literal == c).then_some(p + 1),
    }
}

/// Evaluate the character class starting at `start` (the `[`)
///
/// Returns whether `c` is in the class and the index just past `]`, or
/// `None` if the class is not terminated.
fn match_class(pattern: &[char], start: usize, c: char) -> Option<(bool, usize)> {
    let mut i = start + 1;
    let negate = i < pattern.len() && pattern[i] == '^';
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < pattern.len() && pattern[i] != ']' {
        if pattern[i] == '\\' && i + 1 < pattern.len() {
            matched |= pattern[i + 1] == c;
            i += 2;
        } else if i + 2 < pattern.len() && pattern[i + 1] == '-' && pattern[i + 2] != ']' {
            let (low, high) = if pattern[i] <= pattern[i + 2] {
                (pattern[i], pattern[i + 2])
            } else {
                (pattern[i + 2], pattern[i])
            };
            matched |= low <= c && c <= high;
            i += 3;
        } else {
            matched |= pattern[i] == c;
            i += 1;
        }
    }

    if i >= pattern.len() {
        return None;
    }

    Some((matched != negate, i + 1))
}
