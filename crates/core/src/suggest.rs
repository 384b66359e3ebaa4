//! Edit-distance suggestions and prefix completion over command names.

/// Levenshtein distance between two strings, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = if ca == *cb { 0 } else { 1 };
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Nearest name to `token`; the earliest name wins a tie
pub fn closest<'a, I>(token: &str, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;
    for name in names {
        let distance = levenshtein(token, name);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((name, distance));
        }
    }
    best.map(|(name, _)| name)
}

/// Names starting with `prefix`, in the order given
pub fn prefix_matches<'a, I>(prefix: &str, names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().filter(|name| name.starts_with(prefix)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("ech", "echo"), 1);
        assert_eq!(levenshtein("héllo", "hello"), 1);
    }

    #[test]
    fn test_levenshtein_is_symmetric() {
        for (a, b) in [("help", "hlep"), ("globe", "glob"), ("skills", "kills")] {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_closest_finds_minimum() {
        assert_eq!(closest("ech", registry::names()), Some("echo"));
        assert_eq!(closest("projcts", registry::names()), Some("projects"));
        assert_eq!(closest("wohami", registry::names()), Some("whoami"));
    }

    #[test]
    fn test_closest_is_minimal_for_every_name() {
        for token in ["x", "abut", "sudoo", "fastfech", "exitt", "zzzzzz"] {
            let best = closest(token, registry::names()).unwrap();
            let d = levenshtein(token, best);
            assert!(registry::names().all(|n| levenshtein(token, n) >= d));
        }
    }

    #[test]
    fn test_closest_tie_prefers_first() {
        assert_eq!(closest("ab", ["ax", "xb"]), Some("ax"));
        assert_eq!(closest("ab", ["xb", "ax"]), Some("xb"));
    }

    #[test]
    fn test_closest_empty_names() {
        assert_eq!(closest("help", std::iter::empty()), None);
    }

    #[test]
    fn test_prefix_matches() {
        assert_eq!(prefix_matches("e", registry::names()), vec!["experience", "education", "exit", "echo"]);
        assert_eq!(prefix_matches("fa", registry::names()), vec!["fastfetch"]);
        assert!(prefix_matches("q", registry::names()).is_empty());
    }
}
