use std::cmp;

/// Levenshtein distance counted in chars, kept to two rows.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = vec![0; b.len() + 1];
    for (i, ac) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ac != bc);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            current[j + 1] = cmp::min(substitution, cmp::min(insertion, deletion));
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Token-wise similarity in `0.0..=1.0`, averaged over the needle's tokens.
pub fn score(needle: &str, hay: &str) -> f64 {
    let needle_tokens: Vec<_> = needle.split_whitespace().collect();
    if needle_tokens.is_empty() {
        return 0.0;
    }
    let total: f64 = needle_tokens
        .iter()
        .zip(hay.split_whitespace())
        .map(|(needle, hay)| similarity(needle, hay))
        .sum();
    total / needle_tokens.len() as f64
}

fn similarity(a: &str, b: &str) -> f64 {
    let longest = cmp::max(a.chars().count(), b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - distance(a, b) as f64 / longest as f64
}

#[test]
fn score_exact_is_one() {
    assert_eq!(score("main st", "main st"), 1.0);
}

#[test]
fn score_typo_beats_unrelated() {
    assert!(score("mian st", "main st") > score("mian st", "harbor view"));
}

#[test]
fn score_empty_needle() {
    assert_eq!(score("", "main st"), 0.0);
}
