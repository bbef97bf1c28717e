use ridegraph::shared::fuzzy;

#[test]
fn fuzzy_empty_vs_empty() {
    let dist = fuzzy::distance("", "");
    assert_eq!(dist, 0);
}

#[test]
fn fuzzy_empty_vs_nonempty() {
    let dist = fuzzy::distance("", "abc");
    assert_eq!(dist, 3);
}

#[test]
fn fuzzy_nonempty_vs_empty() {
    let dist = fuzzy::distance("abc", "");
    assert_eq!(dist, 3);
}

#[test]
fn fuzzy_substitution() {
    let dist = fuzzy::distance("cat", "cut");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_insertion() {
    let dist = fuzzy::distance("cat", "cart");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_deletion() {
    let dist = fuzzy::distance("cart", "cat");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_unicode_distinct() {
    let dist = fuzzy::distance("café", "cafe");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_longer_sequence() {
    let dist = fuzzy::distance("intention", "execution");
    assert_eq!(dist, 5);
}

#[test]
fn score_prefers_closer_station_name() {
    let close = fuzzy::score("centrl station", "central station");
    let far = fuzzy::score("centrl station", "harbor view");
    assert!(close > far);
    assert!(close < 1.0);
}

#[test]
fn score_of_shorter_hay_counts_missing_tokens_as_zero() {
    assert_eq!(fuzzy::score("main st", "main"), 0.5);
}
