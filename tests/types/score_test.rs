//! Unbounded score arithmetic and ordering.

use channel_tally::types::Score;

#[test]
fn parses_plain_digits() {
    let score = Score::from_digits("42").expect("digits parse");
    assert_eq!(score.to_u64(), Some(42));
    assert_eq!(score.to_string(), "42");
}

#[test]
fn rejects_empty_and_non_digit_input() {
    assert!(Score::from_digits("").is_none());
    assert!(Score::from_digits("12a").is_none());
    assert!(Score::from_digits("-3").is_none());
}

#[test]
fn zero_is_default() {
    assert!(Score::default().is_zero());
    assert_eq!(Score::default(), Score::from(0u64));
}

#[test]
fn sums_beyond_u64_exactly() {
    let max = Score::from(u64::MAX);
    let sum = max.plus(&Score::from(1u64));
    assert_eq!(sum.to_string(), "18446744073709551616");
    assert_eq!(sum.to_u64(), None);
}

#[test]
fn huge_digit_runs_round_trip() {
    let digits = "123456789012345678901234567890123456789";
    let score = Score::from_digits(digits).expect("long digits parse");
    assert_eq!(score.to_string(), digits);
    let doubled = score.plus(&score);
    assert_eq!(doubled.to_string(), "246913578024691357802469135780246913578");
}

#[test]
fn accumulate_adds_in_place() {
    let mut total = Score::zero();
    total.accumulate(&Score::from(4u64));
    total.accumulate(&Score::from(6u64));
    assert_eq!(total, Score::from(10u64));
}

#[test]
fn ordering_is_numeric_not_lexicographic() {
    assert!(Score::from(9u64) < Score::from(10u64));
    assert!(Score::from(100u64) > Score::from(99u64));
    assert_eq!(
        Score::from_digits("0010").expect("parse").cmp(&Score::from(10u64)),
        std::cmp::Ordering::Equal
    );
}
