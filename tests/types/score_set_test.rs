//! Score set insertion order and rendering.

use channel_tally::types::{ChannelMessage, Score, ScoreSet};
use chrono::DateTime;

#[test]
fn later_insert_overwrites_in_place() {
    let mut set = ScoreSet::new();
    set.insert("Paul Biya", Score::from(5u64));
    set.insert("Issa Tchiroma", Score::from(3u64));
    set.insert("Paul Biya", Score::from(9u64));

    assert_eq!(set.len(), 2);
    assert_eq!(set.get("Paul Biya"), Some(&Score::from(9u64)));
    let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Paul Biya", "Issa Tchiroma"]);
}

#[test]
fn display_renders_a_mapping() {
    let set: ScoreSet = [
        ("Paul Biya", Score::from(40u64)),
        ("Issa Tchiroma", Score::from(35u64)),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.to_string(), "{Paul Biya: 40, Issa Tchiroma: 35}");
}

#[test]
fn empty_set_displays_braces() {
    let set = ScoreSet::new();
    assert!(set.is_empty());
    assert!(!set.contains("Paul Biya"));
    assert_eq!(set.to_string(), "{}");
}

#[test]
fn empty_text_counts_as_absent() {
    let ts = DateTime::from_timestamp(1_760_277_780, 0).expect("valid timestamp");
    assert_eq!(ChannelMessage::new(1, ts, "").text(), None);
    assert_eq!(ChannelMessage::without_text(2, ts).text(), None);
    assert_eq!(ChannelMessage::new(3, ts, "hi").text(), Some("hi"));
}
