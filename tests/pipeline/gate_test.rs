//! Admission gate and required-names predicate.

use channel_tally::extractors::extract_scores;
use channel_tally::gate::{
    all_required_names_present, AdmissionGate, Rejection, DEFAULT_GATE_NAMES,
};

#[test]
fn default_gate_uses_both_identities() {
    let gate = AdmissionGate::default();
    assert_eq!(gate.names(), DEFAULT_GATE_NAMES);
}

#[test]
fn text_check_requires_both_literal_names() {
    let gate = AdmissionGate::default();
    assert!(gate.admits_text("Paul Biya: 1 Issa Tchiroma: 2"));
    assert!(!gate.admits_text("Paul Biya: 3"));
    assert!(!gate.admits_text("Issa Tchiroma: 3"));
}

#[test]
fn text_check_is_case_sensitive() {
    let gate = AdmissionGate::default();
    assert!(!gate.admits_text("PAUL BIYA: 1 Issa Tchiroma: 2"));
    assert!(!gate.admits_text("Paul Biya: 1 issa tchiroma: 2"));
}

#[test]
fn named_but_unscored_message_is_rejected() {
    let gate = AdmissionGate::default();
    let text = "Paul Biya: 12 et Issa Tchiroma n'a pas de score";
    let scores = extract_scores(text, &DEFAULT_GATE_NAMES);
    assert!(gate.admits_text(text));
    assert!(!gate.admits_scores(&scores));
    assert_eq!(gate.check(text, &scores), Err(Rejection::Unscored));
}

#[test]
fn non_ascii_score_leaves_message_unscored() {
    let gate = AdmissionGate::default();
    let text = "Paul Biya: \u{664}\u{660} Issa Tchiroma: 5";
    let scores = extract_scores(text, &DEFAULT_GATE_NAMES);
    assert_eq!(gate.check(text, &scores), Err(Rejection::Unscored));
}

#[test]
fn missing_name_is_reported_before_scores() {
    let gate = AdmissionGate::default();
    let text = "Paul Biya: 3";
    let scores = extract_scores(text, &DEFAULT_GATE_NAMES);
    assert_eq!(gate.check(text, &scores), Err(Rejection::MissingName));
}

#[test]
fn fully_scored_message_passes() {
    let gate = AdmissionGate::default();
    let text = "Issa Tchiroma: 50 Paul Biya: 50";
    let scores = extract_scores(text, &DEFAULT_GATE_NAMES);
    assert_eq!(gate.check(text, &scores), Ok(()));
}

#[test]
fn custom_gate_pair() {
    let gate = AdmissionGate::new("Alice", "Bob");
    assert!(gate.admits_text("Alice: 1, Bob: 2"));
    assert!(!gate.admits_text("Paul Biya: 1 Issa Tchiroma: 2"));
}

#[test]
fn required_names_all_present() {
    let required = ["Paul Biya", "Issa Tchiroma"];
    assert!(all_required_names_present(
        "Paul Biya: 1 / Issa Tchiroma: 2",
        &required
    ));
    assert!(!all_required_names_present("Paul Biya: 1", &required));
}

#[test]
fn required_names_are_literal() {
    assert!(!all_required_names_present("paul biya", &["Paul Biya"]));
}

#[test]
fn empty_required_list_is_vacuously_true() {
    let none: [&str; 0] = [];
    assert!(all_required_names_present("anything", &none));
    assert!(all_required_names_present("", &none));
}
