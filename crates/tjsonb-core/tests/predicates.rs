use tjsonb_core::{overlaps, parse, range_report, RangeReport, TimestampedDocument};
use tjsonb_canonical::structurally_matches;

fn doc(text: &str) -> TimestampedDocument {
    parse(text).unwrap()
}

#[test]
fn same_instant_and_content_overlap() {
    let a = doc(r#"2024-01-01 10:00:00+00|{"x": 1, "y": 2}"#);
    let b = doc(r#"2024-01-01 12:00:00+02|{"x": 1}"#);
    assert!(overlaps(&a, &b));
}

#[test]
fn different_instant_does_not_overlap() {
    let a = doc(r#"2024-01-01 10:00:00+00|{"x": 1}"#);
    let b = doc(r#"2024-01-01 10:00:01+00|{"x": 1}"#);
    assert!(!overlaps(&a, &b));
}

#[test]
fn mismatched_content_does_not_overlap() {
    let a = doc(r#"2024-01-01|{"x": 1}"#);
    let b = doc(r#"2024-01-01|{"x": "1"}"#);
    assert!(!overlaps(&a, &b));
}

#[test]
fn overlap_is_timestamp_equality_and_structural_match() {
    let docs = [
        doc(r#"2024-01-01|{"x": 1}"#),
        doc(r#"2024-01-01|{"x": 1, "y": [true]}"#),
        doc(r#"2024-01-02|{"x": 1}"#),
        doc("2024-01-01|[1, 2]"),
        doc("2024-01-02|null"),
    ];
    for a in &docs {
        for b in &docs {
            assert_eq!(
                overlaps(a, b),
                a.timestamp() == b.timestamp()
                    && structurally_matches(a.document(), b.document())
            );
        }
    }
}

#[test]
fn ordered_range_with_matching_content() {
    let start = doc(r#"2024-01-01|{"route": "A"}"#);
    let end = doc(r#"2024-01-05|{"route": "A"}"#);
    assert_eq!(range_report(&start, &end), RangeReport::OverlapFound);
    assert_eq!(range_report(&start, &start), RangeReport::OverlapFound);
    assert_eq!(range_report(&start, &end).to_string(), "Overlap found within range");
}

#[test]
fn reversed_range_reports_no_overlap() {
    let start = doc(r#"2024-01-05|{"route": "A"}"#);
    let end = doc(r#"2024-01-01|{"route": "A"}"#);
    assert_eq!(range_report(&start, &end), RangeReport::NoOverlap);
}

#[test]
fn range_with_different_content_reports_no_overlap() {
    let start = doc(r#"2024-01-01|{"route": "A"}"#);
    let end = doc(r#"2024-01-05|{"route": "B"}"#);
    assert_eq!(range_report(&start, &end).as_str(), "No overlap in specified range");
}
