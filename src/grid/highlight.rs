//! On-demand classification and diff highlighting.
//!
//! The pass is pure: it reads the record sequence and produces per-row
//! display state (verdict plus styled segment lists) without touching the
//! stored texts or classification tags, so it can be re-run any number of
//! times with identical results.

use super::normalize::{normalize, normalize_token};
use super::types::{Classification, ComparisonRecord};
use std::collections::HashSet;

/// Display verdict of a classified row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Subtle,
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    /// Word present on the expected side but absent from the actual side.
    Missing,
    /// Word present on the actual side but absent from the expected side.
    Extra,
    /// Zero-width first-difference marker. Carries no text; the renderer
    /// supplies the glyph, so visible-character offsets stay untouched.
    Marker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.to_string(),
        }
    }

    fn marker() -> Self {
        Self {
            kind: SegmentKind::Marker,
            text: String::new(),
        }
    }
}

/// Display state of one classified row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplay {
    pub verdict: Verdict,
    pub expected: Vec<Segment>,
    pub actual: Vec<Segment>,
}

/// Classify every record. Rows tagged `Blank` or holding the blank marker
/// on either side are skipped and yield `None`.
pub fn classify(records: &[ComparisonRecord]) -> Vec<Option<RowDisplay>> {
    records.iter().map(classify_record).collect()
}

fn classify_record(record: &ComparisonRecord) -> Option<RowDisplay> {
    if record.classification == Classification::Blank || record.is_placeholder() {
        return None;
    }

    let verdict = match record.classification {
        Classification::None => Verdict::Match,
        Classification::Sutil => Verdict::Subtle,
        // major, edited and anything the payload mislabeled
        _ => Verdict::Mismatch,
    };

    if verdict == Verdict::Match {
        // Exact matches keep their text untouched, only the verdict shows.
        return Some(RowDisplay {
            verdict,
            expected: vec![Segment::plain(&record.expected)],
            actual: vec![Segment::plain(&record.actual)],
        });
    }

    let (mut expected, mut actual) = word_diff(&record.expected, &record.actual);
    if let Some(offset) = first_divergence(record.expected.trim(), record.actual.trim()) {
        // The offset was computed on trimmed texts but the cells render the
        // original ones, so shift by each side's leading whitespace.
        insert_marker(&mut expected, offset + leading_whitespace(&record.expected));
        insert_marker(&mut actual, offset + leading_whitespace(&record.actual));
    }

    Some(RowDisplay {
        verdict,
        expected,
        actual,
    })
}

/// Word-level markup for a differing pair.
///
/// The word sets come from the normalized whole strings, so an ordinal
/// prefix like "1. " never counts as a missing word. The original texts are
/// then re-walked token by token, highlighting tokens whose normalized form
/// is in the missing/extra set and leaving everything else plain.
pub fn word_diff(expected: &str, actual: &str) -> (Vec<Segment>, Vec<Segment>) {
    let expected_words = word_set(expected);
    let actual_words = word_set(actual);
    let missing = &expected_words - &actual_words;
    let extra = &actual_words - &expected_words;
    (
        mark_tokens(expected, &missing, SegmentKind::Missing),
        mark_tokens(actual, &extra, SegmentKind::Extra),
    )
}

fn word_set(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn mark_tokens(text: &str, highlighted: &HashSet<String>, kind: SegmentKind) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut push = |segments: &mut Vec<Segment>, kind: SegmentKind, piece: &str| {
        if piece.is_empty() {
            return;
        }
        if let Some(last) = segments.last_mut()
            && last.kind == kind
        {
            last.text.push_str(piece);
        } else {
            segments.push(Segment {
                kind,
                text: piece.to_string(),
            });
        }
    };

    for (is_word, piece) in split_runs(text) {
        let piece_kind = if is_word {
            let key = normalize_token(piece);
            if !key.is_empty() && highlighted.contains(&key) {
                kind
            } else {
                SegmentKind::Plain
            }
        } else {
            SegmentKind::Plain
        };
        push(&mut segments, piece_kind, piece);
    }

    segments
}

/// Split into alternating whitespace/word runs, preserving every character.
fn split_runs(text: &str) -> impl Iterator<Item = (bool, &str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let is_word = !rest.chars().next().is_some_and(char::is_whitespace);
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() == is_word)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (piece, tail) = rest.split_at(end);
        rest = tail;
        Some((is_word, piece))
    })
}

/// Char index at which two texts first diverge. If one is a strict prefix
/// of the other this is the length of the shorter; equal texts yield `None`.
pub fn first_divergence(a: &str, b: &str) -> Option<usize> {
    let mut index = 0;
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    loop {
        match (a_chars.next(), b_chars.next()) {
            (Some(x), Some(y)) if x == y => index += 1,
            (None, None) => return None,
            _ => return Some(index),
        }
    }
}

/// Insert a zero-width marker segment at a visible-character offset.
///
/// Works against the structured segment list, so it can split a segment but
/// never corrupt its text; an offset beyond the rendered length appends the
/// marker at the end.
pub fn insert_marker(segments: &mut Vec<Segment>, offset: usize) {
    let mut remaining = offset;
    for i in 0..segments.len() {
        let len = segments[i].text.chars().count();
        if remaining <= len && segments[i].kind != SegmentKind::Marker {
            if remaining == 0 {
                segments.insert(i, Segment::marker());
            } else if remaining == len {
                segments.insert(i + 1, Segment::marker());
            } else {
                let at = segments[i]
                    .text
                    .char_indices()
                    .nth(remaining)
                    .map(|(b, _)| b)
                    .unwrap_or(segments[i].text.len());
                let tail = segments[i].text.split_off(at);
                let kind = segments[i].kind;
                segments.insert(i + 1, Segment::marker());
                segments.insert(i + 2, Segment { kind, text: tail });
            }
            return;
        }
        remaining -= len;
    }
    segments.push(Segment::marker());
}

fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::BLANK_MARKER;

    fn record(expected: &str, actual: &str, classification: Classification) -> ComparisonRecord {
        ComparisonRecord {
            expected: expected.to_string(),
            actual: actual.to_string(),
            classification,
        }
    }

    fn visible_text(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn highlighted_words(segments: &[Segment], kind: SegmentKind) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn word_diff_scenario() {
        let (expected, actual) = word_diff("1. El perro corre", "el perro camina");

        assert_eq!(highlighted_words(&expected, SegmentKind::Missing), ["corre"]);
        assert_eq!(highlighted_words(&actual, SegmentKind::Extra), ["camina"]);
        // original casing and the ordinal prefix stay plain and intact
        assert_eq!(visible_text(&expected), "1. El perro corre");
        assert_eq!(visible_text(&actual), "el perro camina");
        assert!(
            expected
                .iter()
                .any(|s| s.kind == SegmentKind::Plain && s.text.contains("El perro"))
        );
    }

    #[test]
    fn match_rows_keep_text_untouched() {
        let rows = classify(&[record("Igual", "Igual", Classification::None)]);
        let display = rows[0].as_ref().unwrap();

        assert_eq!(display.verdict, Verdict::Match);
        assert_eq!(display.expected, vec![Segment::plain("Igual")]);
        assert_eq!(display.actual, vec![Segment::plain("Igual")]);
    }

    #[test]
    fn blank_rows_are_skipped_regardless_of_tag() {
        let rows = classify(&[
            record(BLANK_MARKER, "Texto real", Classification::Major),
            record("A", "B", Classification::Blank),
        ]);
        assert!(rows[0].is_none());
        assert!(rows[1].is_none());
    }

    #[test]
    fn classification_pass_is_idempotent() {
        let records = [
            record("1. El perro corre", "el perro camina", Classification::Sutil),
            record("Igual", "Igual", Classification::None),
            record("Uno", "Dos", Classification::Major),
        ];
        assert_eq!(classify(&records), classify(&records));
    }

    #[test]
    fn edited_and_unknown_rows_get_mismatch_treatment() {
        let rows = classify(&[record("Uno", "Dos", Classification::Edited)]);
        assert_eq!(rows[0].as_ref().unwrap().verdict, Verdict::Mismatch);
    }

    #[test]
    fn first_divergence_cases() {
        assert_eq!(first_divergence("abc", "abd"), Some(2));
        assert_eq!(first_divergence("abc", "abc"), None);
        // strict prefix: length of the shorter
        assert_eq!(first_divergence("ab", "abcd"), Some(2));
        assert_eq!(first_divergence("", "x"), Some(0));
    }

    #[test]
    fn marker_lands_at_visible_offset() {
        let records = [record("abcdef", "abcxef", Classification::Major)];
        let rows = classify(&records);
        let display = rows[0].as_ref().unwrap();

        let mut seen = 0;
        let mut marker_at = None;
        for segment in &display.expected {
            if segment.kind == SegmentKind::Marker {
                marker_at = Some(seen);
                break;
            }
            seen += segment.text.chars().count();
        }
        assert_eq!(marker_at, Some(3));
        assert_eq!(visible_text(&display.expected), "abcdef");
    }

    #[test]
    fn marker_insertion_splits_without_corruption() {
        let mut segments = vec![Segment::plain("hola "), Segment::plain("mundo")];
        insert_marker(&mut segments, 7);
        assert_eq!(visible_text(&segments), "hola mundo");
        assert_eq!(segments[2].kind, SegmentKind::Marker);
        assert_eq!(segments[1].text, "mu");
        assert_eq!(segments[3].text, "ndo");
    }

    #[test]
    fn marker_beyond_length_appends() {
        let mut segments = vec![Segment::plain("corto")];
        insert_marker(&mut segments, 99);
        assert_eq!(segments.last().unwrap().kind, SegmentKind::Marker);
        assert_eq!(visible_text(&segments), "corto");
    }
}
