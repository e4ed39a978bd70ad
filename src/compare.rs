//! Positional comparison of expected vs. actual question lists.
//!
//! Produces the grid's record payload: actual questions are ordered by
//! their platform `order` field and paired positionally with the expected
//! titles. Each pair gets a severity tag: `none` for a literal match,
//! `sutil` when only the normalized forms agree, `major` otherwise. For
//! differing pairs an inline `<ins>`/`<del>` review markup is generated for
//! the exported report; every user-supplied string is HTML-escaped there.

use crate::grid::RawRecord;
use crate::grid::normalize::normalize;
use serde::Deserialize;
use similar::{ChangeTag, TextDiff};

/// One question as returned by the platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<f64>,
}

/// Accept any JSON type for `order`. The platform occasionally sends it as
/// a string; anything non-numeric counts as "no order" instead of failing
/// the whole payload.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Alternate payload shape: the two raw question lists, before comparison.
#[derive(Debug, Deserialize)]
pub struct PairedPayload {
    pub preguntas_esperadas: Vec<String>,
    pub preguntas_actuales: Vec<QuestionEntry>,
}

/// Compare the two lists positionally and emit one record per position, up
/// to the longer list's length; the absent side renders as empty text.
pub fn build_records(expected: &[String], actual: &[QuestionEntry]) -> Vec<RawRecord> {
    let mut ordered: Vec<&QuestionEntry> = actual.iter().collect();
    // entries without a valid order go last, ties keep payload order
    ordered.sort_by(|a, b| {
        a.order
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.order.unwrap_or(f64::INFINITY))
    });
    let actual_titles: Vec<&str> = ordered
        .iter()
        .map(|q| q.name.as_deref().unwrap_or(""))
        .collect();

    let max_len = expected.len().max(actual_titles.len());
    let mut records = Vec::with_capacity(max_len);
    for i in 0..max_len {
        let exp = expected.get(i).map(String::as_str).unwrap_or("");
        let act = actual_titles.get(i).copied().unwrap_or("");

        let diff_type = if exp == act {
            "none"
        } else if !exp.is_empty() && !act.is_empty() && normalize(exp) == normalize(act) {
            "sutil"
        } else {
            "major"
        };

        records.push(RawRecord {
            expected: Some(exp.to_string()),
            actual: Some(act.to_string()),
            diff_type: Some(diff_type.to_string()),
            diff_html: (diff_type != "none").then(|| diff_html(exp, act)),
        });
    }
    records
}

/// Inline review markup for a differing pair: unchanged characters render
/// plain, removals inside `<del>`, insertions inside `<ins>`. All user text
/// passes through [`escape_html`].
pub fn diff_html(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_chars(expected, actual);
    let mut html = String::new();
    let mut run_tag: Option<ChangeTag> = None;
    let mut run = String::new();

    let mut flush = |html: &mut String, tag: Option<ChangeTag>, run: &mut String| {
        if run.is_empty() {
            return;
        }
        match tag {
            Some(ChangeTag::Delete) => {
                html.push_str("<del>");
                html.push_str(run);
                html.push_str("</del>");
            }
            Some(ChangeTag::Insert) => {
                html.push_str("<ins>");
                html.push_str(run);
                html.push_str("</ins>");
            }
            _ => html.push_str(run),
        }
        run.clear();
    };

    for change in diff.iter_all_changes() {
        if run_tag != Some(change.tag()) {
            flush(&mut html, run_tag, &mut run);
            run_tag = Some(change.tag());
        }
        run.push_str(&escape_html(change.value()));
    }
    flush(&mut html, run_tag, &mut run);
    html
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(name: &str, order: Option<f64>) -> QuestionEntry {
        QuestionEntry {
            name: Some(name.to_string()),
            order,
        }
    }

    #[test]
    fn orders_actual_questions_before_pairing() {
        let expected = vec!["Primera".to_string(), "Segunda".to_string()];
        let actual = vec![
            question("Segunda", Some(2.0)),
            question("Primera", Some(1.0)),
        ];
        let records = build_records(&expected, &actual);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].actual.as_deref(), Some("Primera"));
        assert_eq!(records[0].diff_type.as_deref(), Some("none"));
        assert_eq!(records[1].diff_type.as_deref(), Some("none"));
    }

    #[test]
    fn entries_without_order_go_last() {
        let expected = vec!["A".to_string(), "B".to_string()];
        let actual = vec![question("B", None), question("A", Some(1.0))];
        let records = build_records(&expected, &actual);

        assert_eq!(records[0].actual.as_deref(), Some("A"));
        assert_eq!(records[1].actual.as_deref(), Some("B"));
    }

    #[test]
    fn non_numeric_order_is_tolerated() {
        let raw = r#"{
            "preguntas_esperadas": ["A", "B"],
            "preguntas_actuales": [
                {"name": "B", "order": "2"},
                {"name": "A", "order": 1}
            ]
        }"#;
        let paired: PairedPayload = serde_json::from_str(raw).unwrap();
        assert!(paired.preguntas_actuales[0].order.is_none());

        // the string-ordered entry sorts last instead of sinking the payload
        let records = build_records(&paired.preguntas_esperadas, &paired.preguntas_actuales);
        assert_eq!(records[0].actual.as_deref(), Some("A"));
        assert_eq!(records[1].actual.as_deref(), Some("B"));
    }

    #[test]
    fn equal_empty_titles_match_literally() {
        let records = build_records(&["".to_string()], &[question("", Some(1.0))]);
        assert_eq!(records[0].diff_type.as_deref(), Some("none"));
        assert!(records[0].diff_html.is_none());
    }

    #[test]
    fn diff_type_assignment() {
        let expected = vec![
            "1. El perro corre".to_string(),
            "Igual".to_string(),
            "Solo esperada".to_string(),
        ];
        let actual = vec![
            question("1. EL PERRO CORRE", Some(1.0)),
            question("Igual", Some(2.0)),
        ];
        let records = build_records(&expected, &actual);

        assert_eq!(records[0].diff_type.as_deref(), Some("sutil"));
        assert_eq!(records[1].diff_type.as_deref(), Some("none"));
        assert!(records[1].diff_html.is_none());
        // unpaired tail position: empty actual, major
        assert_eq!(records[2].actual.as_deref(), Some(""));
        assert_eq!(records[2].diff_type.as_deref(), Some("major"));
    }

    #[test]
    fn diff_html_marks_changed_runs() {
        let html = diff_html("hola cat", "hola dog");
        assert_eq!(html, "hola <del>cat</del><ins>dog</ins>");
    }

    #[test]
    fn diff_html_escapes_user_text() {
        let html = diff_html("<script>", "<b>&x</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;"));
        // outside the markup we emit, no raw angle brackets survive
        let stripped = html
            .replace("<del>", "")
            .replace("</del>", "")
            .replace("<ins>", "")
            .replace("</ins>", "");
        assert!(!stripped.contains('<') && !stripped.contains('>'));
    }

    #[test]
    fn escape_html_covers_the_usual_suspects() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}
