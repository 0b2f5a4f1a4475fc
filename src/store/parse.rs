//! Postcard line parser
//!
//! Accepts exactly the shape
//!
//! ```text
//! date: YYYY-MM-DD; from: SENDER; to: RECEIVER; <free-form trailing text>
//! ```
//!
//! The trailing text may itself contain `;` and is never inspected.

use crate::store::error::{RecordError, StoreError, StoreResult};
use crate::store::types::Postcard;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse one line into a postcard
pub fn parse_line(line: &str) -> Result<Postcard, RecordError> {
    let parts: Vec<&str> = line.splitn(4, ';').collect();
    if parts.len() < 4 {
        return Err(RecordError::MissingFields {
            found: parts.len() - 1,
        });
    }

    let date = field_value(parts[0], "date")?;
    let sender = field_value(parts[1], "from")?;
    let receiver = field_value(parts[2], "to")?;

    Ok(Postcard::new(line, parse_date(date)?, sender, receiver))
}

/// Parse every line of `text`, stopping at the first bad one
///
/// Line numbers in errors are 1-based. A blank line is not a postcard and
/// fails like any other malformed line.
pub fn parse_text(text: &str) -> StoreResult<Vec<Postcard>> {
    let mut postcards = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let postcard = parse_line(line).map_err(|source| StoreError::Format {
            line: idx + 1,
            raw: line.to_string(),
            source,
        })?;
        postcards.push(postcard);
    }

    Ok(postcards)
}

fn field_value<'a>(field: &'a str, label: &'static str) -> Result<&'a str, RecordError> {
    let (found, value) = field
        .split_once(':')
        .ok_or(RecordError::MissingSeparator { field: label })?;

    let found = found.trim();
    if found != label {
        return Err(RecordError::UnexpectedLabel {
            expected: label,
            found: found.to_string(),
        });
    }

    Ok(value.trim())
}

/// Strict `YYYY-MM-DD`: chrono alone would also take `2019-5-1`
fn parse_date(value: &str) -> Result<NaiveDate, RecordError> {
    let invalid = || RecordError::InvalidDate {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let line = "date: 2019-05-01; from: Alice; to: Bob; Hello";
        let card = parse_line(line).unwrap();

        assert_eq!(card.raw(), line);
        assert_eq!(card.date(), NaiveDate::from_ymd_opt(2019, 5, 1).unwrap());
        assert_eq!(card.sender(), "Alice");
        assert_eq!(card.receiver(), "Bob");
    }

    #[test]
    fn test_values_are_trimmed() {
        let card = parse_line("date:2019-05-01 ;from:   Mary Ann ;  to:Bob  ;").unwrap();
        assert_eq!(card.sender(), "Mary Ann");
        assert_eq!(card.receiver(), "Bob");
    }

    #[test]
    fn test_trailing_text_may_contain_separators() {
        let line = "date: 2019-05-01; from: Alice; to: Bob; hi; see you at 10:30";
        let card = parse_line(line).unwrap();
        assert_eq!(card.raw(), line);
        assert_eq!(card.receiver(), "Bob");
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            parse_line("date: 2019-05-01; from: Alice; to: Bob"),
            Err(RecordError::MissingFields { found: 2 })
        );
        assert_eq!(
            parse_line("hello"),
            Err(RecordError::MissingFields { found: 0 })
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse_line("date: 2019-05-01; from Alice; to: Bob;"),
            Err(RecordError::MissingSeparator { field: "from" })
        );
    }

    #[test]
    fn test_unexpected_label() {
        assert_eq!(
            parse_line("date: 2019-05-01; to: Bob; from: Alice;"),
            Err(RecordError::UnexpectedLabel {
                expected: "from",
                found: "to".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_names_are_accepted() {
        let card = parse_line("date: 2019-05-01; from: ; to:   ;").unwrap();
        assert_eq!(card.sender(), "");
        assert_eq!(card.receiver(), "");
    }

    #[test]
    fn test_empty_date_is_invalid() {
        assert_eq!(
            parse_line("date: ; from: A; to: B;"),
            Err(RecordError::InvalidDate {
                value: String::new()
            })
        );
    }

    #[test]
    fn test_invalid_dates() {
        for bad in ["2019-02-30", "2019-13-01", "2019-5-1", "19-05-01", "2019/05/01", "yesterday"] {
            let line = format!("date: {}; from: A; to: B;", bad);
            assert_eq!(
                parse_line(&line),
                Err(RecordError::InvalidDate {
                    value: bad.to_string()
                }),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_leap_day_accepted() {
        let card = parse_line("date: 2020-02-29; from: A; to: B;").unwrap();
        assert_eq!(card.date(), NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_text_rejects_blank_lines() {
        let text = "date: 2019-05-01; from: A; to: B; one\n\ndate: 2019-05-02; from: B; to: A; two\n";
        let err = parse_text(text).unwrap_err();
        assert_eq!(err.line(), Some(2));

        let text = "date: 2019-05-01; from: A; to: B; one\n   \n";
        assert_eq!(parse_text(text).unwrap_err().line(), Some(2));
    }

    #[test]
    fn test_parse_text_allows_final_newline() {
        let cards = parse_text("date: 2019-05-01; from: A; to: B; one\n").unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_parse_text_strips_crlf() {
        let cards = parse_text("date: 2019-05-01; from: A; to: B; x\r\n").unwrap();
        assert_eq!(cards[0].raw(), "date: 2019-05-01; from: A; to: B; x");
    }

    #[test]
    fn test_parse_text_reports_line_number() {
        let text = "date: 2019-05-01; from: A; to: B;\ndate: 2019-05-02; from: A; to: B;\nnot a postcard\n";
        let err = parse_text(text).unwrap_err();

        match err {
            StoreError::Format { line, raw, source } => {
                assert_eq!(line, 3);
                assert_eq!(raw, "not a postcard");
                assert_eq!(source, RecordError::MissingFields { found: 0 });
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
