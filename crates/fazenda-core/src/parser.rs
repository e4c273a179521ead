//! Plain and masked number parsing.
//!
//! A document number arrives either as bare digits (`15561223224`) or with
//! its mask (`155.612.232-24`). Both forms are described by a [`Schema`]:
//! the digit-group lengths (`steps`) and the separator placed after every
//! group but the last.

use serde::Serialize;
use tracing::trace;

use crate::error::ParseError;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Shape of a document number.
///
/// `steps` must sum to `number_length` and there is exactly one separator
/// between consecutive steps. The last step holds the check digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Total digit count.
    pub number_length: usize,
    /// Number of trailing check digits.
    pub check_digits_count: usize,
    /// Check digit weights, longest prefix first.
    pub weights: &'static [u32],
    /// Separators in mask order.
    pub separators: &'static [char],
    /// Digit-group lengths in mask order.
    pub steps: &'static [usize],
}

impl Schema {
    /// Digits before the check digits.
    pub const fn body_length(&self) -> usize {
        self.number_length - self.check_digits_count
    }

    /// Character count of the masked form.
    pub const fn masked_length(&self) -> usize {
        self.number_length + self.separators.len()
    }

    /// Whether the step and separator tables agree with the declared lengths.
    pub fn is_consistent(&self) -> bool {
        self.steps.iter().sum::<usize>() == self.number_length
            && self.separators.len() + 1 == self.steps.len()
            && self.steps.last() == Some(&self.check_digits_count)
            && self.weights.len() >= self.body_length() + self.check_digits_count - 1
    }
}

/// Which textual form an input was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputForm {
    /// Digits only.
    Plain,
    /// Digits with separators.
    Masked,
}

/// Normalized view of a parsed number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedRecord {
    plain_number: String,
    masked_number: String,
    check_digits: Vec<u8>,
    parts: Vec<String>,
}

impl ParsedRecord {
    /// Digits only.
    pub fn plain_number(&self) -> &str {
        &self.plain_number
    }

    /// Digits with the schema separators.
    pub fn masked_number(&self) -> &str {
        &self.masked_number
    }

    /// Trailing check digits, most significant first.
    pub fn check_digits(&self) -> &[u8] {
        &self.check_digits
    }

    /// Digit groups as they appear in the masked form.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The plain number without its check digits.
    pub fn body(&self) -> &str {
        let end = self.plain_number.len() - self.check_digits.len();
        &self.plain_number[..end]
    }
}

/// Decide the input form from its character count alone.
pub fn detect_form(input: &str, schema: &Schema) -> Option<InputForm> {
    let count = input.chars().count();
    if count == schema.number_length {
        Some(InputForm::Plain)
    } else if count == schema.masked_length() {
        Some(InputForm::Masked)
    } else {
        None
    }
}

/// Parse `input` against `schema`.
///
/// Accepts exactly the plain or the masked form; anything else, including
/// partially masked input, is [`ParseError::InvalidFormat`].
pub fn parse(input: &str, schema: &Schema) -> Result<ParsedRecord> {
    let form = detect_form(input, schema).ok_or(ParseError::InvalidFormat)?;
    trace!("Parsing {:?} as {:?} form", input, form);

    match form {
        InputForm::Plain => parse_plain(input, schema),
        InputForm::Masked => parse_masked(input, schema),
    }
}

fn parse_plain(input: &str, schema: &Schema) -> Result<ParsedRecord> {
    if !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat);
    }

    let check_digits = extract_check_digits(input, schema.check_digits_count)?;
    Ok(assemble_plain(input.to_string(), check_digits, schema))
}

fn parse_masked(input: &str, schema: &Schema) -> Result<ParsedRecord> {
    let mut chars = input.chars();
    let mut plain_number = String::with_capacity(schema.number_length);
    let mut parts = Vec::with_capacity(schema.steps.len());

    for (i, &step) in schema.steps.iter().enumerate() {
        let part: String = chars.by_ref().take(step).collect();
        if part.len() != step || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat);
        }
        plain_number.push_str(&part);
        parts.push(part);

        if let Some(&separator) = schema.separators.get(i) {
            if chars.next() != Some(separator) {
                return Err(ParseError::InvalidFormat);
            }
        }
    }

    if chars.next().is_some() {
        return Err(ParseError::InvalidFormat);
    }

    let check_digits = extract_check_digits(&plain_number, schema.check_digits_count)?;

    Ok(ParsedRecord {
        plain_number,
        masked_number: input.to_string(),
        check_digits,
        parts,
    })
}

/// Build a record from digits already known to match `schema`.
///
/// Used by the plain-form path and by the generator, which derives the
/// check digits itself.
pub(crate) fn assemble_plain(plain_number: String, check_digits: Vec<u8>, schema: &Schema) -> ParsedRecord {
    debug_assert_eq!(plain_number.len(), schema.number_length);

    let mut digits = plain_number.chars();
    let mut masked_number = String::with_capacity(schema.masked_length());
    let mut parts = Vec::with_capacity(schema.steps.len());

    for (i, &step) in schema.steps.iter().enumerate() {
        let part: String = digits.by_ref().take(step).collect();
        masked_number.push_str(&part);
        if let Some(&separator) = schema.separators.get(i) {
            masked_number.push(separator);
        }
        parts.push(part);
    }

    ParsedRecord {
        plain_number,
        masked_number,
        check_digits,
        parts,
    }
}

fn extract_check_digits(plain_number: &str, count: usize) -> Result<Vec<u8>> {
    let start = plain_number
        .len()
        .checked_sub(count)
        .ok_or(ParseError::InvalidFormat)?;

    plain_number
        .get(start..)
        .ok_or(ParseError::InvalidFormat)?
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or(ParseError::InvalidFormat)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PHONE: Schema = Schema {
        number_length: 10,
        check_digits_count: 2,
        weights: &[9, 8, 7, 6, 5, 4, 3, 2, 1],
        separators: &[' ', '-', '/'],
        steps: &[2, 4, 2, 2],
    };

    const CPF_LIKE: Schema = Schema {
        number_length: 11,
        check_digits_count: 2,
        weights: &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2],
        separators: &['.', '.', '-'],
        steps: &[3, 3, 3, 2],
    };

    #[test]
    fn test_plain_input_builds_mask() {
        let record = parse("15561223224", &CPF_LIKE).unwrap();
        assert_eq!(record.plain_number(), "15561223224");
        assert_eq!(record.masked_number(), "155.612.232-24");
        assert_eq!(record.check_digits(), &[2, 4]);
        assert_eq!(record.parts(), &["155", "612", "232", "24"]);
        assert_eq!(record.body(), "155612232");
    }

    #[test]
    fn test_masked_input_builds_plain() {
        let record = parse("125.609.581-80", &CPF_LIKE).unwrap();
        assert_eq!(record.plain_number(), "12560958180");
        assert_eq!(record.masked_number(), "125.609.581-80");
        assert_eq!(record.check_digits(), &[8, 0]);
    }

    #[test]
    fn test_both_forms_give_equal_records() {
        let plain = parse("12560958180", &CPF_LIKE).unwrap();
        let masked = parse("125.609.581-80", &CPF_LIKE).unwrap();
        assert_eq!(plain, masked);
    }

    #[test]
    fn test_custom_schema() {
        let record = parse("12 3456-78/90", &PHONE).unwrap();
        assert_eq!(record.plain_number(), "1234567890");
        assert_eq!(record.parts(), &["12", "3456", "78", "90"]);

        let record = parse("1234567890", &PHONE).unwrap();
        assert_eq!(record.masked_number(), "12 3456-78/90");
    }

    #[test]
    fn test_detect_form() {
        assert_eq!(detect_form("15561223224", &CPF_LIKE), Some(InputForm::Plain));
        assert_eq!(detect_form("155.612.232-24", &CPF_LIKE), Some(InputForm::Masked));
        assert_eq!(detect_form("", &CPF_LIKE), None);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(parse("", &CPF_LIKE), Err(ParseError::InvalidFormat));
        assert_eq!(parse("7715350466", &CPF_LIKE), Err(ParseError::InvalidFormat));
        assert_eq!(parse("155.612.232-245", &CPF_LIKE), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert_eq!(parse("1556122322A", &CPF_LIKE), Err(ParseError::InvalidFormat));
        assert_eq!(parse("155.6x2.232-24", &CPF_LIKE), Err(ParseError::InvalidFormat));
        // Eleven characters, one of them multibyte.
        assert_eq!(parse("1556122322é", &CPF_LIKE), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_rejects_bad_separators() {
        assert_eq!(parse("155-612-232-24", &CPF_LIKE), Err(ParseError::InvalidFormat));
        assert_eq!(parse("155.612.232-2-", &CPF_LIKE), Err(ParseError::InvalidFormat));
        assert_eq!(parse("1556.12.232-24", &CPF_LIKE), Err(ParseError::InvalidFormat));
        assert_eq!(parse("155.612.23224.", &CPF_LIKE), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_schema_consistency() {
        assert!(CPF_LIKE.is_consistent());
        assert!(PHONE.is_consistent());
        assert_eq!(CPF_LIKE.body_length(), 9);
        assert_eq!(CPF_LIKE.masked_length(), 14);
    }
}
