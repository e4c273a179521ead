//! Modulo-11 check digit derivation and validation.

use serde::{Deserialize, Serialize};

use crate::parser::ParsedRecord;

const MODULO: u32 = 11;

/// Weight-sum callback used by the weighted-sum algorithm.
pub type WeightSumFn = fn(&str) -> u32;

/// Check digit algorithm.
#[derive(Debug, Clone, Copy)]
pub enum Algorithm {
    /// Positional double pass with weights derived from the body length.
    Simple,
    /// Repeated weighted sum with a document-specific weight table.
    WeightedSum(WeightSumFn),
}

/// Serializable algorithm selector, resolved per document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// See [`Algorithm::Simple`].
    Simple,
    /// See [`Algorithm::WeightedSum`].
    #[default]
    WeightedSum,
}

/// Validate the check digits of `record`.
///
/// Numbers made of a single repeated digit are rejected unless
/// `all_same_digits_are_valid` is set, even when their arithmetic works out.
pub fn validate(record: &ParsedRecord, algorithm: Algorithm, all_same_digits_are_valid: bool) -> bool {
    if !all_same_digits_are_valid && has_all_same_digits(record.plain_number()) {
        return false;
    }

    match algorithm {
        Algorithm::Simple => validate_simple(record),
        Algorithm::WeightedSum(weight_sum) => validate_weighted_sum(record, weight_sum),
    }
}

/// Whether every character of `number` is the same.
pub fn has_all_same_digits(number: &str) -> bool {
    let mut chars = number.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

fn validate_simple(record: &ParsedRecord) -> bool {
    let body = record.body();
    let body_length = body.len() as u32;

    // Digit at position i (from the left) weighs i + 1 for the first check
    // digit and i for the second.
    let (mut v1, mut v2) = (0, 0);
    for (i, digit) in digits(body).enumerate() {
        let i = i as u32;
        v1 += digit * (i + 1);
        v2 += digit * i;
    }

    v1 = v1 % MODULO % (MODULO - 1);
    v2 = (v2 + v1 * body_length) % MODULO % (MODULO - 1);

    record.check_digits() == [v1 as u8, v2 as u8]
}

fn validate_weighted_sum(record: &ParsedRecord, weight_sum: WeightSumFn) -> bool {
    let expected = expected_check_digits(record.body(), record.check_digits().len(), weight_sum);
    record.check_digits() == expected.as_slice()
}

/// Derive `count` check digits for `body`.
///
/// Each digit is appended to the body before the next one is computed.
pub fn expected_check_digits(body: &str, count: usize, weight_sum: WeightSumFn) -> Vec<u8> {
    let mut current = String::with_capacity(body.len() + count);
    current.push_str(body);

    let mut check_digits = Vec::with_capacity(count);
    for _ in 0..count {
        let remainder = weight_sum(&current) % MODULO;
        let v = if remainder < 2 { 0 } else { MODULO - remainder };
        debug_assert!(v <= 9, "check digit out of range: {v}");

        current.push(char::from(b'0' + v as u8));
        check_digits.push(v as u8);
    }

    check_digits
}

/// Weighted sum of `body` against the tail of `weights`.
///
/// The weight table is aligned to the right: a body shorter than the table
/// uses its last `body.len()` weights.
pub fn weight_sum(body: &str, weights: &[u32]) -> u32 {
    let skip = weights.len().saturating_sub(body.len());

    digits(body)
        .zip(weights[skip..].iter())
        .map(|(d, w)| d * w)
        .sum()
}

fn digits(s: &str) -> impl Iterator<Item = u32> + '_ {
    s.chars().filter_map(|c| c.to_digit(10))
}
