//! Regex patterns for CPF and CNPJ numbers in free text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CPF patterns (masked or plain, never partially masked)
    pub static ref CPF_PATTERN: Regex = Regex::new(
        r"(?i)\bC\.?P\.?F\.?(?:/MF)?[\s:]*(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})\b"
    ).unwrap();

    pub static ref CPF_STANDALONE: Regex = Regex::new(
        r"\b(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})\b"
    ).unwrap();

    // CNPJ patterns
    pub static ref CNPJ_PATTERN: Regex = Regex::new(
        r"(?i)\bC\.?N\.?P\.?J\.?(?:/MF)?[\s:]*(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}|\d{14})\b"
    ).unwrap();

    pub static ref CNPJ_STANDALONE: Regex = Regex::new(
        r"\b(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}|\d{14})\b"
    ).unwrap();
}
