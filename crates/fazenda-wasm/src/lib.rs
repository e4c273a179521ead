//! WASM bindings for CPF/CNPJ validation and generation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use fazenda_core::extract::extract_documents;
use fazenda_core::{AlgorithmKind, AnyDocument, Cnpj, Cpf, Document, DocumentKind, FiscalRegion, State};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_kind(kind: &str) -> Result<DocumentKind, JsValue> {
    kind.parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown document type: {}", kind)))
}

/// Parse and validate a CPF or CNPJ.
///
/// Returns the document summary: type, plain and masked number, check digits,
/// validity, and the fiscal region (CPF) or branch (CNPJ).
#[wasm_bindgen]
pub fn validate(number: &str) -> Result<JsValue, JsValue> {
    DocumentValidator::new().validate(number)
}

/// Whether `number` is a valid CPF.
#[wasm_bindgen]
pub fn is_valid_cpf(number: &str) -> bool {
    Cpf::parse(number).is_ok_and(|cpf| cpf.is_valid())
}

/// Whether `number` is a valid CNPJ.
#[wasm_bindgen]
pub fn is_valid_cnpj(number: &str) -> bool {
    Cnpj::parse(number).is_ok_and(|cnpj| cnpj.is_valid())
}

/// Generate a random valid CPF.
#[wasm_bindgen]
pub fn generate_cpf(masked: bool) -> String {
    format_number(&Cpf::generate().into(), masked)
}

/// Generate a random valid CNPJ.
#[wasm_bindgen]
pub fn generate_cnpj(masked: bool) -> String {
    format_number(&Cnpj::generate().into(), masked)
}

/// Generate `count` random valid numbers of the given type ("cpf" or "cnpj").
#[wasm_bindgen]
pub fn generate_many(kind: &str, count: usize, masked: bool) -> Result<Array, JsValue> {
    let kind = parse_kind(kind)?;

    let numbers = Array::new();
    for _ in 0..count {
        let document = AnyDocument::generate(kind);
        numbers.push(&JsValue::from_str(&format_number(&document, masked)));
    }

    Ok(numbers)
}

fn format_number(document: &AnyDocument, masked: bool) -> String {
    if masked {
        document.masked_number().to_string()
    } else {
        document.plain_number().to_string()
    }
}

/// Find every valid CPF and CNPJ in a text.
#[wasm_bindgen]
pub fn extract(text: &str) -> Result<JsValue, JsValue> {
    #[derive(serde::Serialize)]
    struct Found {
        kind: DocumentKind,
        masked_number: String,
        confidence: f32,
        start: Option<usize>,
        end: Option<usize>,
    }

    let found: Vec<Found> = extract_documents(text, true)
        .into_iter()
        .map(|m| Found {
            kind: m.value.kind(),
            masked_number: m.value.masked_number().to_string(),
            confidence: m.confidence,
            start: m.position.map(|(start, _)| start),
            end: m.position.map(|(_, end)| end),
        })
        .collect();

    to_js(&found)
}

/// States of a fiscal region (1-10), or all states when omitted.
#[wasm_bindgen]
pub fn states(region: Option<u8>) -> Result<JsValue, JsValue> {
    match region {
        Some(number) if (1..=10).contains(&number) => {
            let region = FiscalRegion::from_digit(number % 10)
                .ok_or_else(|| JsValue::from_str("Unknown fiscal region"))?;
            let states: Vec<&State> = region.states().into_iter().collect();
            to_js(&states)
        }
        Some(number) => Err(JsValue::from_str(&format!("Unknown fiscal region: {}", number))),
        None => to_js(&State::all()),
    }
}

/// Configurable validator class for browser use.
#[wasm_bindgen]
pub struct DocumentValidator {
    algorithm: AlgorithmKind,
    allow_same_digits: bool,
}

#[wasm_bindgen]
impl DocumentValidator {
    /// Create a validator using the weighted-sum algorithm.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            algorithm: AlgorithmKind::WeightedSum,
            allow_same_digits: false,
        }
    }

    /// Use the simple algorithm for CPF.
    #[wasm_bindgen]
    pub fn set_simple_algorithm(&mut self, simple: bool) {
        self.algorithm = if simple {
            AlgorithmKind::Simple
        } else {
            AlgorithmKind::WeightedSum
        };
    }

    /// Accept numbers made of a single repeated digit.
    #[wasm_bindgen]
    pub fn set_allow_same_digits(&mut self, allow: bool) {
        self.allow_same_digits = allow;
    }

    /// Whether `number` parses and has correct check digits.
    #[wasm_bindgen]
    pub fn is_valid(&self, number: &str) -> bool {
        AnyDocument::parse(number)
            .is_ok_and(|document| document.is_valid_with(self.algorithm, self.allow_same_digits))
    }

    /// Parse and validate, returning the document summary.
    #[wasm_bindgen]
    pub fn validate(&self, number: &str) -> Result<JsValue, JsValue> {
        let document = AnyDocument::parse(number).map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&document.summary(self.algorithm, self.allow_same_digits))
    }
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_is_valid_cpf() {
        assert!(is_valid_cpf("155.612.232-24"));
        assert!(is_valid_cpf("10000098744"));
        assert!(!is_valid_cpf("155.612.232-25"));
        assert!(!is_valid_cpf("111.111.111-11"));
    }

    #[wasm_bindgen_test]
    fn test_is_valid_cnpj() {
        assert!(is_valid_cnpj("26.660.727/0001-99"));
        assert!(!is_valid_cnpj("26.660.727/0001-98"));
    }

    #[wasm_bindgen_test]
    fn test_generated_numbers_are_valid() {
        assert!(is_valid_cpf(&generate_cpf(true)));
        assert!(is_valid_cnpj(&generate_cnpj(false)));
    }

    #[wasm_bindgen_test]
    fn test_validator_same_digits() {
        let mut validator = DocumentValidator::new();
        assert!(!validator.is_valid("22222222222"));
        validator.set_allow_same_digits(true);
        assert!(validator.is_valid("22222222222"));
    }
}
