//! CPF and CNPJ extraction from free text.

pub mod patterns;

use std::marker::PhantomData;

use regex::Regex;
use tracing::debug;

use crate::document::{AnyDocument, Cnpj, Cpf, Document, DocumentKind};
use patterns::{CNPJ_PATTERN, CNPJ_STANDALONE, CPF_PATTERN, CPF_STANDALONE};

const LABELED_CONFIDENCE: f32 = 0.95;
const STANDALONE_CONFIDENCE: f32 = 0.7;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Convert the value, keeping the match context.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            confidence: self.confidence,
            position: self.position,
            source: self.source,
        }
    }
}

/// Extractor for one document type.
///
/// Labelled occurrences (`CPF: ...`, `CNPJ/MF ...`) are reported first with a
/// higher confidence, then bare numbers in either accepted form.
pub struct DocumentExtractor<D> {
    validate: bool,
    _document: PhantomData<D>,
}

/// CPF field extractor.
pub type CpfExtractor = DocumentExtractor<Cpf>;

/// CNPJ field extractor.
pub type CnpjExtractor = DocumentExtractor<Cnpj>;

impl<D: Document> DocumentExtractor<D> {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            validate: true,
            _document: PhantomData,
        }
    }

    /// Set whether to drop numbers with wrong check digits.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    fn patterns() -> (&'static Regex, &'static Regex) {
        match D::KIND {
            DocumentKind::Cpf => (&CPF_PATTERN, &CPF_STANDALONE),
            DocumentKind::Cnpj => (&CNPJ_PATTERN, &CNPJ_STANDALONE),
        }
    }

    fn collect(&self, pattern: &Regex, text: &str, confidence: f32, results: &mut Vec<ExtractionMatch<D>>)
    where
        D: PartialEq,
    {
        for caps in pattern.captures_iter(text) {
            let (Some(full_match), Some(number)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let Ok(document) = D::parse(number.as_str()) else {
                continue;
            };

            // Skip if already found
            if results.iter().any(|r| r.value == document) {
                continue;
            }

            if self.validate && !document.is_valid() {
                debug!("Skipping {} with invalid check digits: {}", D::KIND, number.as_str());
                continue;
            }

            results.push(
                ExtractionMatch::new(document, confidence, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }
    }
}

impl<D: Document> Default for DocumentExtractor<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document + PartialEq> FieldExtractor for DocumentExtractor<D> {
    type Output = ExtractionMatch<D>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let (labeled, standalone) = Self::patterns();
        let mut results = Vec::new();

        self.collect(labeled, text, LABELED_CONFIDENCE, &mut results);
        self.collect(standalone, text, STANDALONE_CONFIDENCE, &mut results);

        results
    }
}

/// Extract the first valid CPF from text.
pub fn extract_cpf(text: &str) -> Option<Cpf> {
    CpfExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the first valid CNPJ from text.
pub fn extract_cnpj(text: &str) -> Option<Cnpj> {
    CnpjExtractor::new().extract(text).map(|m| m.value)
}

/// Extract every CPF and CNPJ, ordered by position in the text.
pub fn extract_documents(text: &str, validate: bool) -> Vec<ExtractionMatch<AnyDocument>> {
    let cpfs = CpfExtractor::new()
        .with_validation(validate)
        .extract_all(text)
        .into_iter()
        .map(|m| m.map(AnyDocument::Cpf));

    let cnpjs = CnpjExtractor::new()
        .with_validation(validate)
        .extract_all(text)
        .into_iter()
        .map(|m| m.map(AnyDocument::Cnpj));

    let mut results: Vec<_> = cpfs.chain(cnpjs).collect();
    results.sort_by_key(|m| m.position.map(|(start, _)| start));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_cpf_labeled() {
        let text = "Cliente: Maria da Silva\nCPF: 155.612.232-24\nSão Paulo";
        let cpf = extract_cpf(text).unwrap();
        assert_eq!(cpf.plain_number(), "15561223224");

        let found = CpfExtractor::new().extract(text).unwrap();
        assert_eq!(found.confidence, LABELED_CONFIDENCE);
        assert_eq!(found.source, "CPF: 155.612.232-24");
    }

    #[test]
    fn test_extract_cpf_standalone() {
        let text = "Documentos 10000098744 e 520.852.930-00 anexados";
        let results = CpfExtractor::new().extract_all(text);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|m| m.confidence == STANDALONE_CONFIDENCE));
    }

    #[test]
    fn test_labeled_and_standalone_not_duplicated() {
        let text = "C.P.F. 813.219.583-31";
        let results = CpfExtractor::new().extract_all(text);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].confidence, LABELED_CONFIDENCE);
    }

    #[test]
    fn test_validation_drops_bad_check_digits() {
        let text = "CPF 155.612.232-25";
        assert!(extract_cpf(text).is_none());

        let results = CpfExtractor::new().with_validation(false).extract_all(text);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_extract_cnpj() {
        let text = "Emitente CNPJ/MF: 26.660.727/0001-99 - filial 47583977646751";
        let results = CnpjExtractor::new().extract_all(text);
        assert_eq!(results.len(), 2);
        assert!(results[0].value.is_headquarters());
        assert_eq!(results[1].value.branch_number(), "6467");
    }

    #[test]
    fn test_cpf_pattern_ignores_cnpj() {
        assert!(extract_cpf("CNPJ 26.660.727/0001-99").is_none());
        assert!(extract_cnpj("CPF 155.612.232-24").is_none());
    }

    #[test]
    fn test_extract_documents_ordered() {
        let text = "CNPJ 26.660.727/0001-99, sócio CPF 155.612.232-24";
        let results = extract_documents(text, true);
        let kinds: Vec<_> = results.iter().map(|m| m.value.kind()).collect();
        assert_eq!(kinds, vec![DocumentKind::Cnpj, DocumentKind::Cpf]);
    }
}
