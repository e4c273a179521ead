//! CPF and CNPJ document types.
//!
//! Both types are thin wrappers around a [`ParsedRecord`]. Everything they
//! share (parsing, accessors, weighted-sum validation, generation) lives in
//! the [`Document`] trait; each type supplies its [`Schema`] and its own
//! derived fields.

mod cnpj;
mod cpf;

pub use cnpj::Cnpj;
pub use cpf::Cpf;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checksum::{self, Algorithm, AlgorithmKind};
use crate::error::ParseError;
use crate::generator;
use crate::parser::{self, ParsedRecord, Result, Schema};
use crate::region::FiscalRegion;

/// Shared behaviour of Brazilian tax documents.
pub trait Document: Sized {
    /// Which document this is.
    const KIND: DocumentKind;

    /// Length, mask and weight table.
    const SCHEMA: Schema;

    /// Wrap a record parsed against [`Self::SCHEMA`].
    fn from_record(record: ParsedRecord) -> Self;

    /// The underlying parsed record.
    fn record(&self) -> &ParsedRecord;

    /// Parse a plain or masked number.
    fn parse(number: &str) -> Result<Self> {
        parser::parse(number, &Self::SCHEMA).map(Self::from_record)
    }

    fn plain_number(&self) -> &str {
        self.record().plain_number()
    }

    fn masked_number(&self) -> &str {
        self.record().masked_number()
    }

    fn check_digits(&self) -> &[u8] {
        self.record().check_digits()
    }

    /// Weighted sum of `body` against this document's weight table.
    fn weight_sum(body: &str) -> u32 {
        checksum::weight_sum(body, Self::SCHEMA.weights)
    }

    /// The weighted-sum algorithm bound to this document's weights.
    fn weighted_sum() -> Algorithm {
        Algorithm::WeightedSum(Self::weight_sum)
    }

    /// Validate with the weighted-sum algorithm, rejecting repeated digits.
    fn is_valid(&self) -> bool {
        self.is_valid_allowing_same_digits(false)
    }

    /// Validate with the weighted-sum algorithm.
    fn is_valid_allowing_same_digits(&self, all_same_digits_are_valid: bool) -> bool {
        checksum::validate(self.record(), Self::weighted_sum(), all_same_digits_are_valid)
    }

    /// A random document with correct check digits.
    fn generate() -> Self {
        generator::generate()
    }
}

/// Document type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cpf => write!(f, "CPF"),
            DocumentKind::Cnpj => write!(f, "CNPJ"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpf" => Ok(DocumentKind::Cpf),
            "cnpj" => Ok(DocumentKind::Cnpj),
            _ => Err(ParseError::InvalidFormat),
        }
    }
}

/// Either document, for callers that do not know the type up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyDocument {
    Cpf(Cpf),
    Cnpj(Cnpj),
}

impl AnyDocument {
    /// Parse as CPF, falling back to CNPJ.
    ///
    /// A masked CPF and a plain CNPJ are both 14 characters long; the
    /// separators decide which one matches.
    pub fn parse(number: &str) -> Result<Self> {
        Cpf::parse(number)
            .map(AnyDocument::Cpf)
            .or_else(|_| Cnpj::parse(number).map(AnyDocument::Cnpj))
    }

    /// Parse as a specific document type.
    pub fn parse_as(kind: DocumentKind, number: &str) -> Result<Self> {
        match kind {
            DocumentKind::Cpf => Cpf::parse(number).map(AnyDocument::Cpf),
            DocumentKind::Cnpj => Cnpj::parse(number).map(AnyDocument::Cnpj),
        }
    }

    /// A random document of the given type.
    pub fn generate(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Cpf => AnyDocument::Cpf(Cpf::generate()),
            DocumentKind::Cnpj => AnyDocument::Cnpj(Cnpj::generate()),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            AnyDocument::Cpf(_) => DocumentKind::Cpf,
            AnyDocument::Cnpj(_) => DocumentKind::Cnpj,
        }
    }

    pub fn record(&self) -> &ParsedRecord {
        match self {
            AnyDocument::Cpf(cpf) => cpf.record(),
            AnyDocument::Cnpj(cnpj) => cnpj.record(),
        }
    }

    pub fn plain_number(&self) -> &str {
        self.record().plain_number()
    }

    pub fn masked_number(&self) -> &str {
        self.record().masked_number()
    }

    /// Validate with the selected algorithm.
    ///
    /// CNPJ only has the weighted-sum algorithm, so `algorithm` only matters
    /// for CPF.
    pub fn is_valid_with(&self, algorithm: AlgorithmKind, all_same_digits_are_valid: bool) -> bool {
        match self {
            AnyDocument::Cpf(cpf) => cpf.is_valid_with(Cpf::algorithm(algorithm), all_same_digits_are_valid),
            AnyDocument::Cnpj(cnpj) => cnpj.is_valid_allowing_same_digits(all_same_digits_are_valid),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_with(AlgorithmKind::WeightedSum, false)
    }

    /// Flatten into a serializable summary.
    pub fn summary(&self, algorithm: AlgorithmKind, all_same_digits_are_valid: bool) -> DocumentSummary {
        let record = self.record();
        let mut summary = DocumentSummary {
            kind: self.kind(),
            plain_number: record.plain_number().to_string(),
            masked_number: record.masked_number().to_string(),
            check_digits: record.check_digits().to_vec(),
            valid: self.is_valid_with(algorithm, all_same_digits_are_valid),
            fiscal_region: None,
            states: Vec::new(),
            branch_number: None,
            headquarters: None,
        };

        match self {
            AnyDocument::Cpf(cpf) => {
                summary.fiscal_region = Some(cpf.fiscal_region());
                summary.states = cpf.states().iter().map(|s| s.initials).collect();
            }
            AnyDocument::Cnpj(cnpj) => {
                summary.branch_number = Some(cnpj.branch_number().to_string());
                summary.headquarters = Some(cnpj.is_headquarters());
            }
        }

        summary
    }
}

impl From<Cpf> for AnyDocument {
    fn from(cpf: Cpf) -> Self {
        AnyDocument::Cpf(cpf)
    }
}

impl From<Cnpj> for AnyDocument {
    fn from(cnpj: Cnpj) -> Self {
        AnyDocument::Cnpj(cnpj)
    }
}

impl fmt::Display for AnyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.masked_number())
    }
}

impl FromStr for AnyDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        AnyDocument::parse(s)
    }
}

/// Serializable description of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub kind: DocumentKind,
    pub plain_number: String,
    pub masked_number: String,
    pub check_digits: Vec<u8>,
    pub valid: bool,

    /// CPF only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_region: Option<FiscalRegion>,

    /// CPF only: initials of the states in the fiscal region.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<&'static str>,

    /// CNPJ only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_number: Option<String>,

    /// CNPJ only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_detects_kind() {
        assert_eq!(AnyDocument::parse("15561223224").unwrap().kind(), DocumentKind::Cpf);
        assert_eq!(AnyDocument::parse("155.612.232-24").unwrap().kind(), DocumentKind::Cpf);
        assert_eq!(AnyDocument::parse("26660727000199").unwrap().kind(), DocumentKind::Cnpj);
        assert_eq!(AnyDocument::parse("26.660.727/0001-99").unwrap().kind(), DocumentKind::Cnpj);
        assert_eq!(AnyDocument::parse("123"), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_parse_as() {
        assert!(AnyDocument::parse_as(DocumentKind::Cnpj, "15561223224").is_err());
        assert!(AnyDocument::parse_as(DocumentKind::Cpf, "15561223224").is_ok());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("CPF".parse::<DocumentKind>(), Ok(DocumentKind::Cpf));
        assert_eq!(" cnpj ".parse::<DocumentKind>(), Ok(DocumentKind::Cnpj));
        assert!("rg".parse::<DocumentKind>().is_err());
        assert_eq!(DocumentKind::Cnpj.to_string(), "CNPJ");
    }

    #[test]
    fn test_cpf_summary() {
        let summary = AnyDocument::parse("182.557.422-71")
            .unwrap()
            .summary(AlgorithmKind::Simple, false);

        assert_eq!(summary.kind, DocumentKind::Cpf);
        assert_eq!(summary.plain_number, "18255742271");
        assert_eq!(summary.check_digits, vec![7, 1]);
        assert!(summary.valid);
        assert_eq!(summary.fiscal_region, Some(FiscalRegion::Rf02));
        assert_eq!(summary.states, vec!["AC", "AM", "AP", "PA", "RO", "RR"]);
        assert_eq!(summary.branch_number, None);
    }

    #[test]
    fn test_cnpj_summary_json() {
        let summary = AnyDocument::parse("47583977646751")
            .unwrap()
            .summary(AlgorithmKind::WeightedSum, false);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "cnpj");
        assert_eq!(json["masked_number"], "47.583.977/6467-51");
        assert_eq!(json["branch_number"], "6467");
        assert_eq!(json["headquarters"], false);
        assert_eq!(json["valid"], true);
        assert!(json.get("fiscal_region").is_none());
        assert!(json.get("states").is_none());
    }
}
