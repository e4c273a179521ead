//! CPF (Cadastro de Pessoas Físicas), the individual taxpayer number.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use super::{Document, DocumentKind};
use crate::checksum::{self, Algorithm, AlgorithmKind};
use crate::error::ParseError;
use crate::generator;
use crate::parser::{ParsedRecord, Result, Schema};
use crate::region::{FiscalRegion, State};

/// A parsed CPF, `XXX.XXX.XXX-XX`.
///
/// The digit right before the check digits names the fiscal region that
/// issued the number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cpf {
    record: ParsedRecord,
}

impl Cpf {
    const REGION_OFFSET: usize = Self::SCHEMA.number_length - 3;

    /// Parse a plain (`XXXXXXXXXXX`) or masked (`XXX.XXX.XXX-XX`) CPF.
    pub fn new(number: &str) -> Result<Self> {
        Self::parse(number)
    }

    /// Fiscal region of the issuing office.
    pub fn fiscal_region(&self) -> FiscalRegion {
        let digit = self.plain_number().as_bytes()[Self::REGION_OFFSET] - b'0';
        FiscalRegion::from_cpf_digit(digit)
    }

    /// States covered by the CPF's fiscal region.
    pub fn states(&self) -> BTreeSet<&'static State> {
        self.fiscal_region().states()
    }

    /// Validate with either algorithm.
    pub fn is_valid_with(&self, algorithm: Algorithm, all_same_digits_are_valid: bool) -> bool {
        checksum::validate(&self.record, algorithm, all_same_digits_are_valid)
    }

    /// Resolve a configured algorithm against the CPF weight table.
    pub fn algorithm(kind: AlgorithmKind) -> Algorithm {
        match kind {
            AlgorithmKind::Simple => Algorithm::Simple,
            AlgorithmKind::WeightedSum => Self::weighted_sum(),
        }
    }

    /// A random CPF issued in `region`.
    pub fn generate_in_region(region: FiscalRegion) -> Self {
        Self::generate_in_region_with(region, &mut rand::thread_rng())
    }

    pub fn generate_in_region_with<R: Rng + ?Sized>(region: FiscalRegion, rng: &mut R) -> Self {
        let body = generator::random_body(rng, Self::REGION_OFFSET, &region.digit().to_string());
        generator::complete_body(body)
    }
}

impl Document for Cpf {
    const KIND: DocumentKind = DocumentKind::Cpf;

    const SCHEMA: Schema = Schema {
        number_length: 11,
        check_digits_count: 2,
        weights: &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2],
        separators: &['.', '.', '-'],
        steps: &[3, 3, 3, 2],
    };

    fn from_record(record: ParsedRecord) -> Self {
        Self { record }
    }

    fn record(&self) -> &ParsedRecord {
        &self.record
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.masked_number())
    }
}

impl FromStr for Cpf {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_schema_is_consistent() {
        assert!(Cpf::SCHEMA.is_consistent());
    }

    #[test]
    fn test_check_digits() {
        let cpf = Cpf::new("125.609.581-80").unwrap();
        assert_eq!(cpf.check_digits(), &[8, 0]);
    }

    #[test]
    fn test_masked_from_plain() {
        let cpf = Cpf::new("15561223224").unwrap();
        assert_eq!(cpf.masked_number(), "155.612.232-24");
        assert_eq!(cpf.to_string(), "155.612.232-24");
    }

    #[test]
    fn test_valid_with_both_algorithms() {
        let cpf: Cpf = "602.586.714-32".parse().unwrap();
        assert!(cpf.is_valid());
        assert!(cpf.is_valid_with(Algorithm::Simple, false));
        assert!(cpf.is_valid_with(Cpf::weighted_sum(), false));
        assert!(cpf.is_valid_with(Cpf::algorithm(AlgorithmKind::Simple), false));
    }

    #[test]
    fn test_fiscal_region() {
        assert_eq!(Cpf::new("000.000.000-00").unwrap().fiscal_region(), FiscalRegion::Rf10);
        assert_eq!(Cpf::new("182.557.422-71").unwrap().fiscal_region(), FiscalRegion::Rf02);
        assert_eq!(Cpf::new("813.219.583-31").unwrap().fiscal_region(), FiscalRegion::Rf03);
    }

    #[test]
    fn test_states_for_region() {
        let cpf = Cpf::new("511.357.339-61").unwrap();
        let initials: Vec<_> = cpf.states().iter().map(|s| s.initials).collect();
        assert_eq!(initials, vec!["PR", "SC"]);
    }

    #[test]
    fn test_generate_in_region() {
        let mut rng = StdRng::seed_from_u64(7);
        for region in FiscalRegion::ALL {
            let cpf = Cpf::generate_in_region_with(region, &mut rng);
            assert_eq!(cpf.fiscal_region(), region);
            assert!(cpf.is_valid());
        }
    }

    #[test]
    fn test_serializes_as_record() {
        let cpf = Cpf::new("15561223224").unwrap();
        let json = serde_json::to_value(&cpf).unwrap();
        assert_eq!(json["masked_number"], "155.612.232-24");
        assert_eq!(json["check_digits"], serde_json::json!([2, 4]));
    }
}
