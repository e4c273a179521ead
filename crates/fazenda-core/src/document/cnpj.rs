//! CNPJ (Cadastro Nacional da Pessoa Jurídica), the legal entity number.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use super::{Document, DocumentKind};
use crate::error::ParseError;
use crate::generator;
use crate::parser::{ParsedRecord, Result, Schema};

/// Branch number of a company's headquarters.
pub const HEADQUARTERS_BRANCH: &str = "0001";

/// A parsed CNPJ, `XX.XXX.XXX/XXXX-XX`.
///
/// The first eight digits identify the company and the next four the
/// establishment; `0001` is the headquarters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cnpj {
    record: ParsedRecord,
}

impl Cnpj {
    const BASE_LENGTH: usize = 8;

    /// Parse a plain (`XXXXXXXXXXXXXX`) or masked (`XX.XXX.XXX/XXXX-XX`) CNPJ.
    pub fn new(number: &str) -> Result<Self> {
        Self::parse(number)
    }

    /// The four-digit establishment number.
    pub fn branch_number(&self) -> &str {
        let parts = self.record.parts();
        &parts[parts.len() - 2]
    }

    pub fn is_headquarters(&self) -> bool {
        self.branch_number() == HEADQUARTERS_BRANCH
    }

    /// The eight-digit company root shared by all of its branches.
    pub fn base_number(&self) -> &str {
        &self.plain_number()[..Self::BASE_LENGTH]
    }

    /// A random headquarters CNPJ.
    pub fn generate_headquarters() -> Self {
        Self::generate_headquarters_with(&mut rand::thread_rng())
    }

    pub fn generate_headquarters_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let body = generator::random_body(rng, Self::BASE_LENGTH, HEADQUARTERS_BRANCH);
        generator::complete_body(body)
    }
}

impl Document for Cnpj {
    const KIND: DocumentKind = DocumentKind::Cnpj;

    const SCHEMA: Schema = Schema {
        number_length: 14,
        check_digits_count: 2,
        weights: &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2],
        separators: &['.', '.', '/', '-'],
        steps: &[2, 3, 3, 4, 2],
    };

    fn from_record(record: ParsedRecord) -> Self {
        Self { record }
    }

    fn record(&self) -> &ParsedRecord {
        &self.record
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.masked_number())
    }
}

impl FromStr for Cnpj {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
