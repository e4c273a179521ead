//! Core library for Brazilian tax identification numbers.
//!
//! This crate provides:
//! - CPF and CNPJ parsing from plain or masked input
//! - Check digit validation (simple and weighted-sum modulo 11)
//! - Random generation of valid documents
//! - Fiscal region and state lookup for CPF
//! - CPF/CNPJ extraction from free text

pub mod checksum;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod generator;
pub mod parser;
pub mod region;

pub use checksum::{Algorithm, AlgorithmKind};
pub use config::FazendaConfig;
pub use document::{AnyDocument, Cnpj, Cpf, Document, DocumentKind, DocumentSummary};
pub use error::{FazendaError, ParseError, Result};
pub use extract::{extract_documents, ExtractionMatch, FieldExtractor};
pub use parser::{ParsedRecord, Schema};
pub use region::{FiscalRegion, State};
