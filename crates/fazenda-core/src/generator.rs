//! Random document generation.
//!
//! Bodies are uniform random digits; check digits are always derived with the
//! weighted-sum algorithm, so every generated document validates. Nothing
//! here is suitable where unpredictability matters.

use rand::Rng;
use tracing::trace;

use crate::checksum::{expected_check_digits, has_all_same_digits};
use crate::document::Document;
use crate::parser::assemble_plain;

/// A random document using the thread-local generator.
pub fn generate<D: Document>() -> D {
    generate_with(&mut rand::thread_rng())
}

/// A random document drawn from `rng`.
///
/// With a seeded generator the output is reproducible.
pub fn generate_with<D: Document, R: Rng + ?Sized>(rng: &mut R) -> D {
    let body = random_body(rng, D::SCHEMA.body_length(), "");
    complete_body(body)
}

/// Up to `count` random documents, without duplicates.
pub fn generate_many_with<D, R>(rng: &mut R, count: usize) -> Vec<D>
where
    D: Document + Eq + std::hash::Hash + Clone,
    R: Rng + ?Sized,
{
    let mut seen = std::collections::HashSet::with_capacity(count);
    let mut documents = Vec::with_capacity(count);

    while documents.len() < count {
        let document: D = generate_with(rng);
        if seen.insert(document.clone()) {
            documents.push(document);
        }
    }

    documents
}

/// `len` uniform random decimal digits.
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Random digits followed by `suffix`, redrawn while every digit is the same.
pub(crate) fn random_body<R: Rng + ?Sized>(rng: &mut R, len: usize, suffix: &str) -> String {
    loop {
        let mut body = random_digits(rng, len);
        body.push_str(suffix);
        if !has_all_same_digits(&body) {
            return body;
        }
    }
}

/// Append check digits to a full-length body and build the document.
pub(crate) fn complete_body<D: Document>(body: String) -> D {
    debug_assert_eq!(body.len(), D::SCHEMA.body_length());

    let check_digits = expected_check_digits(&body, D::SCHEMA.check_digits_count, D::weight_sum);

    let mut plain_number = body;
    plain_number.extend(check_digits.iter().map(|&d| char::from(b'0' + d)));

    let record = assemble_plain(plain_number, check_digits, &D::SCHEMA);
    trace!("Generated {} {}", D::KIND, record.masked_number());

    D::from_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Cnpj, Cpf};
    use crate::parser::parse;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_digits() {
        let mut rng = StdRng::seed_from_u64(1);
        let digits = random_digits(&mut rng, 50);
        assert_eq!(digits.len(), 50);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a: Cpf = generate_with(&mut StdRng::seed_from_u64(99));
        let b: Cpf = generate_with(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_record_matches_reparse() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let cnpj: Cnpj = generate_with(&mut rng);
            let reparsed = parse(cnpj.plain_number(), &Cnpj::SCHEMA).unwrap();
            assert_eq!(&reparsed, cnpj.record());
        }
    }

    #[test]
    fn test_generate_many_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(11);
        let documents: Vec<Cpf> = generate_many_with(&mut rng, 200);
        assert_eq!(documents.len(), 200);

        let unique: std::collections::HashSet<_> = documents.iter().collect();
        assert_eq!(unique.len(), 200);
    }

    #[test]
    fn test_random_body_skips_repeated_digits() {
        let mut rng = StdRng::seed_from_u64(5);
        // A one-digit body followed by "1" repeats only when the draw is 1.
        for _ in 0..100 {
            assert_ne!(random_body(&mut rng, 1, "1"), "11");
        }
    }
}
