use std::collections::BTreeSet;

use fazenda_core::{
    Algorithm, AnyDocument, Cnpj, Cpf, Document, FiscalRegion, ParseError, State,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const VALID_CPFS: &[&str] = &[
    "100.000.987-44",
    "520.852.930-00",
    "000.000.001-91",
    "544.780.212-10",
    "813.219.583-31",
    "602.586.714-32",
    "334.028.435-01",
    "545.462.246-05",
    "135.991.648-27",
    "286.714.209-14",
    "728.793.773-58",
    "704.881.802-60",
    "508.584.317-77",
    "517.531.566-88",
    "050.505.834-03",
    "337.718.534-86",
    "827.525.778-69",
    "60258671432",
    "10000098744",
];

#[test]
fn test_known_cpfs_are_valid() {
    for number in VALID_CPFS {
        let cpf = Cpf::new(number).unwrap();
        assert!(cpf.is_valid(), "weighted sum rejected {number}");
        assert!(cpf.is_valid_with(Algorithm::Simple, false), "simple rejected {number}");
    }
}

#[test]
fn test_known_cnpjs() {
    let hq = Cnpj::new("26.660.727/0001-99").unwrap();
    assert!(hq.is_valid());
    assert!(hq.is_headquarters());
    assert_eq!(hq.branch_number(), "0001");

    let branch = Cnpj::new("47.583.977/6467-51").unwrap();
    assert!(branch.is_valid());
    assert!(!branch.is_headquarters());
    assert_eq!(branch.branch_number(), "6467");
}

#[test]
fn test_repeated_digits_are_invalid() {
    for digit in 0..10 {
        let d = digit.to_string();
        let masked = format!("{0}{0}{0}.{0}{0}{0}.{0}{0}{0}-{0}{0}", d);
        let cpf = Cpf::new(&masked).unwrap();

        assert!(!cpf.is_valid(), "{masked}");
        assert!(!cpf.is_valid_with(Algorithm::Simple, false), "{masked}");
        assert!(!cpf.is_valid_with(Cpf::weighted_sum(), false), "{masked}");
        // These satisfy the arithmetic when allowed.
        assert!(cpf.is_valid_with(Algorithm::Simple, true), "{masked}");
    }
}

#[test]
fn test_malformed_inputs() {
    for input in ["7715350466", "1556122322A", "155.612.232-2-", "155-612-232-24", ""] {
        assert_eq!(Cpf::new(input), Err(ParseError::InvalidFormat), "{input:?}");
    }

    for input in ["26.660.727/0001-9", "26.660.727/0001-99x", "26-660-727/0001-99", "2666072700019A"] {
        assert_eq!(Cnpj::new(input), Err(ParseError::InvalidFormat), "{input:?}");
    }
}

#[test]
fn test_plain_to_masked() {
    assert_eq!(Cpf::new("15561223224").unwrap().masked_number(), "155.612.232-24");
    assert_eq!(Cnpj::new("47583977646751").unwrap().masked_number(), "47.583.977/6467-51");
}

#[test]
fn test_mask_round_trip() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let cpf: Cpf = fazenda_core::generator::generate_with(&mut rng);
        assert_eq!(Cpf::new(cpf.masked_number()).unwrap(), cpf);
        assert_eq!(Cpf::new(cpf.plain_number()).unwrap(), cpf);

        let cnpj: Cnpj = fazenda_core::generator::generate_with(&mut rng);
        assert_eq!(Cnpj::new(cnpj.masked_number()).unwrap(), cnpj);
        assert_eq!(Cnpj::new(cnpj.plain_number()).unwrap(), cnpj);
    }
}

#[test]
fn test_generated_cpfs_are_valid() {
    for _ in 0..1000 {
        let cpf = Cpf::generate();
        assert!(cpf.is_valid(), "{cpf}");
        assert!(cpf.is_valid_with(Algorithm::Simple, false), "{cpf}");
    }
}

#[test]
fn test_generated_cnpjs_are_valid() {
    for _ in 0..1000 {
        let cnpj = Cnpj::generate();
        assert!(cnpj.is_valid(), "{cnpj}");
    }
}

#[test]
fn test_fiscal_region_digits() {
    let expected = [
        FiscalRegion::Rf10,
        FiscalRegion::Rf01,
        FiscalRegion::Rf02,
        FiscalRegion::Rf03,
        FiscalRegion::Rf04,
        FiscalRegion::Rf05,
        FiscalRegion::Rf06,
        FiscalRegion::Rf07,
        FiscalRegion::Rf08,
        FiscalRegion::Rf09,
    ];

    for (digit, region) in expected.iter().enumerate() {
        let number = digit.to_string().repeat(11);
        let cpf = Cpf::new(&number).unwrap();
        assert_eq!(cpf.fiscal_region(), *region);

        let states: BTreeSet<_> = State::all()
            .iter()
            .filter(|s| s.fiscal_region == *region)
            .collect();
        assert_eq!(cpf.states(), states);
    }
}

#[test]
fn test_any_document() {
    let document: AnyDocument = "26660727000199".parse().unwrap();
    assert!(document.is_valid());
    assert_eq!(document.to_string(), "26.660.727/0001-99");

    let document: AnyDocument = "155.612.232-24".parse().unwrap();
    assert!(matches!(document, AnyDocument::Cpf(_)));
}
