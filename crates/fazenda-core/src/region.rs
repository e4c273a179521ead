//! Receita Federal fiscal regions and the Brazilian states they cover.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Fiscal region encoded in the ninth digit of a CPF.
///
/// Digits 1 to 9 name regions 1 to 9; digit 0 names the 10th region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiscalRegion {
    Rf01,
    Rf02,
    Rf03,
    Rf04,
    Rf05,
    Rf06,
    Rf07,
    Rf08,
    Rf09,
    Rf10,
}

impl FiscalRegion {
    /// All regions, in region-number order.
    pub const ALL: [FiscalRegion; 10] = [
        FiscalRegion::Rf01,
        FiscalRegion::Rf02,
        FiscalRegion::Rf03,
        FiscalRegion::Rf04,
        FiscalRegion::Rf05,
        FiscalRegion::Rf06,
        FiscalRegion::Rf07,
        FiscalRegion::Rf08,
        FiscalRegion::Rf09,
        FiscalRegion::Rf10,
    ];

    /// Region for the digit found in a CPF. `None` above 9.
    pub fn from_digit(digit: u8) -> Option<Self> {
        (digit <= 9).then(|| Self::from_cpf_digit(digit))
    }

    /// Same as [`Self::from_digit`] for a digit already known to be 0..=9.
    pub(crate) fn from_cpf_digit(digit: u8) -> Self {
        // 0 wraps around to the 10th region.
        Self::ALL[(digit as usize + 9) % 10]
    }

    /// The digit that encodes this region in a CPF.
    pub fn digit(self) -> u8 {
        self.number() % 10
    }

    /// Region number, 1 to 10.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// States served by this region.
    pub fn states(self) -> BTreeSet<&'static State> {
        STATES.iter().filter(|s| s.fiscal_region == self).collect()
    }
}

impl fmt::Display for FiscalRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RF{:02}", self.number())
    }
}

/// A Brazilian federative unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct State {
    /// Two-letter abbreviation.
    pub initials: &'static str,
    pub name: &'static str,
    pub fiscal_region: FiscalRegion,
}

impl State {
    /// Every state, in table order.
    pub fn all() -> &'static [State] {
        &STATES
    }

    /// Look a state up by its abbreviation, ignoring case.
    pub fn by_initials(initials: &str) -> Option<&'static State> {
        STATES
            .iter()
            .find(|s| s.initials.eq_ignore_ascii_case(initials.trim()))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State: {} ({}) Fiscal Region: {}",
            self.name, self.initials, self.fiscal_region
        )
    }
}

const fn state(initials: &'static str, name: &'static str, fiscal_region: FiscalRegion) -> State {
    State {
        initials,
        name,
        fiscal_region,
    }
}

static STATES: [State; 27] = [
    state("AC", "Acre", FiscalRegion::Rf02),
    state("AL", "Alagoas", FiscalRegion::Rf04),
    state("AP", "Amapá", FiscalRegion::Rf02),
    state("AM", "Amazonas", FiscalRegion::Rf02),
    state("BA", "Bahia", FiscalRegion::Rf05),
    state("CE", "Ceará", FiscalRegion::Rf03),
    state("DF", "Brasília", FiscalRegion::Rf01),
    state("ES", "Espírito Santo", FiscalRegion::Rf07),
    state("GO", "Goiás", FiscalRegion::Rf01),
    state("MA", "Maranhão", FiscalRegion::Rf03),
    state("MT", "Mato Grosso", FiscalRegion::Rf01),
    state("MS", "Mato Grosso do Sul", FiscalRegion::Rf01),
    state("MG", "Minas Gerais", FiscalRegion::Rf06),
    state("PA", "Pará", FiscalRegion::Rf02),
    state("PB", "Paraíba", FiscalRegion::Rf04),
    state("PR", "Paraná", FiscalRegion::Rf09),
    state("PE", "Pernambuco", FiscalRegion::Rf04),
    state("PI", "Piauí", FiscalRegion::Rf03),
    state("RJ", "Rio de Janeiro", FiscalRegion::Rf07),
    state("RN", "Rio Grande do Norte", FiscalRegion::Rf04),
    state("RS", "Rio Grande do Sul", FiscalRegion::Rf10),
    state("RO", "Rondônia", FiscalRegion::Rf02),
    state("RR", "Roraima", FiscalRegion::Rf02),
    state("SC", "Santa Catarina", FiscalRegion::Rf09),
    state("SP", "São Paulo", FiscalRegion::Rf08),
    state("SE", "Sergipe", FiscalRegion::Rf05),
    state("TO", "Tocantins", FiscalRegion::Rf01),
];
