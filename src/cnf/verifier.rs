use std::fmt::Display;

use crate::error_handling::ErrorType;
use crate::grammar::*;

#[derive(Debug, PartialEq)]
pub enum CnfErrorType {
    // A -> (nothing)
    EpsilonProduction(Production),
    // A -> B
    UnitProduction(Production),
    // A terminal next to other symbols, as in A -> aB
    MixedProduction(Production),
    // More than two symbols on the right-hand side
    LongProduction(Production),
}

impl ErrorType for CnfErrorType {
    fn is_usage_error(&self) -> bool {
        true
    }
}

impl Display for CnfErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfErrorType::EpsilonProduction(p) => write!(f, "Grammar is not in CNF: `{}` derives the empty string (try --convert)", p),
            CnfErrorType::UnitProduction(p) => write!(f, "Grammar is not in CNF: `{}` is a unit production (try --convert)", p),
            CnfErrorType::MixedProduction(p) => write!(f, "Grammar is not in CNF: `{}` mixes terminals with other symbols (try --convert)", p),
            CnfErrorType::LongProduction(p) => write!(f, "Grammar is not in CNF: `{}` has more than two symbols (try --convert)", p),
        }
    }
}

fn get_production_error(production: &Production) -> Option<CnfErrorType> {
    if production.is_terminal_only() || production.is_binary() {
        None
    } else if production.is_epsilon() {
        Some(CnfErrorType::EpsilonProduction(production.clone()))
    } else if production.is_unit() {
        Some(CnfErrorType::UnitProduction(production.clone()))
    } else if production.rhs.len() > 2 {
        Some(CnfErrorType::LongProduction(production.clone()))
    } else {
        Some(CnfErrorType::MixedProduction(production.clone()))
    }
}

pub fn verify_cnf(grammar: &Grammar) -> Result<(), Vec<CnfErrorType>> {
    let errors: Vec<_> = grammar.productions.iter()
        .filter_map(get_production_error)
        .collect();

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
