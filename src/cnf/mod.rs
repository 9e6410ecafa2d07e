/*
    This module converts grammars to Chomsky normal form

    The conversion runs in three stages, each consuming the previous grammar:
    epsilon removal, unit removal, then terminal wrapping and binarization.
*/

mod binarize;
mod epsilon;
mod nullable;
mod unit;
mod verifier;

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::*;
use crate::grammar::*;
pub use binarize::binarize;
pub use epsilon::remove_epsilon;
pub use nullable::nullable_variables;
pub use unit::remove_unit_productions;
pub use verifier::{verify_cnf, CnfErrorType};

#[derive(Debug, PartialEq)]
pub enum ConvertErrorType {
    // An epsilon production survived epsilon removal
    // This is a problem with chomsky, not the grammar
    EpsilonProduction(Production),
    // A unit production survived unit removal
    // This is a problem with chomsky, not the grammar
    UnitProduction(Production),
    // The finished grammar is still not in CNF
    // This is a problem with chomsky, not the grammar
    NotNormalized(Vec<CnfErrorType>),
}

impl ErrorType for ConvertErrorType {}

impl Display for ConvertErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertErrorType::EpsilonProduction(p) =>
                write!(f, "Epsilon production `{}` reached binarization (this is a problem with chomsky, not the grammar)", p),
            ConvertErrorType::UnitProduction(p) =>
                write!(f, "Unit production `{}` reached binarization (this is a problem with chomsky, not the grammar)", p),
            ConvertErrorType::NotNormalized(errors) =>
                write!(f, "Conversion produced a grammar outside CNF: {} (this is a problem with chomsky, not the grammar)", errors.iter().join("; ")),
        }
    }
}

pub type ConvertError = Error<ConvertErrorType>;
pub type Result<T> = std::result::Result<T, ConvertErrorType>;

// A grammar in Chomsky normal form, together with whether the grammar it was
// made from derives the empty string. Normal form cannot express that itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalForm {
    grammar: Grammar,
    derives_empty: bool,
}

impl NormalForm {
    // Accepts a grammar that is already in CNF as is
    pub fn assume(grammar: Grammar) -> std::result::Result<Self, Vec<CnfErrorType>> {
        verify_cnf(&grammar)?;
        Ok(NormalForm {
            grammar,
            derives_empty: false
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn derives_empty(&self) -> bool {
        self.derives_empty
    }
}

impl Display for NormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grammar)
    }
}

// One intermediate result of the conversion
pub enum Step<'a> {
    Nullable(&'a BTreeSet<Variable>),
    EpsilonFree(&'a Grammar),
    UnitFree(&'a Grammar),
    Normalized(&'a Grammar),
}

impl Display for Step<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Nullable(nullable) => write!(f, "nullable: {{{}}}", nullable.iter().join(", ")),
            Step::EpsilonFree(grammar) => write!(f, "without epsilon productions:\n{}", grammar),
            Step::UnitFree(grammar) => write!(f, "without unit productions:\n{}", grammar),
            Step::Normalized(grammar) => write!(f, "in normal form:\n{}", grammar),
        }
    }
}

pub fn to_cnf(grammar: Grammar) -> Result<NormalForm> {
    to_cnf_traced(grammar, |_| {})
}

// Converts the grammar, showing every intermediate result to `trace`
pub fn to_cnf_traced(grammar: Grammar, mut trace: impl FnMut(Step)) -> Result<NormalForm> {
    let nullable = nullable_variables(&grammar);
    trace(Step::Nullable(&nullable));
    let derives_empty = nullable.contains(&grammar.start);

    let epsilon_free = remove_epsilon(grammar, &nullable);
    trace(Step::EpsilonFree(&epsilon_free));

    let unit_free = remove_unit_productions(epsilon_free);
    trace(Step::UnitFree(&unit_free));

    let normalized = binarize(unit_free)?;
    trace(Step::Normalized(&normalized));

    verify_cnf(&normalized).map_err(ConvertErrorType::NotNormalized)?;
    Ok(NormalForm {
        grammar: normalized,
        derives_empty
    })
}
