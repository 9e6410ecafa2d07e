/*
    This module generates random words of a grammar's language
*/

use rand::prelude::*;
use std::{collections::BTreeMap, fmt::Display};

use crate::grammar::*;
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // A variable without productions was reached
    UndefinedVariable(Variable),
    // The derivation got deeper than the allowed maximum
    DerivationTooDeep(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedVariable(variable) => write!(f, "No productions for variable `{}`", variable),
            GenerateErrorType::DerivationTooDeep(depth) => write!(f, "Derivation went deeper than {} steps (try a larger --max-depth)", depth),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateErrorType>;

type Rules<'a> = BTreeMap<&'a Variable, Vec<&'a Production>>;

// Generates a word by expanding the start variable with uniformly chosen
// productions, never nesting deeper than `max_depth`. Expansion is leftmost
// first, driven by a stack of pending symbols tagged with their depth.
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, max_depth: usize, rng: &mut R) -> GenResult {
    let mut rules = Rules::new();
    for production in &grammar.productions {
        rules.entry(&production.lhs).or_default().push(production);
    }

    let start = Symbol::from(grammar.start.clone());
    let mut pending: Vec<(&Symbol, usize)> = vec![(&start, 0)];
    let mut word = String::new();

    while let Some((symbol, depth)) = pending.pop() {
        match symbol {
            Symbol::Terminal(c) => word.push(*c),
            Symbol::Variable(variable) => {
                let production = choose_production(variable, &rules, depth, max_depth, rng)?;
                pending.extend(production.rhs.iter().rev().map(|s| (s, depth + 1)));
            }
        }
    }

    return Ok(word);
}

fn choose_production<'a, R: Rng + ?Sized>(
    variable: &Variable,
    rules: &Rules<'a>,
    depth: usize,
    max_depth: usize,
    rng: &mut R
) -> Result<&'a Production, GenerateErrorType> {
    if depth > max_depth {
        return Err(GenerateErrorType::DerivationTooDeep(max_depth));
    }

    rules
        .get(variable)
        .and_then(|productions| productions.choose(&mut *rng))
        .copied()
        .ok_or_else(|| GenerateErrorType::UndefinedVariable(variable.clone()))
}
