use std::collections::BTreeMap;

use itertools::Itertools;

use crate::grammar::*;
use super::{ConvertErrorType, Result};

// Terminal wrappers handed out so far, one per terminal
type Wrappers = BTreeMap<char, Variable>;

fn wrapper_for(terminal: char, grammar: &mut Grammar, wrappers: &mut Wrappers) -> Variable {
    if let Some(wrapper) = wrappers.get(&terminal) {
        return wrapper.clone();
    }

    let wrapper = grammar.fresh_variable(WRAPPER_PREFIX);
    grammar.productions.insert(Production::new(wrapper.clone(), vec![Symbol::Terminal(terminal)]));
    wrappers.insert(terminal, wrapper.clone());
    wrapper
}

// Splits A -> X1 X2 ... Xn into A -> X1 C1, C1 -> X2 C2, ..., Ck -> Xn-1 Xn
fn chain(lhs: Variable, rhs: &[Variable], grammar: &mut Grammar) -> Vec<Production> {
    let mut productions = Vec::with_capacity(rhs.len() - 1);
    let mut lhs = lhs;
    let mut rest = rhs;
    while rest.len() > 2 {
        let next = grammar.fresh_variable(CHAIN_PREFIX);
        productions.push(Production::new(lhs, vec![rest[0].clone().into(), next.clone().into()]));
        lhs = next;
        rest = &rest[1..];
    }
    productions.push(Production::new(lhs, vec![rest[0].clone().into(), rest[1].clone().into()]));
    productions
}

// Turns a grammar without epsilon or unit productions into Chomsky normal
// form: terminals inside longer right-hand sides are replaced by wrapper
// variables, then every right-hand side longer than two is chained.
pub fn binarize(grammar: Grammar) -> Result<Grammar> {
    let mut grammar = grammar;
    let mut wrappers = Wrappers::new();

    let originals = grammar.productions.iter().cloned().collect_vec();
    for production in originals {
        match production.rhs.len() {
            0 => return Err(ConvertErrorType::EpsilonProduction(production)),
            1 if production.is_unit() => return Err(ConvertErrorType::UnitProduction(production)),
            1 => continue,
            _ => {}
        }

        let rhs = production.rhs.iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(c) => wrapper_for(*c, &mut grammar, &mut wrappers),
                Symbol::Variable(v) => v.clone()
            })
            .collect_vec();
        let replacements = chain(production.lhs.clone(), &rhs, &mut grammar);

        // The original goes only after its replacements exist, so its names
        // stay taken while fresh variables are handed out
        let unchanged = replacements.contains(&production);
        grammar.productions.extend(replacements);
        if !unchanged {
            grammar.productions.remove(&production);
        }
    }

    Ok(grammar)
}
