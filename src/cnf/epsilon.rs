use std::collections::BTreeSet;

use itertools::Itertools;

use crate::grammar::*;

// Every way of dropping nullable variables from a production's right-hand
// side, except the one that leaves nothing
pub fn epsilon_combinations(production: &Production, nullable: &BTreeSet<Variable>) -> BTreeSet<Production> {
    let nullable_positions = production.rhs.iter()
        .positions(|symbol| symbol.as_variable().is_some_and(|v| nullable.contains(v)))
        .collect_vec();

    nullable_positions.into_iter()
        .powerset()
        .map(|dropped| production.rhs.iter()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, symbol)| symbol.clone())
            .collect_vec())
        .filter(|rhs| !rhs.is_empty())
        .map(|rhs| Production::new(production.lhs.clone(), rhs))
        .collect()
}

// Rewrites the grammar so that no production has an empty right-hand side.
// The empty string itself is lost; callers that care keep the start
// variable's nullability separately.
pub fn remove_epsilon(grammar: Grammar, nullable: &BTreeSet<Variable>) -> Grammar {
    let productions = grammar.productions.iter()
        .flat_map(|production| epsilon_combinations(production, nullable))
        .collect();
    grammar.derive(productions)
}
