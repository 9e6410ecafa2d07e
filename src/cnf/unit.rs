use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::grammar::*;

// Pairs (A, B) such that A derives B through zero or more unit productions.
// The relation is reflexive: (A, A) is present for every variable of the
// grammar, so A keeps its own non-unit productions when the closure is
// expanded.
pub fn unit_closure(grammar: &Grammar) -> BTreeSet<(Variable, Variable)> {
    let mut unit_edges: BTreeMap<&Variable, Vec<&Variable>> = BTreeMap::new();
    for production in &grammar.productions {
        if let Some(target) = production.unit_target() {
            unit_edges.entry(&production.lhs).or_default().push(target);
        }
    }

    let mut closure = BTreeSet::new();
    for variable in grammar.variables() {
        // Breadth first, seeded with the variable itself
        let mut visited = BTreeSet::from([&variable]);
        let mut queue = VecDeque::from([&variable]);
        while let Some(current) = queue.pop_front() {
            for &next in unit_edges.get(current).into_iter().flatten() {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        closure.extend(visited.into_iter().map(|target| (variable.clone(), target.clone())));
    }
    closure
}

// Replaces unit productions by the non-unit productions they lead to
pub fn remove_unit_productions(grammar: Grammar) -> Grammar {
    let closure = unit_closure(&grammar);

    let mut non_unit: BTreeMap<&Variable, Vec<&Production>> = BTreeMap::new();
    for production in grammar.productions.iter().filter(|p| !p.is_unit()) {
        non_unit.entry(&production.lhs).or_default().push(production);
    }

    let mut productions: BTreeSet<Production> = non_unit.values().flatten().map(|&p| p.clone()).collect();
    for (from, to) in &closure {
        for production in non_unit.get(to).into_iter().flatten() {
            productions.insert(Production::new(from.clone(), production.rhs.clone()));
        }
    }

    grammar.derive(productions)
}
