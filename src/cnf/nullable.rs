use std::collections::BTreeSet;

use crate::grammar::*;

fn derives_empty_with(production: &Production, nullable: &BTreeSet<Variable>) -> bool {
    // An empty right-hand side passes trivially
    production.rhs.iter().all(|symbol| match symbol {
        Symbol::Variable(v) => nullable.contains(v),
        Symbol::Terminal(_) => false
    })
}

// Returns every variable that can derive the empty string
pub fn nullable_variables(grammar: &Grammar) -> BTreeSet<Variable> {
    let mut nullable = BTreeSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for production in &grammar.productions {
            if nullable.contains(&production.lhs) {
                continue;
            }
            if derives_empty_with(production, &nullable) {
                nullable.insert(production.lhs.clone());
                changed = true;
            }
        }
    }
    nullable
}
