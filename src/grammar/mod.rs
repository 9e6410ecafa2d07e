/*
    This module is for storing and manipulating grammars
*/

use std::collections::BTreeSet;
use std::fmt::Display;

// Prefixes of the names handed out by `Grammar::fresh_variable`. Parsed
// grammars only name variables with one letter unless they use brackets, and
// `fresh_variable` still checks every candidate against the grammar.
pub const CHAIN_PREFIX: &str = "C";
pub const WRAPPER_PREFIX: &str = "T";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

// The base unit in a grammar rule. Terminals order before variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(char),
    Variable(Variable),
}

impl Symbol {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Symbol::Variable(v) => Some(v),
            Symbol::Terminal(_) => None,
        }
    }
}

impl From<Variable> for Symbol {
    fn from(variable: Variable) -> Self {
        Symbol::Variable(variable)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Variable(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    pub lhs: Variable,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Variable, rhs: Vec<Symbol>) -> Self {
        Production { lhs, rhs }
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    // A -> B
    pub fn is_unit(&self) -> bool {
        self.unit_target().is_some()
    }

    // The B of a unit production A -> B
    pub fn unit_target(&self) -> Option<&Variable> {
        match self.rhs.as_slice() {
            [Symbol::Variable(v)] => Some(v),
            _ => None,
        }
    }

    // A -> a
    pub fn is_terminal_only(&self) -> bool {
        matches!(self.rhs.as_slice(), [Symbol::Terminal(_)])
    }

    // A -> B C
    pub fn is_binary(&self) -> bool {
        matches!(self.rhs.as_slice(), [Symbol::Variable(_), Symbol::Variable(_)])
    }

    fn mentions(&self, variable: &Variable) -> bool {
        self.lhs == *variable || self.rhs.iter().any(|s| s.as_variable() == Some(variable))
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub start: Variable,
    pub productions: BTreeSet<Production>,
    next_id: usize,
}

impl Grammar {
    pub fn new(start: Variable, productions: impl IntoIterator<Item = Production>) -> Self {
        Grammar {
            start,
            productions: productions.into_iter().collect(),
            next_id: 0
        }
    }

    // A grammar for the next stage of a pipeline: same start, same counter,
    // new productions
    pub fn derive(&self, productions: BTreeSet<Production>) -> Self {
        Grammar {
            start: self.start.clone(),
            productions,
            next_id: self.next_id
        }
    }

    pub fn productions_of<'a>(&'a self, variable: &'a Variable) -> impl Iterator<Item = &'a Production> + 'a {
        self.productions.iter().filter(move |p| p.lhs == *variable)
    }

    // Every variable appearing anywhere in the grammar, the start included
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut variables = BTreeSet::new();
        variables.insert(self.start.clone());
        for production in &self.productions {
            variables.insert(production.lhs.clone());
            variables.extend(production.rhs.iter().filter_map(Symbol::as_variable).cloned());
        }
        variables
    }

    pub fn mentions(&self, variable: &Variable) -> bool {
        self.start == *variable || self.productions.iter().any(|p| p.mentions(variable))
    }

    // Returns a variable whose name is not used anywhere in the grammar and
    // was never returned before by this grammar's counter
    pub fn fresh_variable(&mut self, prefix: &str) -> Variable {
        loop {
            let candidate = Variable::new(format!("{}{}", prefix, self.next_id));
            self.next_id += 1;
            if !self.mentions(&candidate) {
                return candidate;
            }
        }
    }
}

// Grammars are equal when they have the same start and productions, whatever
// names their counters have handed out
impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.productions == other.productions
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.productions.len())?;
        for production in self.productions_of(&self.start) {
            writeln!(f, "{}", production)?;
        }
        for production in self.productions.iter().filter(|p| p.lhs != self.start) {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}
