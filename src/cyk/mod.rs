/*
    This module decides membership with the Cocke-Younger-Kasami algorithm
*/

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use crate::cnf::NormalForm;
use crate::grammar::*;

// The variables deriving one substring, each listed once
type Cell = Vec<usize>;

pub struct Recognizer {
    start: usize,
    derives_empty: bool,
    variable_count: usize,
    // a -> every A with A -> a
    terminals: HashMap<char, Vec<usize>>,
    // (B, C) -> every A with A -> B C
    pairs: HashMap<(usize, usize), Vec<usize>>,
}

impl Recognizer {
    pub fn new(normal: &NormalForm) -> Self {
        let grammar = normal.grammar();
        let variables = grammar.variables();
        let index: BTreeMap<&Variable, usize> = variables.iter()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();

        let mut terminals: HashMap<char, Vec<usize>> = HashMap::new();
        let mut pairs: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for production in &grammar.productions {
            let lhs = index[&production.lhs];
            match production.rhs.as_slice() {
                [Symbol::Terminal(c)] => terminals.entry(*c).or_default().push(lhs),
                [Symbol::Variable(b), Symbol::Variable(c)] => pairs.entry((index[b], index[c])).or_default().push(lhs),
                // NormalForm only holds the two shapes above
                _ => {}
            }
        }

        Recognizer {
            start: index[&grammar.start],
            derives_empty: normal.derives_empty(),
            variable_count: variables.len(),
            terminals,
            pairs
        }
    }

    pub fn accepts(&self, word: &str) -> bool {
        let word = word.chars().collect_vec();
        let n = word.len();
        if n == 0 {
            return self.derives_empty;
        }

        // table[d][i] holds the variables deriving word[i..=i + d]
        let mut table: Vec<Vec<Cell>> = Vec::with_capacity(n);
        let base = word.iter()
            .map(|c| self.terminals.get(c).cloned().unwrap_or_default())
            .collect_vec();
        // A character no production covers rules out every longer span too
        if base.iter().any(Cell::is_empty) {
            return false;
        }
        table.push(base);

        // One membership bitmap shared by every cell, cleared after each fill
        let mut seen = vec![false; self.variable_count];
        for d in 1..n {
            let row = (0..n - d)
                .map(|i| self.fill(&table, i, i + d, &mut seen))
                .collect_vec();
            table.push(row);
        }

        table[n - 1][0].contains(&self.start)
    }

    fn fill(&self, table: &[Vec<Cell>], i: usize, j: usize, seen: &mut [bool]) -> Cell {
        let mut cell = Cell::new();
        for k in i..j {
            let left = &table[k - i][i];
            let right = &table[j - k - 1][k + 1];
            for (&b, &c) in left.iter().cartesian_product(right.iter()) {
                for &a in self.pairs.get(&(b, c)).into_iter().flatten() {
                    if !seen[a] {
                        seen[a] = true;
                        cell.push(a);
                    }
                }
            }
        }
        for &a in &cell {
            seen[a] = false;
        }
        cell
    }
}

pub fn cyk(normal: &NormalForm, word: &str) -> bool {
    Recognizer::new(normal).accepts(word)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};
    use std::iter::{repeat, repeat_with};

    use rand::prelude::*;

    use super::*;
    use crate::cnf::to_cnf;
    use crate::generator::generate;
    use crate::grammar::tests::grammar;

    fn normal(start: &str, productions: &[(&str, &str)]) -> NormalForm {
        to_cnf(grammar(start, productions)).unwrap()
    }

    #[test]
    fn concatenation() {
        let g = normal("S", &[("S", "AB"), ("A", "a"), ("B", "b")]);

        assert!(cyk(&g, "ab"));
        assert!(!cyk(&g, "ba"));
        assert!(!cyk(&g, "a"));
        assert!(!cyk(&g, "abb"));
        assert!(!cyk(&g, ""));
    }

    #[test]
    fn cnf_input_without_conversion() {
        let g = NormalForm::assume(grammar("S", &[("S", "AB"), ("A", "1"), ("B", "2")])).unwrap();

        assert!(cyk(&g, "12"));
        assert!(!cyk(&g, "21"));
    }

    #[test]
    fn cyclic_unit_chain() {
        let g = normal("S", &[("S", "A"), ("A", "B"), ("B", "S"), ("S", "1")]);

        assert!(cyk(&g, "1"));
        assert!(!cyk(&g, "11"));
    }

    #[test]
    fn ambiguous_grammar_answers_once() {
        // E + E + E has two derivations
        let g = normal("E", &[("E", "E+E"), ("E", "1")]);
        let recognizer = Recognizer::new(&g);

        assert!(recognizer.accepts("1+1+1"));
        assert!(recognizer.accepts("1"));
        assert!(!recognizer.accepts("1+"));
        assert!(!recognizer.accepts("+1"));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let g = normal("S", &[("S", "AB"), ("A", "1"), ("B", "2")]);
        assert!(!cyk(&g, "1x"));
    }

    #[test]
    fn empty_word_follows_start_nullability() {
        let nullable = normal("S", &[("S", "(S)S"), ("S", "")]);
        assert!(cyk(&nullable, ""));
        assert!(cyk(&nullable, "()(())"));
        assert!(!cyk(&nullable, "(()"));

        let not_nullable = normal("S", &[("S", "(S)"), ("S", "A1"), ("A", "")]);
        assert!(!cyk(&not_nullable, ""));
        assert!(cyk(&not_nullable, "(1)"));
        assert!(cyk(&not_nullable, "1"));
    }

    #[test]
    fn cells_list_each_variable_once() {
        // Both splits of "111" derive S through S -> S S
        let g = NormalForm::assume(grammar("S", &[("S", "SS"), ("S", "1")])).unwrap();
        let recognizer = Recognizer::new(&g);
        let table = vec![vec![vec![0]; 3], vec![vec![0]; 2]];
        let mut seen = vec![false; 1];

        assert_eq!(recognizer.fill(&table, 0, 2, &mut seen), vec![0]);
        assert_eq!(seen, vec![false]);
        assert!(recognizer.accepts("111"));
    }

    #[test]
    fn long_words() {
        let g = normal("S", &[("S", "0S1"), ("S", "01")]);
        let balanced = repeat('0').take(30).chain(repeat('1').take(30)).collect::<String>();
        let unbalanced = repeat('0').take(30).chain(repeat('1').take(29)).collect::<String>();

        assert!(cyk(&g, &balanced));
        assert!(!cyk(&g, &unbalanced));
    }

    // Every word sampled from the original grammar is accepted by its normal form
    fn check_language_kept(start: &str, productions: &[(&str, &str)]) {
        let original = grammar(start, productions);
        let recognizer = Recognizer::new(&to_cnf(original.clone()).unwrap());
        let mut rng = StdRng::seed_from_u64(0x5eed);

        let words = repeat_with(|| generate(&original, 24, &mut rng))
            .filter_map(Result::ok)
            .filter(|word| word.len() <= 30)
            .take(40)
            .collect_vec();

        for word in words {
            assert!(recognizer.accepts(&word), "`{}` should be accepted", word);
        }
    }

    // Decides membership on a grammar in any form: grows the set of
    // (variable, from, to) spans it derives until nothing changes
    fn derives(g: &Grammar, word: &str) -> bool {
        let chars = word.chars().collect_vec();
        let word = &chars;
        let n = word.len();
        let mut spans: HashSet<(&Variable, usize, usize)> = HashSet::new();

        let mut changed = true;
        while changed {
            changed = false;
            for production in &g.productions {
                for from in 0..=n {
                    let known = &spans;
                    let mut ends = BTreeSet::from([from]);
                    for symbol in &production.rhs {
                        ends = ends.iter()
                            .flat_map(|&p| (p..=n).filter(move |&q| match symbol {
                                Symbol::Terminal(c) => q == p + 1 && word[p] == *c,
                                Symbol::Variable(v) => known.contains(&(v, p, q)),
                            }))
                            .collect();
                    }
                    for to in ends {
                        changed |= spans.insert((&production.lhs, from, to));
                    }
                }
            }
        }

        spans.contains(&(&g.start, 0, n))
    }

    // Every word over the grammar's terminals up to `max_len` gets the same
    // answer from the normal form as from the original grammar
    fn check_same_answers(start: &str, productions: &[(&str, &str)], max_len: usize) {
        let original = grammar(start, productions);
        let recognizer = Recognizer::new(&to_cnf(original.clone()).unwrap());
        let alphabet: BTreeSet<char> = original.productions.iter()
            .flat_map(|p| p.rhs.iter())
            .filter_map(|s| match s {
                Symbol::Terminal(c) => Some(*c),
                Symbol::Variable(_) => None,
            })
            .collect();

        assert_eq!(recognizer.accepts(""), derives(&original, ""));
        for len in 1..=max_len {
            for word in itertools::repeat_n(alphabet.iter(), len).multi_cartesian_product() {
                let word: String = word.into_iter().collect();
                assert_eq!(recognizer.accepts(&word), derives(&original, &word), "answers differ on `{}`", word);
            }
        }
    }

    #[test]
    fn span_fixpoint_decides_membership() {
        let g = grammar("S", &[("S", "(S)S"), ("S", "")]);

        assert!(derives(&g, ""));
        assert!(derives(&g, "(())()"));
        assert!(!derives(&g, "(()"));
        assert!(!derives(&g, ")("));
    }

    #[test]
    fn conversion_rejects_what_the_grammar_rejects() {
        check_same_answers("S", &[("S", "(S)S"), ("S", "")], 6);
        check_same_answers("S", &[("S", "0S1"), ("S", "A"), ("A", "2A"), ("A", "")], 6);
        check_same_answers("E", &[
            ("E", "E+T"),
            ("E", "T"),
            ("T", "T*F"),
            ("T", "F"),
            ("F", "(E)"),
            ("F", "1")
        ], 5);
        check_same_answers("S", &[("S", "AbA"), ("A", "aA"), ("A", ""), ("A", "B"), ("B", "A"), ("B", "c")], 5);
        check_same_answers("S", &[("S", "SS"), ("S", "1"), ("S", "A"), ("A", "S")], 5);
    }

    #[test]
    fn conversion_keeps_the_language() {
        check_language_kept("S", &[("S", "(S)S"), ("S", ""), ("S", "0")]);
        check_language_kept("E", &[
            ("E", "E+T"),
            ("E", "T"),
            ("T", "T*F"),
            ("T", "F"),
            ("F", "(E)"),
            ("F", "0"),
            ("F", "1"),
            ("F", "2"),
            ("F", "3")
        ]);
        check_language_kept("S", &[("S", "AbA"), ("A", "aA"), ("A", ""), ("A", "B"), ("B", "A"), ("B", "c")]);
    }
}
