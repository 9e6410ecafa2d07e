use itertools::{Itertools, PeekingNext};

use crate::grammar::Variable;
use super::{ParseErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Colon,
    Variable(Variable),
    Terminal(char)
}

pub fn lex_bracketed(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open bracket
    let name: String = line.peeking_take_while(|&c| c != '>' && c != '<').collect();

    // Check if there is a close bracket and consume it if there is
    if line.next() != Some('>') {
        return Err(ParseErrorType::UnmatchedBracket);
    }
    if name.is_empty() {
        return Err(ParseErrorType::EmptyVariable);
    }

    Ok(Token::Variable(Variable::new(name)))
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == ':' {
            line_chars.next();
            tokens.push(Token::Colon);
        } else if c == '<' {
            tokens.push(lex_bracketed(&mut line_chars)?);
        } else if c == '>' {
            return Err(ParseErrorType::UnexpectedBracket);
        } else if c.is_ascii_alphabetic() {
            line_chars.next();
            tokens.push(Token::Variable(Variable::new(c.to_string())));
        } else if !c.is_whitespace() {
            line_chars.next();
            tokens.push(Token::Terminal(c));
        } else {
            line_chars.next();
        }
    }

    return Ok(tokens);
}
