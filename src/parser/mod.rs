/*
    This module parses grammar files

    A grammar file starts with the number of productions, followed by one
    production per line in the form `<Variable>:<rhs>`. Whatever follows the
    productions is kept for the caller.
*/

mod lexer;

use std::fmt::Display;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;

#[derive(Debug)]
pub enum ParseErrorType {
    // The file has no production count
    MissingCount,
    // The production count is not a positive integer
    InvalidCount(String),
    // The file ends before all the announced productions were read
    MissingProductions { expected: usize, found: usize },
    // A production has no `:` after its variable
    MissingColon,
    // A production starts with something other than a variable
    MissingVariable,
    // A `<` is never closed
    UnmatchedBracket,
    // A `>` appears outside of a variable name
    UnexpectedBracket,
    // `<>` names nothing
    EmptyVariable,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for ParseErrorType {}

impl PartialEq for ParseErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParseErrorType::FileError(a), ParseErrorType::FileError(b)) => a.kind() == b.kind(),
            (ParseErrorType::InvalidCount(a), ParseErrorType::InvalidCount(b)) => a == b,
            (
                ParseErrorType::MissingProductions { expected: a, found: b },
                ParseErrorType::MissingProductions { expected: c, found: d }
            ) => a == c && b == d,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::MissingCount => write!(f, "Expected a production count"),
            ParseErrorType::InvalidCount(text) => write!(f, "Expected a positive production count, found `{}`", text),
            ParseErrorType::MissingProductions { expected, found } =>
                write!(f, "Unexpected end of input: expected {} productions, found {}", expected, found),
            ParseErrorType::MissingColon => write!(f, "Expected `:` after variable"),
            ParseErrorType::MissingVariable => write!(f, "Tried to define something other than a variable"),
            ParseErrorType::UnmatchedBracket => write!(f, "Unmatched `<`"),
            ParseErrorType::UnexpectedBracket => write!(f, "Unexpected `>` encountered"),
            ParseErrorType::EmptyVariable => write!(f, "Empty variable name `<>`"),
            ParseErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;
pub type ParseErrors = Errors<ParseErrorType>;

pub type Result<T> = std::result::Result<T, ParseErrorType>;
pub type LineResult<T> = std::result::Result<T, ParseError>;
pub type FileResult<T> = std::result::Result<T, ParseErrors>;

// A parsed grammar and the text that followed it
#[derive(Debug, PartialEq)]
pub struct Document {
    pub grammar: Grammar,
    pub rest: String
}

impl Document {
    // The first whitespace-delimited word after the grammar, or the empty
    // word if there is none
    pub fn word(&self) -> &str {
        self.rest.split_whitespace().next().unwrap_or("")
    }
}

fn parse_rhs(tokens: &[Token]) -> Vec<Symbol> {
    tokens.iter().map(|t| match t {
        Token::Colon => Symbol::Terminal(':'),
        Token::Terminal(c) => Symbol::Terminal(*c),
        Token::Variable(v) => Symbol::Variable(v.clone())
    }).collect()
}

fn parse_line(tokens: &[Token]) -> Result<Production> {
    let lhs = match tokens.get(0) {
        Some(Token::Variable(v)) => Ok(v.clone()),
        _ => Err(ParseErrorType::MissingVariable)
    }?;

    if tokens.get(1) != Some(&Token::Colon) {
        return Err(ParseErrorType::MissingColon)
    }

    return Ok(Production::new(lhs, parse_rhs(&tokens[2..])));
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Production> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line))
        .map_err(|error| ParseError { location, error })
}

fn parse_count(text: &str) -> Result<usize> {
    match text.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ParseErrorType::InvalidCount(text.trim().to_string()))
    }
}

fn is_content_line(line: &str) -> bool {
    !line.trim().is_empty()
}

pub fn parse_str(text: &str, path: &Path) -> FileResult<Document> {
    let location = |line| Location { file: path.to_path_buf(), line };

    let mut lines = text.lines()
        .enumerate()
        .map(|(num, line)| (num + 1, line))
        .filter(|(_, line)| is_content_line(line));

    let (count_num, count_line) = lines.next()
        .ok_or_else(|| vec![ParseError::in_file(path, ParseErrorType::MissingCount)])?;
    let count = parse_count(count_line)
        .map_err(|error| vec![ParseError { location: location(count_num), error }])?;

    let production_lines = lines.by_ref().take(count).collect_vec();
    let rest = lines.map(|(_, line)| line).join("\n");

    let mut errors = Vec::new();
    if production_lines.len() < count {
        errors.push(ParseError::in_file(path, ParseErrorType::MissingProductions {
            expected: count,
            found: production_lines.len()
        }));
    }

    let (productions, line_errors): (Vec<_>, Vec<_>) = production_lines.into_iter()
        .map(|(num, line)| parse_lex_line(line.trim(), location(num)))
        .partition_result();
    errors.extend(line_errors);

    if errors.len() > 0 {
        return Err(errors);
    }

    // At least one production was read, since the count is positive
    let start = productions[0].lhs.clone();
    return Ok(Document {
        grammar: Grammar::new(start, productions),
        rest
    });
}

// Reads a document from a file, or from standard input when no path (or `-`)
// is given
pub fn read_document(path: Option<&Path>) -> FileResult<Document> {
    let (text, name) = match path {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| vec![ParseError::in_file(path, ParseErrorType::FileError(e))])?;
            (text, path.to_path_buf())
        }
        _ => {
            let name = PathBuf::from(STDIN_NAME);
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)
                .map_err(|e| vec![ParseError::in_file(&name, ParseErrorType::FileError(e))])?;
            (text, name)
        }
    };

    parse_str(&text, &name)
}
