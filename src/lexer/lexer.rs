use std::rc::Rc;

use log::{debug, trace};
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).expect("lexer pattern must be a valid regex"),
            handler,
        }
    }
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        // Patterns are tried in order; longer operators must come before their prefixes.
        Lexer {
            pos: 0,
            line: 1,
            column: 1,
            tokens: vec![],
            patterns: vec![
                RegexPattern::new(r"^\s+", skip_handler),
                RegexPattern::new(r"^//[^\n]*", skip_handler),
                RegexPattern::new(r"^/\*(?s:.)*?\*/", skip_handler),
                RegexPattern::new(r#"^#?include\s*(<[^>\n]*>|"[^"\n]*")"#, include_handler),
                RegexPattern::new(r"^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
                RegexPattern::new(r"^[0-9]+\.[0-9]+", float_handler),
                RegexPattern::new(r"^[0-9]+", int_handler),
                RegexPattern::new(r#"^"(\\.|[^"\\])*""#, string_handler),
                RegexPattern::new(r"^'(\\.|[^'\\])'", char_handler),
                RegexPattern::new(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
                RegexPattern::new(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
                RegexPattern::new(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
                RegexPattern::new(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
                RegexPattern::new(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
                RegexPattern::new(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
                RegexPattern::new(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
                RegexPattern::new(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
                RegexPattern::new(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
                RegexPattern::new(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
                RegexPattern::new(r"^<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
                RegexPattern::new(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
                RegexPattern::new(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
                RegexPattern::new(r"^>>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
                RegexPattern::new(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
                RegexPattern::new(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
                RegexPattern::new(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
                RegexPattern::new(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
                RegexPattern::new(r"^\|", MK_DEFAULT_HANDLER!(TokenKind::BitOr, "|")),
                RegexPattern::new(r"^&", MK_DEFAULT_HANDLER!(TokenKind::BitAnd, "&")),
                RegexPattern::new(r"^\^", MK_DEFAULT_HANDLER!(TokenKind::BitXor, "^")),
                RegexPattern::new(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
                RegexPattern::new(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
                RegexPattern::new(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
                RegexPattern::new(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
                RegexPattern::new(r"^\+\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
                RegexPattern::new(r"^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
                RegexPattern::new(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
                RegexPattern::new(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
                RegexPattern::new(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
                RegexPattern::new(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
                RegexPattern::new(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
            ],
            source,
            file: file_name,
        }
    }

    /// Moves the cursor `n` bytes forward, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());

        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        trace!("token {}", token.debug());
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Consumes `length` bytes and pushes a token covering them.
    fn push_spanning(&mut self, kind: TokenKind, value: String, length: usize) {
        let start = self.position();
        self.advance_n(length);
        let end = self.position();
        self.push(MK_TOKEN!(kind, value, Span::new(start, end)));
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex
        .find(lexer.remainder())
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
}

fn int_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    let length = matched.len();
    lexer.push_spanning(TokenKind::IntLiteral, matched, length);
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    let length = matched.len();
    lexer.push_spanning(TokenKind::FloatLiteral, matched, length);
}

fn include_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(captures) = regex.captures(lexer.remainder()) else {
        return;
    };

    let length = captures[0].len();
    let delimited = &captures[1];
    let header = delimited[1..delimited.len() - 1].to_string();

    lexer.push_spanning(TokenKind::Include, header, length);
}

/// Resolves backslash escapes inside a string or character literal body.
pub fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(other) => {
                // Unknown escape, keep it as written
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    let value = unescape(&matched[1..matched.len() - 1]);
    lexer.push_spanning(TokenKind::StringLiteral, value, matched.len());
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    let value = unescape(&matched[1..matched.len() - 1]);
    lexer.push_spanning(TokenKind::CharLiteral, value, matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = matched_text(lexer, regex);
    let length = value.len();

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push_spanning(*kind, value, length);
    } else {
        lexer.push_spanning(TokenKind::Identifier, value, length);
    }
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for index in 0..lex.patterns.len() {
            if lex.patterns[index].regex.is_match(lex.remainder()) {
                let handler = lex.patterns[index].handler;
                let regex = lex.patterns[index].regex.clone();
                handler(&mut lex, &regex);
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.at().map(String::from).unwrap_or_default();
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken { token },
                lex.position(),
            ));
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::new(end, end)));

    debug!("lexed {} tokens from {}", lex.tokens.len(), lex.file());
    Ok(lex.tokens)
}
