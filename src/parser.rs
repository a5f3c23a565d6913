// src/parser.rs
use crate::errors::{ProfileError, Result};
use tracing::debug;

/// A raw `name = value` statement, before schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
    /// 1-based line in the source text, or 1-based position for arguments.
    pub line: usize,
}

/// Parse the `custom.py` dialect: blank lines, `#` comments, triple-quoted
/// docstrings and `name = "value"` statements.
pub fn parse_document(input: &str) -> Result<Vec<Assignment>> {
    let mut p = Parser::new(input);
    let mut out = Vec::new();
    loop {
        p.skip_trivia();
        if p.eof() {
            break;
        }
        if p.peek_str("\"\"\"") || p.peek_str("'''") {
            p.skip_docstring()?;
            p.end_statement()?;
            continue;
        }
        out.push(p.parse_assignment()?);
    }
    Ok(out)
}

/// Parse one `name=value` build argument. The value may be bare or quoted.
pub fn parse_argument(arg: &str, position: usize) -> Result<Assignment> {
    let mut p = Parser::new(arg);
    p.line = position;
    let name = p.parse_identifier()?;
    p.expect('=')?;
    let value = if matches!(p.peek_char(), Some('"') | Some('\'')) {
        let v = p.parse_quoted_string()?;
        if !p.eof() {
            return Err(p.error("trailing input after quoted value"));
        }
        v
    } else {
        p.rest().to_string()
    };
    Ok(Assignment {
        name,
        value,
        line: position,
    })
}

/// Split a build command line into `name=value` tokens. Whitespace inside
/// quotes belongs to the token; quotes and escapes are left for
/// [`parse_argument`] to interpret.
pub fn split_arguments(line: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut token = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                token.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        token.push(next);
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !token.is_empty() {
                    out.push(std::mem::take(&mut token));
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                token.push(c);
            }
        }
    }
    if quote.is_some() {
        return Err(ProfileError::Syntax {
            line: out.len() + 1,
            message: "unterminated quoted argument".into(),
        });
    }
    if !token.is_empty() {
        out.push(token);
    }
    Ok(out)
}

/// Double-quoted form of `value`, escaped so that [`parse_document`] and
/// [`parse_argument`] read back exactly `value`.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Argument form of `value`: bare when that reads back unchanged, quoted
/// otherwise.
pub fn quote_argument(value: &str) -> String {
    let bare = !value.is_empty()
        && !value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'));
    if bare {
        value.to_string()
    } else {
        quote(value)
    }
}

pub struct Parser<'a> {
    s: &'a str,
    i: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0, line: 1 }
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let line = self.line;
        let name = self.parse_identifier()?;
        self.skip_inline_ws();
        self.expect('=')?;
        self.skip_inline_ws();
        if !matches!(self.peek_char(), Some('"') | Some('\'')) {
            return Err(self.error(format!("value of `{name}` must be a quoted string")));
        }
        let value = self.parse_quoted_string()?;
        self.end_statement()?;
        debug!(%name, %value, line, "parsed assignment");
        Ok(Assignment { name, value, line })
    }

    pub fn parse_identifier(&mut self) -> Result<String> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            let ok = c == '_' || c.is_ascii_alphabetic() || (self.i > start && c.is_ascii_digit());
            if ok {
                self.bump();
            } else {
                break;
            }
        }
        if self.i == start {
            return Err(self.error("identifier expected"));
        }
        Ok(self.s[start..self.i].to_string())
    }

    pub fn parse_quoted_string(&mut self) -> Result<String> {
        let quote = self.peek_char().ok_or_else(|| self.error("string expected"))?;
        if quote != '\'' && quote != '"' {
            return Err(self.error("expected quoted string"));
        }
        self.bump();
        let mut out = String::new();
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.bump();
            if c == quote {
                return Ok(out);
            }
            if c == '\\' {
                match self.peek_char() {
                    Some('\n') | None => break,
                    Some(nc) => {
                        self.bump();
                        match nc {
                            'n' => out.push('\n'),
                            't' => out.push('\t'),
                            'r' => out.push('\r'),
                            '\\' => out.push('\\'),
                            '"' => out.push('"'),
                            '\'' => out.push('\''),
                            _ => {
                                out.push('\\');
                                out.push(nc);
                            }
                        }
                    }
                }
            } else {
                out.push(c);
            }
        }
        Err(self.error("unterminated string"))
    }

    fn skip_docstring(&mut self) -> Result<()> {
        let line = self.line;
        let delim = if self.peek_str("\"\"\"") { "\"\"\"" } else { "'''" };
        self.advance(delim.len());
        while !self.eof() {
            if self.peek_str(delim) {
                self.advance(delim.len());
                return Ok(());
            }
            self.bump();
        }
        Err(ProfileError::Syntax {
            line,
            message: "unterminated docstring".into(),
        })
    }

    /// After a statement only whitespace and an optional comment may follow
    /// on the same line.
    fn end_statement(&mut self) -> Result<()> {
        self.skip_inline_ws();
        if self.peek_char() == Some('#') {
            self.skip_comment();
        }
        match self.peek_char() {
            None => Ok(()),
            Some('\n') => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("unexpected `{c}` after statement"))),
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => self.bump(),
                Some('#') => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_inline_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.bump();
            } else {
                break;
            }
        }
    }

    pub fn expect(&mut self, c: char) -> Result<()> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{c}'")))
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek_char() {
            if c == '\n' {
                self.line += 1;
            }
            self.i += c.len_utf8();
        }
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> ProfileError {
        ProfileError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
