//! Lexer (tokenizer) for the bench description language.

use crate::error::{BenchError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the bench language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Hole name, declaration id, keyword
    Identifier,
    /// Number, possibly with an SI suffix (`10k`, `100m`)
    Number,
    /// Directive (starts with '.')
    Directive,
    OpenParen,
    CloseParen,
    Equals,
    Newline,
    Eof,
}

/// Lexer for tokenizing bench descriptions.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let token = |kind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(ch) = self.chars.peek().copied() else {
            return Ok(token(TokenKind::Eof, String::new()));
        };

        let tok = match ch {
            '\n' => {
                self.advance();
                token(TokenKind::Newline, "\n".to_string())
            }
            '(' => {
                self.advance();
                token(TokenKind::OpenParen, "(".to_string())
            }
            ')' => {
                self.advance();
                token(TokenKind::CloseParen, ")".to_string())
            }
            '=' => {
                self.advance();
                token(TokenKind::Equals, "=".to_string())
            }
            '.' => {
                self.advance();
                if self.chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    let text = format!(".{}", self.read_numeric_word());
                    token(TokenKind::Number, text)
                } else {
                    let name = self.read_identifier();
                    if name.is_empty() {
                        return Err(BenchError::lexer(line, column, "expected directive name after '.'"));
                    }
                    token(TokenKind::Directive, format!(".{}", name))
                }
            }
            '-' | '+' | '0'..='9' => {
                let text = self.read_numeric_word();
                if parse_value(&text).is_some() {
                    token(TokenKind::Number, text)
                } else if text.starts_with(|c: char| c.is_ascii_digit()) {
                    token(TokenKind::Identifier, text)
                } else {
                    return Err(BenchError::lexer(line, column, format!("malformed number '{}'", text)));
                }
            }
            _ if ch.is_alphabetic() || ch == '_' => token(TokenKind::Identifier, self.read_identifier()),
            _ => {
                return Err(BenchError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(tok)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' | ';' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    /// Read a word that starts like a number: sign, digits, '.', exponent
    /// and trailing letters (unit suffixes, or the rest of an id like `1A`).
    fn read_numeric_word(&mut self) -> String {
        let mut text = String::new();
        if let Some(&sign @ ('-' | '+')) = self.chars.peek() {
            text.push(sign);
            self.advance();
        }

        while let Some(&ch) = self.chars.peek() {
            let exponent_sign = (ch == '-' || ch == '+')
                && text.ends_with(['e', 'E'])
                && text.trim_start_matches(['-', '+']).starts_with(|c: char| c.is_ascii_digit() || c == '.');
            if ch.is_alphanumeric() || ch == '.' || ch == '_' || exponent_sign {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

/// Parse a number string with optional SI suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;
    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };

    let digits = if multiplier == 1.0 {
        text
    } else {
        &text[..text.len() - last.len_utf8()]
    };

    // Rust's float parser also accepts "inf" and "NaN"; require a digit.
    if !digits.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            out.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return out;
            }
        }
    }

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("100m").unwrap(), 0.1);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("-12.5").unwrap(), -12.5);
        assert_relative_eq!(parse_value("1e-3").unwrap(), 1e-3);
        assert!(parse_value("abc").is_none());
        assert!(parse_value("inf").is_none());
        assert!(parse_value("").is_none());
    }

    #[test]
    fn test_lexer_hole_line() {
        assert_eq!(
            kinds("HOLE psu 100 -20 (own=PSU target=R1)"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::OpenParen,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Identifier,
                TokenKind::CloseParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_directive_and_comment() {
        let mut lexer = Lexer::new("# header\n.snap 30 ; radius\n");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Directive);
        assert_eq!(tok.text, ".snap");
        assert_eq!(tok.line, 2);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "30");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);
    }

    #[test]
    fn test_lexer_exponent_and_digit_ids() {
        let mut lexer = Lexer::new("1e-9 1A");
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "1e-9");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "1A");
    }

    #[test]
    fn test_lexer_rejects_stray_character() {
        let mut lexer = Lexer::new("HOLE a 1 2 @");
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, BenchError::LexerError { column: 12, .. }));
    }
}
