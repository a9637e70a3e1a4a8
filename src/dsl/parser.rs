//! Parser for the bench description language.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{BenchError, Result};

/// Most declarations a single hole may carry.
pub const MAX_DECLARATIONS: usize = 2;

/// Parser for bench descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser, reading the first token.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire bench description.
    pub fn parse(&mut self) -> Result<BenchAst> {
        let mut ast = BenchAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {}
                TokenKind::Directive => {
                    let directive = self.parse_directive()?;
                    ast.directives.push(directive);
                }
                TokenKind::Identifier if is_hole_keyword(&self.current.text) => {
                    let hole = self.parse_hole()?;
                    ast.holes.push(hole);
                }
                _ => {
                    return Err(BenchError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(BenchError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(BenchError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn parse_directive(&mut self) -> Result<DirectiveDef> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let kind = DirectiveKind::from_name(&name).ok_or_else(|| BenchError::UnknownDirective {
            directive: name.clone(),
            line,
        })?;

        let mut args = Vec::new();
        let mut value = None;
        let mut params = HashMap::new();

        while !self.at_line_end() {
            match self.current.kind {
                TokenKind::Identifier => {
                    let word = self.current.text.clone();
                    self.advance()?;

                    if self.current.kind == TokenKind::Equals {
                        self.advance()?;
                        let v = self.parse_number(line)?;
                        params.insert(word.to_lowercase(), v);
                    } else {
                        args.push(word);
                    }
                }
                TokenKind::Number => {
                    let v = self.parse_number(line)?;
                    if value.replace(v).is_some() {
                        return Err(BenchError::parse(
                            line,
                            format!("{} takes a single value", kind.name()),
                        ));
                    }
                }
                _ => {
                    return Err(BenchError::parse(
                        line,
                        format!("unexpected token in {}: {:?}", kind.name(), self.current.text),
                    ));
                }
            }
        }

        Ok(DirectiveDef {
            kind,
            args,
            value,
            params,
            line,
        })
    }

    fn parse_number(&mut self, line: usize) -> Result<f64> {
        let text = self.current.text.clone();
        if !matches!(self.current.kind, TokenKind::Number | TokenKind::Identifier) {
            return Err(BenchError::parse(line, "expected a number"));
        }
        self.advance()?;
        parse_value(&text).ok_or_else(|| BenchError::parse(line, format!("invalid number: {}", text)))
    }

    fn parse_hole(&mut self) -> Result<HoleDef> {
        let line = self.current.line;
        self.advance()?; // HOLE keyword

        let name = self.expect(TokenKind::Identifier)?.text;
        let x = self
            .parse_number(line)
            .map_err(|_| BenchError::invalid_connector(&name, line, "expected x coordinate"))?;
        let y = self
            .parse_number(line)
            .map_err(|_| BenchError::invalid_connector(&name, line, "expected y coordinate"))?;

        let mut declarations = Vec::new();
        while self.current.kind == TokenKind::OpenParen {
            if declarations.len() == MAX_DECLARATIONS {
                return Err(BenchError::invalid_connector(
                    &name,
                    line,
                    format!("at most {} declarations are allowed", MAX_DECLARATIONS),
                ));
            }
            declarations.push(self.parse_declaration(&name, line)?);
        }

        Ok(HoleDef {
            name,
            x,
            y,
            declarations,
            line,
        })
    }

    fn parse_declaration(&mut self, hole: &str, line: usize) -> Result<DeclarationDef> {
        self.expect(TokenKind::OpenParen)?;
        let mut decl = DeclarationDef::default();

        while self.current.kind != TokenKind::CloseParen {
            if self.at_line_end() {
                return Err(BenchError::invalid_connector(hole, line, "unclosed declaration"));
            }

            let key = self.expect(TokenKind::Identifier)?.text;
            self.expect(TokenKind::Equals)?;
            if !matches!(self.current.kind, TokenKind::Identifier | TokenKind::Number) {
                return Err(BenchError::invalid_connector(
                    hole,
                    line,
                    format!("expected an id after '{}='", key),
                ));
            }
            let id = self.current.text.clone();
            self.advance()?;

            match key.to_ascii_lowercase().as_str() {
                "own" | "id" => decl.own = id,
                "target" => decl.target = id,
                other => {
                    return Err(BenchError::invalid_connector(
                        hole,
                        line,
                        format!("unknown declaration key '{}'", other),
                    ));
                }
            }
        }

        self.expect(TokenKind::CloseParen)?;
        Ok(decl)
    }
}

fn is_hole_keyword(text: &str) -> bool {
    matches!(text.to_ascii_uppercase().as_str(), "HOLE" | "H" | "CONNECTOR")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_parse_hole() {
        let ast = parse("HOLE psu_pos 100 -20 (own=PSU target=R_IN)").unwrap();
        assert_eq!(ast.holes.len(), 1);
        let hole = &ast.holes[0];
        assert_eq!(hole.name, "psu_pos");
        assert_eq!(hole.x, 100.0);
        assert_eq!(hole.y, -20.0);
        assert_eq!(
            hole.declarations,
            vec![DeclarationDef {
                own: "PSU".to_string(),
                target: "R_IN".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_two_declarations_and_partial() {
        let ast = parse("H j 0 0 (own=R_OUT target=PSU) (own=D_IN)").unwrap();
        let hole = &ast.holes[0];
        assert_eq!(hole.declarations.len(), 2);
        assert_eq!(hole.declarations[1].own, "D_IN");
        assert_eq!(hole.declarations[1].target, "");
    }

    #[test]
    fn test_parse_too_many_declarations() {
        let err = parse("HOLE j 0 0 (own=A) (own=B) (own=C)").unwrap_err();
        assert!(matches!(err, BenchError::InvalidConnector { .. }));
    }

    #[test]
    fn test_parse_directives() {
        let input = "\
.rope resolution=24 sag=35
.snap 30
.knob fine max_angle=180 max_voltage=1
.series 1k
.policy permissive
";
        let ast = parse(input).unwrap();
        assert_eq!(ast.directives.len(), 5);

        let rope = &ast.directives[0];
        assert_eq!(rope.kind, DirectiveKind::Rope);
        assert_eq!(rope.params["resolution"], 24.0);
        assert_eq!(rope.params["sag"], 35.0);

        assert_eq!(ast.directives[1].value, Some(30.0));
        assert_eq!(ast.directives[2].args, vec!["fine"]);
        assert_eq!(ast.directives[3].value, Some(1000.0));
        assert_eq!(ast.directives[4].args, vec!["permissive"]);
    }

    #[test]
    fn test_unknown_directive() {
        let err = parse(".warp 9").unwrap_err();
        assert!(matches!(err, BenchError::UnknownDirective { line: 1, .. }));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let input = "# bench\n\nHOLE a 0 0 ; first hole\n\nHOLE b 10 0\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.holes.len(), 2);
        assert_eq!(ast.holes[1].line, 5);
    }

    #[test]
    fn test_unexpected_statement() {
        let err = parse("R1 in out 10k").unwrap_err();
        assert!(matches!(err, BenchError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_coordinate() {
        let err = parse("HOLE a 10").unwrap_err();
        assert!(matches!(err, BenchError::InvalidConnector { .. }));
    }
}
