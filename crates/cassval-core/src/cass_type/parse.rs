use super::CassType;
use crate::{config::CodecConfig, error::MalformedValueError};
use cassval_primitives::{KindArity, ValueKind};
use std::str::FromStr;

const WHAT: &str = "CQL type";

impl FromStr for CassType {
    type Err = MalformedValueError;

    /// Parse the canonical rendering produced by `Display`.
    /// `frozen<..>` wrappers are accepted and dropped. Nesting is capped at
    /// `CodecConfig::DEFAULT_MAX_DEPTH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input: s, pos: 0 };
        let ty = parser.parse_type(0)?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(parser.error());
        }

        Ok(ty)
    }
}

///
/// Parser
///

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self) -> MalformedValueError {
        MalformedValueError::literal(WHAT, self.input)
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        let skip = rest.len() - rest.trim_start().len();
        self.pos += skip;
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<&'a str, MalformedValueError> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error());
        }
        let input = self.input;
        let start = self.pos;
        self.pos += len;

        Ok(&input[start..self.pos])
    }

    fn parse_type(&mut self, depth: usize) -> Result<CassType, MalformedValueError> {
        if depth > CodecConfig::DEFAULT_MAX_DEPTH {
            return Err(MalformedValueError::TooDeep {
                what: WHAT,
                max: CodecConfig::DEFAULT_MAX_DEPTH,
            });
        }

        let name = self.ident()?;

        if name.eq_ignore_ascii_case("frozen") {
            if !self.eat('<') {
                return Err(self.error());
            }
            let inner = self.parse_type(depth + 1)?;
            if !self.eat('>') {
                return Err(self.error());
            }
            return Ok(inner);
        }

        let kind = ValueKind::from_name(name).ok_or_else(|| self.error())?;
        let subtypes = if self.eat('<') {
            self.parse_args(depth)?
        } else {
            Vec::new()
        };

        let arity_ok = match kind.arity() {
            KindArity::Scalar => subtypes.is_empty(),
            KindArity::Variadic => true,
            arity => subtypes.is_empty() || arity.expected() == Some(subtypes.len()),
        };
        if !arity_ok {
            return Err(self.error());
        }

        Ok(CassType::new(kind, subtypes))
    }

    // Consumes the argument list after '<'. An all-'?' list yields no subtypes.
    fn parse_args(&mut self, depth: usize) -> Result<Vec<CassType>, MalformedValueError> {
        let mut args = Vec::new();
        let mut placeholders = 0usize;

        if self.eat('>') {
            return Ok(args);
        }
        loop {
            if self.eat('?') {
                placeholders += 1;
            } else {
                args.push(self.parse_type(depth + 1)?);
            }
            if self.eat('>') {
                break;
            }
            if !self.eat(',') {
                return Err(self.error());
            }
        }

        match (placeholders, args.len()) {
            (0, _) => Ok(args),
            (_, 0) => Ok(Vec::new()),
            _ => Err(self.error()),
        }
    }
}
