//! SQL identifier validation for names the builder emits itself (CTE names).
//!
//! - Unquoted: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted: `"..."`, any characters except NUL, `"` escaped as `""`

use crate::error::BuildError;

fn invalid(name: &str, reason: &str) -> BuildError {
    BuildError::InvalidIdent(format!("'{name}': {reason}"))
}

/// A single validated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ident {
    Unquoted(String),
    Quoted(String),
}

impl Ident {
    /// Parse a bare or double-quoted identifier.
    pub fn parse(s: &str) -> Result<Self, BuildError> {
        if s.is_empty() {
            return Err(invalid(s, "identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(invalid(s, "identifier cannot contain NUL character"));
        }

        if let Some(inner) = s.strip_prefix('"') {
            let Some(body) = inner.strip_suffix('"') else {
                return Err(invalid(s, "unclosed quoted identifier"));
            };
            if body.is_empty() {
                return Err(invalid(s, "empty quoted identifier"));
            }
            // Every quote inside the body must be doubled.
            if body.replace("\"\"", "").contains('"') {
                return Err(invalid(s, "unescaped '\"' in quoted identifier"));
            }
            return Ok(Self::Quoted(body.replace("\"\"", "\"")));
        }

        let mut chars = s.chars();
        if let Some(first) = chars.next() {
            if first != '_' && !first.is_ascii_alphabetic() {
                return Err(invalid(s, "must start with a letter or '_'"));
            }
        }
        if let Some(bad) = chars.find(|&c| c != '_' && c != '$' && !c.is_ascii_alphanumeric()) {
            return Err(invalid(s, &format!("invalid character '{bad}'")));
        }

        Ok(Self::Unquoted(s.to_string()))
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        match self {
            Self::Unquoted(name) => name.clone(),
            Self::Quoted(name) => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        assert_eq!(Ident::parse("updated_user").unwrap().to_sql(), "updated_user");
        assert_eq!(Ident::parse("my_var$1").unwrap().to_sql(), "my_var$1");
    }

    #[test]
    fn ident_quoted_round_trips_escapes() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident, Ident::Quoted(r#"has"quote"#.to_string()));
        assert_eq!(ident.to_sql(), r#""has""quote""#);
    }

    #[test]
    fn ident_rejects_bad_names() {
        for name in ["", "1table", "my table", "a.b", r#""unclosed"#, r#""""#, r#""a"b""#] {
            assert!(Ident::parse(name).is_err(), "{name} should be rejected");
        }
    }
}
