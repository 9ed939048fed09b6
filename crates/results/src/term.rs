//! RDF terms bound to query variables

use std::fmt;
use std::str::FromStr;

/// Datatype of plain literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Datatype of boolean literals.
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// Datatype of language-tagged literals.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// A value bound to a variable in one solution row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An IRI reference.
    Iri(String),
    /// A literal value.
    Literal(Literal),
    /// A blank node label, scoped to one results document.
    BlankNode(String),
}

impl Term {
    /// Lexical value of the term: the IRI, the literal form or the blank node label.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Iri(iri) => iri,
            Self::Literal(literal) => &literal.value,
            Self::BlankNode(label) => label,
        }
    }

    /// The IRI, if this term is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The literal, if this term is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Whether the term is a blank node.
    #[must_use]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal(literal) => fmt::Display::fmt(literal, f),
            Self::BlankNode(label) => write!(f, "_:{label}"),
        }
    }
}

/// A literal with an optional datatype IRI or language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Explicit datatype IRI, as sent by the endpoint.
    pub datatype: Option<String>,
    /// Language tag, as sent by the endpoint.
    pub language: Option<String>,
}

impl Literal {
    /// Create a plain literal.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a literal with a datatype IRI.
    #[must_use]
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Create a language-tagged literal.
    #[must_use]
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// Effective datatype IRI.
    ///
    /// Literals without an explicit datatype are `xsd:string`, or
    /// `rdf:langString` when they carry a language tag.
    #[must_use]
    pub fn datatype(&self) -> &str {
        match (&self.datatype, &self.language) {
            (Some(datatype), _) => datatype,
            (None, Some(_)) => RDF_LANG_STRING,
            (None, None) => XSD_STRING,
        }
    }

    /// Parse the lexical form into a Rust value.
    ///
    /// # Errors
    ///
    /// Returns the `FromStr` error of `T` when the lexical form does not parse.
    pub fn parse<T: FromStr>(&self) -> std::result::Result<T, T::Err> {
        self.value.trim().parse()
    }

    /// Value of an `xsd:boolean` literal.
    ///
    /// Accepts the four lexical forms `true`, `false`, `1` and `0`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if self.datatype() != XSD_BOOLEAN {
            return None;
        }
        match self.value.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.value.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                _ => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = &self.datatype {
            write!(f, "^^<{datatype}>")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_datatype() {
        assert_eq!(Literal::plain("a").datatype(), XSD_STRING);
        assert_eq!(Literal::lang("a", "en").datatype(), RDF_LANG_STRING);
        assert_eq!(Literal::typed("1", XSD_BOOLEAN).datatype(), XSD_BOOLEAN);
    }

    #[test]
    fn test_typed_parse() {
        let literal = Literal::typed("42", "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(literal.parse::<i64>().unwrap(), 42);
        assert!(Literal::plain("forty-two").parse::<i64>().is_err());
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(Literal::typed("true", XSD_BOOLEAN).as_bool(), Some(true));
        assert_eq!(Literal::typed("0", XSD_BOOLEAN).as_bool(), Some(false));
        assert_eq!(Literal::typed("yes", XSD_BOOLEAN).as_bool(), None);
        assert_eq!(Literal::plain("true").as_bool(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Term::Iri("http://example.org/a".into()).to_string(),
            "<http://example.org/a>"
        );
        assert_eq!(Term::BlankNode("b0".into()).to_string(), "_:b0");
        assert_eq!(
            Term::Literal(Literal::lang("chat", "fr")).to_string(),
            "\"chat\"@fr"
        );
        assert_eq!(
            Term::Literal(Literal::typed("1", XSD_BOOLEAN)).to_string(),
            format!("\"1\"^^<{XSD_BOOLEAN}>")
        );
        assert_eq!(
            Term::Literal(Literal::plain("say \"hi\"")).to_string(),
            "\"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn test_accessors() {
        let iri = Term::Iri("http://example.org/a".into());
        assert_eq!(iri.as_iri(), Some("http://example.org/a"));
        assert!(iri.as_literal().is_none());
        assert!(!iri.is_blank_node());

        let literal = Term::Literal(Literal::plain("x"));
        assert_eq!(literal.value(), "x");
        assert!(literal.as_iri().is_none());
    }
}
