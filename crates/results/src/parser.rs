//! Parsing of the SPARQL 1.1 query results JSON format
//!
//! See <https://www.w3.org/TR/sparql11-results-json/>. Bindings keep the order
//! the endpoint sent them in; nothing is re-sorted.

use crate::term::{Literal, Term};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One result row: variable name to bound term. Unbound variables are absent.
pub type Solution = BTreeMap<String, Term>;

/// A parsed results document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResults {
    /// Variables projected by the query, in `head.vars` order.
    pub variables: Vec<String>,
    /// Solution rows in document order. Empty for ASK results.
    pub solutions: Vec<Solution>,
    /// Result of an ASK query.
    pub boolean: Option<bool>,
}

impl QueryResults {
    /// Consume the document and return its rows.
    #[must_use]
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

/// Capability to turn a stored response body into rows.
///
/// The query layer only depends on this trait, so tests can plug in their own
/// parser and other result formats can be supported without touching the cache.
pub trait ResultsParser: Send + Sync {
    /// Parse a complete response body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not a valid results document.
    fn parse(&self, body: &[u8]) -> Result<QueryResults>;
}

/// Parser for `application/sparql-results+json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResultsParser;

impl ResultsParser for JsonResultsParser {
    fn parse(&self, body: &[u8]) -> Result<QueryResults> {
        let document: Document = serde_json::from_slice(body)?;

        if document.results.is_none() && document.boolean.is_none() {
            return Err(Error::MissingResults);
        }

        let solutions = document
            .results
            .map(|results| {
                results
                    .bindings
                    .into_iter()
                    .map(|binding| {
                        binding
                            .into_iter()
                            .map(|(name, term)| (name, term.into()))
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(QueryResults {
            variables: document.head.vars,
            solutions,
            boolean: document.boolean,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    head: Head,
    #[serde(default)]
    results: Option<Bindings>,
    #[serde(default)]
    boolean: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct Head {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Bindings {
    bindings: Vec<BTreeMap<String, RawTerm>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawTerm {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(default, rename = "xml:lang")]
        language: Option<String>,
        #[serde(default)]
        datatype: Option<String>,
    },
    // Pre-recommendation encoding still emitted by some endpoints
    TypedLiteral {
        value: String,
        datatype: String,
    },
    Bnode {
        value: String,
    },
}

impl From<RawTerm> for Term {
    fn from(raw: RawTerm) -> Self {
        match raw {
            RawTerm::Uri { value } => Self::Iri(value),
            RawTerm::Literal {
                value,
                language,
                datatype,
            } => Self::Literal(Literal {
                value,
                datatype,
                language,
            }),
            RawTerm::TypedLiteral { value, datatype } => {
                Self::Literal(Literal::typed(value, datatype))
            }
            RawTerm::Bnode { value } => Self::BlankNode(value),
        }
    }
}
