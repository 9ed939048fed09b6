//! SPARQL 1.1 query results model for rqcache.
//!
//! This crate turns a response body in the `application/sparql-results+json`
//! format into ordered solution rows:
//! - [`Term`] and [`Literal`] model the typed values bound to query variables
//! - [`Solution`] maps variable names to terms for one result row
//! - [`QueryResults`] carries the variables, the rows and the ASK boolean
//! - [`ResultsParser`] is the seam the query layer parses through
//!
//! # Example
//!
//! ```
//! use rqcache_results::{JsonResultsParser, ResultsParser, Term};
//!
//! let body = br#"{
//!   "head": { "vars": ["s"] },
//!   "results": { "bindings": [ { "s": { "type": "uri", "value": "http://example.org/a" } } ] }
//! }"#;
//!
//! let results = JsonResultsParser.parse(body)?;
//! assert_eq!(results.solutions.len(), 1);
//! assert_eq!(
//!     results.solutions[0].get("s"),
//!     Some(&Term::Iri("http://example.org/a".to_string()))
//! );
//! # Ok::<(), rqcache_results::Error>(())
//! ```

mod error;
mod parser;
mod term;

pub use error::{Error, Result};
pub use parser::{JsonResultsParser, QueryResults, ResultsParser, Solution};
pub use term::{Literal, RDF_LANG_STRING, Term, XSD_BOOLEAN, XSD_STRING};

/// Media type of the SPARQL 1.1 query results JSON format.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
