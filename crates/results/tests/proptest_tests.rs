//! Property-based tests for the results parser

use proptest::prelude::*;
use rqcache_results::{JsonResultsParser, Literal, ResultsParser, Term};
use serde_json::json;

fn select_document(values: &[String]) -> Vec<u8> {
    let bindings: Vec<serde_json::Value> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            json!({
                "row": { "type": "literal", "value": i.to_string(), "datatype": "http://www.w3.org/2001/XMLSchema#integer" },
                "v": { "type": "literal", "value": value }
            })
        })
        .collect();

    serde_json::to_vec(&json!({
        "head": { "vars": ["row", "v"] },
        "results": { "bindings": bindings }
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn test_rows_keep_document_order(values in prop::collection::vec(".{0,40}", 0..30)) {
        let body = select_document(&values);
        let results = JsonResultsParser.parse(&body).unwrap();

        prop_assert_eq!(results.solutions.len(), values.len());
        for (i, (solution, value)) in results.solutions.iter().zip(&values).enumerate() {
            let row = solution["row"].as_literal().unwrap().parse::<usize>().unwrap();
            prop_assert_eq!(row, i);
            prop_assert_eq!(&solution["v"], &Term::Literal(Literal::plain(value.clone())));
        }
    }

    #[test]
    fn test_arbitrary_bytes_never_panic(body in prop::collection::vec(any::<u8>(), 0..256)) {
        // Either a document or an error, never a panic
        let _ = JsonResultsParser.parse(&body);
    }

    #[test]
    fn test_iri_values_round_through_display(path in "[a-z0-9/]{0,30}") {
        let iri = format!("http://example.org/{path}");
        let body = serde_json::to_vec(&json!({
            "head": { "vars": ["s"] },
            "results": { "bindings": [ { "s": { "type": "uri", "value": iri } } ] }
        }))
        .unwrap();

        let results = JsonResultsParser.parse(&body).unwrap();
        let term = &results.solutions[0]["s"];
        prop_assert_eq!(term.as_iri(), Some(iri.as_str()));
        prop_assert_eq!(term.to_string(), format!("<{iri}>"));
    }
}
