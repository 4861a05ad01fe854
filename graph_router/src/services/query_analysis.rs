//! Query Analysis
//!
//! Stateless heuristics over the raw question text:
//! - does it ask about the schema / data model
//! - does it ask for a precise or aggregate answer
//! - which capitalized tokens might name graph entities

use lazy_static::lazy_static;
use regex::Regex;

/// Substrings that mark a question about the graph's structure
const SCHEMA_KEYWORDS: &[&str] = &[
    "schema",
    "labels",
    "properties",
    "relationships",
    "data model",
    "graph model",
];

lazy_static! {
    static ref PRECISE_RE: Regex = Regex::new(
        r"\b(count|how many|list|show all|top \d+|sum|avg|average|min|max|greater than|less than|between)\b"
    )
    .unwrap();

    static ref ENTITY_RE: Regex = Regex::new(r"\b[A-Z][a-zA-Z0-9\-]{2,}\b").unwrap();
}

/// Signals the router decides on, built once the store has been probed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationSignals {
    pub wants_schema: bool,
    pub is_precise: bool,
    pub in_graph: bool,
}

/// Text signals for `question` together with the probe outcome.
pub fn classify(question: &str, in_graph: bool) -> ClassificationSignals {
    ClassificationSignals {
        wants_schema: wants_schema(question),
        is_precise: is_precise_query(question),
        in_graph,
    }
}

/// True if the question mentions any schema keyword (case-insensitive substring).
pub fn wants_schema(question: &str) -> bool {
    let lower = question.to_lowercase();
    SCHEMA_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// True if the question asks for counting, enumeration, ranking, or comparison.
pub fn is_precise_query(question: &str) -> bool {
    PRECISE_RE.is_match(&question.to_lowercase())
}

/// Capitalized tokens of at least three characters, in order of appearance.
///
/// Duplicates are kept; the router stops probing at the first token found in the graph.
pub fn extract_entities_simple(question: &str) -> Vec<String> {
    ENTITY_RE
        .find_iter(question)
        .map(|m| m.as_str().to_string())
        .collect()
}
