pub mod decision;
pub mod entity_probe;
pub mod query_analysis;

pub use decision::{GraphRagRouter, RouterConfig};
pub use entity_probe::entity_exists;
pub use query_analysis::{
    classify, extract_entities_simple, is_precise_query, wants_schema, ClassificationSignals,
};
