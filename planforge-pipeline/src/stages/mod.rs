//! The pipeline stage functions.
//!
//! Each stage consumes the accumulated [`ProjectState`], produces one named
//! document (or one loop-accumulator fragment), and hands the state forward.
//! Side effects are limited to the document map and the loop bookkeeping
//! fields; the only external I/O is the capability call itself.
//!
//! [`ProjectState`]: planforge_core::ProjectState

pub mod charter;
pub mod communication;
pub mod risk;
pub mod schedule;
pub mod scope;
pub mod stakeholder;
pub mod wbs;

use planforge_core::{PlanError, Result, StructuredDocument, TextGenerator};

/// Run one structured generation call and validate the reply against the
/// target document kind by deserializing into it.
pub(crate) async fn generate_document<T: StructuredDocument>(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<T> {
    let schema = T::json_schema();
    let value = generator.generate_structured(prompt, &schema).await?;
    serde_json::from_value(value)
        .map_err(|e| PlanError::Capability(format!("generated document failed validation: {e}")))
}
