// Report pipeline: aggregate grant statistics, build a sectioned document
// model, render it to a paginated PDF, and track the artifact + metadata.

pub mod document;
pub mod handlers;
pub mod renderer;
pub mod stats;
pub mod store;
