// Shared system instructions for generative-text calls.
// Endpoint-specific prompt templates live next to the code that fills them.

/// System instruction for the catalog-wide recommendation summary.
pub const CATALOG_SYSTEM: &str = "You help users find dorm rooms.";

/// System instruction for answering a question about a single dorm.
pub const SINGLE_DORM_SYSTEM: &str =
    "You are an assistant that summarizes a single dorm and its rooms for tenants.";
