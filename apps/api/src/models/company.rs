use serde::{Deserialize, Serialize};

/// The company profile. At most one instance exists process-wide; it is
/// always replaced wholesale, never merged field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub url: String,
    /// What the company does, in one or two sentences.
    pub scope: String,
}
