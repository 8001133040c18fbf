// Prompt template for company profile extraction.
// The field schema mirrors the CompanyProfile model; keep the two in sync.

pub const PROFILE_EXTRACTION_PROMPT: &str = r#"Extract the company information from the following document text.

DOCUMENT TEXT:
{document_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "name": "string — Name of the company",
  "url": "string — Direct link to the company original page",
  "scope": "string — Scope of the company"
}

Respond with ONLY a JSON object matching the schema above.
If a field cannot be determined from the text, use the literal string "Not specified" for it."#;

/// Renders the extraction prompt for the given document text.
pub fn profile_extraction_prompt(document_text: &str) -> String {
    PROFILE_EXTRACTION_PROMPT.replace("{document_text}", document_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_document_text_and_schema() {
        let prompt = profile_extraction_prompt("Acme builds widgets.");
        assert!(prompt.contains("Acme builds widgets."));
        assert!(!prompt.contains("{document_text}"));
        for field in ["\"name\"", "\"url\"", "\"scope\""] {
            assert!(prompt.contains(field));
        }
        assert!(prompt.contains("Not specified"));
    }
}
