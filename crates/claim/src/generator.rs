use anyhow::Result;

/// Turns an encoded evidence string into a textual claim.
///
/// Model inference lives behind this seam: the retrieval side only ever
/// sees `text -> claim`. Implementations must be deterministic for a
/// given input if the surrounding run is expected to be reproducible.
pub trait ClaimGenerator {
    fn generate_claim(&self, text: &str) -> Result<String>;

    /// Name used in logs
    fn name(&self) -> &'static str {
        "generator"
    }
}

/// Deterministic built-in generator for dataset dry runs and tests.
///
/// Understands the compact encoding (`content && page && header` pieces
/// joined by ` | `) and verbalizes it as one sentence; any other input is
/// returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ClaimGenerator for TemplateGenerator {
    fn generate_claim(&self, text: &str) -> Result<String> {
        let mut page = None;
        let mut parts = Vec::new();

        for piece in text.split(" | ") {
            let fields: Vec<&str> = piece.split(" && ").collect();
            let [content, wiki_page, header] = fields.as_slice() else {
                return Ok(text.to_string());
            };
            page.get_or_insert(*wiki_page);
            parts.push(format!("{} is {}", header.trim(), content.trim()));
        }

        match page {
            Some(page) if !parts.is_empty() => {
                Ok(format!("In {}, {}.", page.trim(), parts.join(" and ")))
            }
            _ => Ok(text.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
