//! RFC link construction and the header link table.

use std::collections::{HashMap, HashSet};

use crate::error::ExtensionError;

/// Placeholder substituted with the RFC number.
pub const RFC_PLACEHOLDER: &str = "{rfc}";

/// Link template with a `{rfc}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate(String);

impl LinkTemplate {
    /// Validate and wrap a template string.
    ///
    /// # Errors
    ///
    /// Returns an error when the template lacks the `{rfc}` placeholder.
    pub fn new(template: impl Into<String>) -> Result<Self, ExtensionError> {
        let template = template.into();
        if !template.contains(RFC_PLACEHOLDER) {
            return Err(ExtensionError::Template(template));
        }
        Ok(Self(template))
    }

    /// Substitute the RFC number into the template.
    #[must_use]
    pub fn expand(&self, rfc: u32) -> String {
        self.0.replace(RFC_PLACEHOLDER, &rfc.to_string())
    }

    /// Substitute the RFC number and append a fragment anchor.
    ///
    /// One trailing `#` of the expanded link is dropped before the anchor is
    /// joined; an empty or absent anchor leaves the link as-is.
    #[must_use]
    pub fn expand_with_anchor(&self, rfc: u32, anchor: Option<&str>) -> String {
        let link = self.expand(rfc);
        match anchor {
            Some(anchor) if !anchor.is_empty() => {
                let base = link.strip_suffix('#').unwrap_or(&link);
                format!("{base}#{anchor}")
            }
            _ => link,
        }
    }
}

/// Flat mapping from lowercase header name to RFC link.
///
/// Built once at configuration time and read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct HeaderLinkTable {
    links: HashMap<String, String>,
}

impl HeaderLinkTable {
    /// Build the table from per-RFC header sets plus explicit overrides.
    ///
    /// Dataset-derived entries use the expanded template; overrides are
    /// lower-cased and applied last, their values taken verbatim.
    #[must_use]
    pub fn build(
        by_rfc: &HashMap<u32, HashSet<String>>,
        template: &LinkTemplate,
        overrides: &HashMap<String, String>,
    ) -> Self {
        let mut links = HashMap::new();
        for (rfc, headers) in by_rfc {
            let link = template.expand(*rfc);
            for header in headers {
                links.insert(header.clone(), link.clone());
            }
        }
        for (header, link) in overrides {
            links.insert(header.to_ascii_lowercase(), link.clone());
        }
        Self { links }
    }

    /// Stored link for a header, looked up case-insensitively.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.links
            .get(&header.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Full href for a header reference.
    ///
    /// Links without a fragment get `#name-{header}` appended, the anchor
    /// format used by rfc-editor HTML renderings. Links that already carry a
    /// fragment are used unmodified.
    #[must_use]
    pub fn href(&self, header: &str) -> Option<String> {
        let name = header.to_ascii_lowercase();
        let link = self.links.get(&name)?;
        if link.contains('#') {
            Some(link.clone())
        } else {
            Some(format!("{link}#name-{name}"))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
