//! Extension facade wiring configuration into the inline registry.

use std::sync::Arc;

use crate::config::{IetfLinksConfig, ProcessMode};
use crate::dataset;
use crate::error::ExtensionError;
use crate::inline::{HeaderProcessor, InlineRegistry, RenderMode, RfcProcessor};
use crate::table::{HeaderLinkTable, LinkTemplate};

/// Priority both matchers register at in the host's inline-processing order.
pub const MATCHER_PRIORITY: u8 = 50;

/// Registered name of the RFC matcher.
pub const RFC_MATCHER: &str = "ietf-rfc";

/// Registered name of the HTTP header matcher.
pub const HEADER_MATCHER: &str = "http-header";

/// Configured extension instance.
///
/// Built once from configuration: the header dataset is read eagerly, the
/// link table and template are constructed up front and never mutated
/// afterward. [`register`](Self::register) can be invoked against any number
/// of registries; each invocation produces fresh matcher instances bound to
/// the same immutable table.
#[derive(Debug)]
pub struct IetfLinksExtension {
    template: LinkTemplate,
    rfc_mode: ProcessMode,
    header_mode: ProcessMode,
    table: Arc<HeaderLinkTable>,
}

impl IetfLinksExtension {
    /// Build the extension from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the link template lacks its placeholder or when
    /// a configured dataset file is missing or unreadable. No partial link
    /// table is produced on failure.
    pub fn from_config(config: &IetfLinksConfig) -> Result<Self, ExtensionError> {
        let template = LinkTemplate::new(&config.link_template)?;
        let rows = match &config.dataset {
            Some(path) => dataset::load_rows(path)?,
            None => dataset::bundled_rows(),
        };
        let by_rfc = dataset::headers_by_rfc(&rows, config.http_headers.include_deprecated);
        let table = HeaderLinkTable::build(&by_rfc, &template, &config.http_headers.overrides);
        tracing::debug!(headers = table.len(), "built header link table");

        Ok(Self {
            template,
            rfc_mode: config.rfc.process,
            header_mode: config.http_headers.process,
            table: Arc::new(table),
        })
    }

    /// The immutable header link table this instance owns.
    #[must_use]
    pub fn header_links(&self) -> &HeaderLinkTable {
        &self.table
    }

    /// Href for an RFC reference with an optional fragment anchor.
    #[must_use]
    pub fn rfc_link(&self, number: u32, anchor: Option<&str>) -> String {
        self.template.expand_with_anchor(number, anchor)
    }

    /// Register matchers with the host registry per the three-way policy.
    ///
    /// A matcher whose `process` setting is the disable sentinel is not
    /// registered at all; `false` registers it in plain-text mode.
    pub fn register(&self, registry: &mut InlineRegistry) {
        if let Some(mode) = render_mode(self.rfc_mode) {
            registry.register(
                Box::new(RfcProcessor::new(self.template.clone(), mode)),
                RFC_MATCHER,
                MATCHER_PRIORITY,
            );
        }
        if let Some(mode) = render_mode(self.header_mode) {
            registry.register(
                Box::new(HeaderProcessor::new(Arc::clone(&self.table), mode)),
                HEADER_MATCHER,
                MATCHER_PRIORITY,
            );
        }
    }

    /// Convenience: a fresh registry with this extension's matchers.
    #[must_use]
    pub fn registry(&self) -> InlineRegistry {
        let mut registry = InlineRegistry::new();
        self.register(&mut registry);
        registry
    }
}

fn render_mode(mode: ProcessMode) -> Option<RenderMode> {
    match mode {
        ProcessMode::Link => Some(RenderMode::Link),
        ProcessMode::PlainText => Some(RenderMode::PlainText),
        ProcessMode::Disabled => None,
    }
}
