//! RFC and HTTP header reference autolinking for markdown pipelines.
//!
//! Scans rendered inline text for references to RFC documents (`RFC-2616`)
//! and HTTP header names (`HTTP-Content-Type`) and replaces each with a link
//! to the corresponding RFC. References already sitting inside a markup-style
//! link label are rewritten as plain text instead, so no nested links are
//! produced.
//!
//! Header names resolve through a link table built from a snapshot of the
//! IANA HTTP field-name registry, with per-header overrides and a
//! customizable link template. Each reference kind can be rendered as links,
//! rendered as plain text, or left completely untouched.
//!
//! # Architecture
//!
//! - [`IetfLinksExtension`]: configured instance owning the link table;
//!   registers the `ietf-rfc` and `http-header` matchers
//! - [`InlineRegistry`]: priority-ordered inline matching over text spans
//! - [`IetfLinkFilter`]: iterator adapter applying the matchers to a
//!   pulldown-cmark event stream
//!
//! # Example
//!
//! ```
//! use ietf_links::{IetfLinkFilter, IetfLinksConfig, IetfLinksExtension};
//! use pulldown_cmark::Parser;
//!
//! let extension = IetfLinksExtension::from_config(&IetfLinksConfig::default())?;
//! let parser = Parser::new("See RFC-2616 and HTTP-Content-Type.");
//! let filter = IetfLinkFilter::new(parser, &extension);
//!
//! let mut html = String::new();
//! pulldown_cmark::html::push_html(&mut html, filter);
//! assert!(html.contains("https://www.rfc-editor.org/rfc/rfc2616"));
//! # Ok::<(), ietf_links::ExtensionError>(())
//! ```

mod config;
mod dataset;
mod error;
mod extension;
mod filter;
mod inline;
mod table;

pub use config::{DEFAULT_LINK_TEMPLATE, HttpHeaderConfig, IetfLinksConfig, ProcessMode, RfcConfig};
pub use dataset::{RegistryRow, bundled_rows, headers_by_rfc, load_rows, parse_rows};
pub use error::ExtensionError;
pub use extension::{HEADER_MATCHER, IetfLinksExtension, MATCHER_PRIORITY, RFC_MATCHER};
pub use filter::IetfLinkFilter;
pub use inline::{
    Element, Handled, HeaderProcessor, InlineProcessor, InlineRegistry, RefKind, RefMatch,
    RenderMode, RfcProcessor, Segment,
};
pub use table::{HeaderLinkTable, LinkTemplate, RFC_PLACEHOLDER};
