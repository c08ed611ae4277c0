//! Extension configuration.
//!
//! Parsed with serde so hosts can feed TOML or JSON documents, mirroring the
//! shape consumed by the matchers: a link template, one section per reference
//! kind, and an optional path to a header dataset file.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default link template pointing at the RFC Editor.
pub const DEFAULT_LINK_TEMPLATE: &str = "https://www.rfc-editor.org/rfc/rfc{rfc}";

/// Matcher activation policy.
///
/// Three states: `Link` registers the matcher and renders anchors,
/// `PlainText` registers the matcher but renders matches as inert text, and
/// `Disabled` does not register the matcher at all, leaving references as
/// untouched literal text.
///
/// Deserializes from `true` (`Link`), `false` (`PlainText`), or `null`
/// (`Disabled`). A missing `process` key means `Link`. TOML cannot express
/// `null`; hosts configuring from TOML disable a matcher programmatically or
/// via JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Render recognized references as hyperlinks.
    #[default]
    Link,
    /// Recognize and consume references, but render them as plain text.
    PlainText,
    /// Do not register the matcher; references pass through unprocessed.
    Disabled,
}

impl<'de> Deserialize<'de> for ProcessMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(true) => Self::Link,
            Some(false) => Self::PlainText,
            None => Self::Disabled,
        })
    }
}

/// Extension configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IetfLinksConfig {
    /// Link template with a `{rfc}` placeholder for the RFC number.
    pub link_template: String,
    /// RFC reference matching.
    pub rfc: RfcConfig,
    /// HTTP header reference matching.
    pub http_headers: HttpHeaderConfig,
    /// Header dataset file; `None` uses the bundled registry snapshot.
    pub dataset: Option<PathBuf>,
}

impl Default for IetfLinksConfig {
    fn default() -> Self {
        Self {
            link_template: DEFAULT_LINK_TEMPLATE.to_owned(),
            rfc: RfcConfig::default(),
            http_headers: HttpHeaderConfig::default(),
            dataset: None,
        }
    }
}

/// RFC reference matching configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RfcConfig {
    /// Activation policy for the `ietf-rfc` matcher.
    pub process: ProcessMode,
}

/// HTTP header reference matching configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpHeaderConfig {
    /// Activation policy for the `http-header` matcher.
    pub process: ProcessMode,
    /// Include dataset rows whose status is not `permanent`.
    pub include_deprecated: bool,
    /// Explicit header-to-link overrides.
    ///
    /// Keys are matched case-insensitively; values are used verbatim and win
    /// over dataset-derived links.
    pub overrides: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IetfLinksConfig::default();
        assert_eq!(config.link_template, DEFAULT_LINK_TEMPLATE);
        assert_eq!(config.rfc.process, ProcessMode::Link);
        assert_eq!(config.http_headers.process, ProcessMode::Link);
        assert!(!config.http_headers.include_deprecated);
        assert!(config.http_headers.overrides.is_empty());
        assert!(config.dataset.is_none());
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: IetfLinksConfig = toml::from_str("").unwrap();
        assert_eq!(config.link_template, DEFAULT_LINK_TEMPLATE);
        assert_eq!(config.rfc.process, ProcessMode::Link);
        assert_eq!(config.http_headers.process, ProcessMode::Link);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
link_template = "https://datatracker.ietf.org/doc/html/rfc{rfc}"

[rfc]
process = false

[http_headers]
include_deprecated = true

[http_headers.overrides]
Content-Type = "https://example.test/content-type"
"#;
        let config: IetfLinksConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.link_template,
            "https://datatracker.ietf.org/doc/html/rfc{rfc}"
        );
        assert_eq!(config.rfc.process, ProcessMode::PlainText);
        assert_eq!(config.http_headers.process, ProcessMode::Link);
        assert!(config.http_headers.include_deprecated);
        assert_eq!(
            config.http_headers.overrides.get("Content-Type").unwrap(),
            "https://example.test/content-type"
        );
    }

    #[test]
    fn test_process_tristate_from_json() {
        let config: IetfLinksConfig =
            serde_json::from_str(r#"{"rfc": {"process": null}}"#).unwrap();
        assert_eq!(config.rfc.process, ProcessMode::Disabled);

        let config: IetfLinksConfig =
            serde_json::from_str(r#"{"rfc": {"process": false}}"#).unwrap();
        assert_eq!(config.rfc.process, ProcessMode::PlainText);

        let config: IetfLinksConfig = serde_json::from_str(r#"{"rfc": {}}"#).unwrap();
        assert_eq!(config.rfc.process, ProcessMode::Link);
    }

    #[test]
    fn test_header_tristate_from_json() {
        let config: IetfLinksConfig =
            serde_json::from_str(r#"{"http_headers": {"process": null}}"#).unwrap();
        assert_eq!(config.http_headers.process, ProcessMode::Disabled);
    }

    #[test]
    fn test_dataset_path() {
        let config: IetfLinksConfig =
            toml::from_str(r#"dataset = "/var/lib/field-names.csv""#).unwrap();
        assert_eq!(
            config.dataset,
            Some(PathBuf::from("/var/lib/field-names.csv"))
        );
    }
}
