//! IANA HTTP field-name registry loading.
//!
//! The registry is a CSV export with one row per registered field. Only three
//! columns matter here: `Field Name`, `Status`, and `Reference`. A row feeds
//! the link table when its reference begins with a bracketed RFC citation and
//! its status passes the deprecation filter.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtensionError;

/// Bundled snapshot of the IANA "Hypertext Transfer Protocol (HTTP) Field
/// Name Registry" CSV export.
const BUNDLED_REGISTRY: &str = include_str!("../data/field-names.csv");

/// Leading RFC citation of a `Reference` column, e.g. `[RFC9110, Section 8.3]`.
static CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[RFC[- ]?([0-9]+)").unwrap());

const FIELD_NAME_COLUMN: &str = "Field Name";
const STATUS_COLUMN: &str = "Status";
const REFERENCE_COLUMN: &str = "Reference";

/// One row of the field-name registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRow {
    pub field_name: String,
    pub status: String,
    pub reference: String,
}

/// Rows from the bundled registry snapshot.
#[must_use]
pub fn bundled_rows() -> Vec<RegistryRow> {
    parse_rows(BUNDLED_REGISTRY)
}

/// Rows from a registry CSV file on disk.
///
/// # Errors
///
/// Returns an error when the file is missing or unreadable. Malformed rows
/// inside a readable file are skipped, not errors.
pub fn load_rows(path: &Path) -> Result<Vec<RegistryRow>, ExtensionError> {
    if !path.exists() {
        return Err(ExtensionError::DatasetNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ExtensionError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_rows(&content))
}

/// Parse registry CSV text into rows.
///
/// The first record is the header; column order is not assumed. Records
/// shorter than the required columns are skipped.
#[must_use]
pub fn parse_rows(csv: &str) -> Vec<RegistryRow> {
    let mut records = parse_records(csv).into_iter();
    let Some(header) = records.next() else {
        return Vec::new();
    };
    let column = |name: &str| header.iter().position(|h| h == name);
    let (Some(name_idx), Some(status_idx), Some(reference_idx)) = (
        column(FIELD_NAME_COLUMN),
        column(STATUS_COLUMN),
        column(REFERENCE_COLUMN),
    ) else {
        tracing::warn!("header dataset is missing required columns, no rows loaded");
        return Vec::new();
    };

    records
        .filter_map(|record| {
            Some(RegistryRow {
                field_name: record.get(name_idx)?.clone(),
                status: record.get(status_idx)?.clone(),
                reference: record.get(reference_idx)?.clone(),
            })
        })
        .collect()
}

/// Fold registry rows into a map from RFC number to the set of lowercase
/// header names it defines.
///
/// Rows whose reference does not start with an RFC citation are skipped.
/// Rows whose status is not `permanent` are skipped unless
/// `include_deprecated` is set.
#[must_use]
pub fn headers_by_rfc(
    rows: &[RegistryRow],
    include_deprecated: bool,
) -> HashMap<u32, HashSet<String>> {
    let mut by_rfc: HashMap<u32, HashSet<String>> = HashMap::new();
    let mut uncited = 0usize;
    for row in rows {
        let Some(citation) = CITATION.captures(&row.reference) else {
            uncited += 1;
            continue;
        };
        if row.status != "permanent" && !include_deprecated {
            continue;
        }
        let Ok(rfc) = citation[1].parse::<u32>() else {
            uncited += 1;
            continue;
        };
        by_rfc
            .entry(rfc)
            .or_default()
            .insert(row.field_name.to_ascii_lowercase());
    }
    if uncited > 0 {
        tracing::debug!(uncited, "registry rows without a leading RFC citation");
    }
    by_rfc
}

/// Split CSV text into records of fields.
///
/// Handles the quoting the registry export uses: double-quoted fields may
/// contain commas, newlines, and `""` escapes. Carriage returns outside
/// quotes are dropped so CRLF exports parse the same as LF.
fn parse_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, status: &str, reference: &str) -> RegistryRow {
        RegistryRow {
            field_name: name.to_owned(),
            status: status.to_owned(),
            reference: reference.to_owned(),
        }
    }

    #[test]
    fn test_parse_records_quoted_fields() {
        let records = parse_records("a,\"b, c\",d\ne,\"f\"\"g\",h\n");
        assert_eq!(
            records,
            vec![
                vec!["a".to_owned(), "b, c".to_owned(), "d".to_owned()],
                vec!["e".to_owned(), "f\"g".to_owned(), "h".to_owned()],
            ]
        );
    }

    #[test]
    fn test_parse_records_crlf_and_missing_trailing_newline() {
        let records = parse_records("a,b\r\nc,d");
        assert_eq!(
            records,
            vec![
                vec!["a".to_owned(), "b".to_owned()],
                vec!["c".to_owned(), "d".to_owned()],
            ]
        );
    }

    #[test]
    fn test_parse_records_quoted_newline() {
        let records = parse_records("a,\"b\nc\"\nd,e\n");
        assert_eq!(
            records,
            vec![
                vec!["a".to_owned(), "b\nc".to_owned()],
                vec!["d".to_owned(), "e".to_owned()],
            ]
        );
    }

    #[test]
    fn test_parse_rows_by_column_name() {
        let csv = "Status,Field Name,Reference\npermanent,Content-Type,\"[RFC9110, Section 8.3]\"\n";
        let rows = parse_rows(csv);
        assert_eq!(
            rows,
            vec![row("Content-Type", "permanent", "[RFC9110, Section 8.3]")]
        );
    }

    #[test]
    fn test_parse_rows_missing_columns() {
        assert!(parse_rows("Field Name,Reference\nHost,[RFC9110]\n").is_empty());
        assert!(parse_rows("").is_empty());
    }

    #[test]
    fn test_headers_by_rfc_groups_and_lowercases() {
        let rows = vec![
            row("Content-Type", "permanent", "[RFC9110, Section 8.3]"),
            row("ETag", "permanent", "[RFC9110, Section 8.8.3]"),
            row("Age", "permanent", "[RFC9111, Section 5.1]"),
        ];
        let by_rfc = headers_by_rfc(&rows, false);
        assert_eq!(by_rfc.len(), 2);
        let rfc9110 = &by_rfc[&9110];
        assert!(rfc9110.contains("content-type"));
        assert!(rfc9110.contains("etag"));
        assert!(by_rfc[&9111].contains("age"));
    }

    #[test]
    fn test_headers_by_rfc_citation_forms() {
        let rows = vec![
            row("A", "permanent", "[RFC-7239]"),
            row("B", "permanent", "[RFC 8288, Section 3]"),
            row("C", "permanent", "RFC9110"),
            row("D", "permanent", "[W3C P3P 1.0]"),
        ];
        let by_rfc = headers_by_rfc(&rows, false);
        assert!(by_rfc[&7239].contains("a"));
        assert!(by_rfc[&8288].contains("b"));
        // References not starting with a bracketed citation are skipped.
        assert!(!by_rfc.contains_key(&9110));
        assert_eq!(by_rfc.len(), 2);
    }

    #[test]
    fn test_headers_by_rfc_deprecated_filter() {
        let rows = vec![
            row("Content-MD5", "obsoleted", "[RFC2616, Section 14.15]"),
            row("Host", "permanent", "[RFC9110, Section 7.2]"),
        ];

        let by_rfc = headers_by_rfc(&rows, false);
        assert!(!by_rfc.contains_key(&2616));
        assert!(by_rfc[&9110].contains("host"));

        let by_rfc = headers_by_rfc(&rows, true);
        assert!(by_rfc[&2616].contains("content-md5"));
    }

    #[test]
    fn test_bundled_rows_parse() {
        let rows = bundled_rows();
        assert!(rows.iter().any(|r| r.field_name == "Content-Type"));
        assert!(rows.iter().any(|r| r.status != "permanent"));

        let by_rfc = headers_by_rfc(&rows, false);
        assert!(by_rfc[&9110].contains("content-type"));
    }

    #[test]
    fn test_load_rows_missing_file() {
        let err = load_rows(Path::new("/nonexistent/field-names.csv")).unwrap_err();
        assert!(matches!(err, ExtensionError::DatasetNotFound(_)));
    }

    #[test]
    fn test_load_rows_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field-names.csv");
        std::fs::write(
            &path,
            "Field Name,Template,Status,Reference,Comments\nX-Test,,permanent,[RFC1234],\n",
        )
        .unwrap();

        let rows = load_rows(&path).unwrap();
        assert_eq!(rows, vec![row("X-Test", "permanent", "[RFC1234]")]);
    }
}
