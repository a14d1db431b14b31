//! Roster Source
//!
//! Loads the workspace roster from a public/view-only Google Sheet tab
//! exported as CSV. Column A is the workspace label, column B the API
//! credential; optional columns C and D carry a workspace name and a
//! client/person name used by the tool layer for lookup.
//!
//! Rows missing either required column are skipped silently, and the first
//! row is skipped when it heuristically looks like a header.

use std::time::Duration;

use tracing::info;

use outreach_pulse_core::Credential;

use crate::models::WorkspaceRef;
use crate::utils::error::{AppError, AppResult};

/// Default sheet tab (gid) holding the roster.
pub const DEFAULT_SHEET_GID: &str = "928115249";

/// Timeout for the CSV export fetch.
const ROSTER_TIMEOUT_SECS: u64 = 30;

/// Fetches and parses the roster sheet.
pub struct RosterSource {
    client: reqwest::Client,
}

impl RosterSource {
    pub fn new() -> Self {
        Self {
            client: outreach_pulse_platforms::build_http_client(Duration::from_secs(
                ROSTER_TIMEOUT_SECS,
            )),
        }
    }

    /// Load the roster from a sheet URL and tab gid.
    pub async fn load(&self, sheet_url: &str, gid: &str) -> AppResult<Vec<WorkspaceRef>> {
        let csv_url = csv_export_url(sheet_url, gid);
        info!(%csv_url, "fetching roster sheet");

        let response = self.client.get(&csv_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::roster(format!(
                "sheet export returned {}",
                status.as_u16()
            )));
        }
        let text = response.text().await?;

        let roster = parse_roster(&text);
        info!(count = roster.len(), gid, "loaded workspaces from sheet");
        Ok(roster)
    }
}

impl Default for RosterSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a sheet URL to its CSV export form: strip any `/edit...`
/// suffix and append the export query.
pub fn csv_export_url(sheet_url: &str, gid: &str) -> String {
    let base = match sheet_url.split_once("/edit") {
        Some((base, _)) => base,
        None => sheet_url,
    };
    format!("{base}/export?format=csv&gid={gid}")
}

/// Parse roster rows out of CSV text.
pub fn parse_roster(text: &str) -> Vec<WorkspaceRef> {
    let rows = parse_csv(text);
    let mut roster = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        if row.len() < 2 {
            continue;
        }
        let label = row[0].trim();
        let key = row[1].trim();
        if label.is_empty() || key.is_empty() {
            continue;
        }
        if idx == 0 && looks_like_header(label, key) {
            continue;
        }

        let workspace_name = row.get(2).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let person_name = row.get(3).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        roster.push(WorkspaceRef {
            label: label.to_string(),
            credential: Credential::new(key),
            workspace_name,
            person_name,
        });
    }

    roster
}

/// Heuristic for a column-label row: "workspace" or "id" in column A, or
/// "api" in column B, case-insensitive.
fn looks_like_header(col_a: &str, col_b: &str) -> bool {
    let a = col_a.to_lowercase();
    let b = col_b.to_lowercase();
    a.contains("workspace") || a.contains("id") || b.contains("api")
}

/// Minimal RFC-4180 CSV reader: quoted fields, escaped quotes, embedded
/// commas and newlines. The sheet export never needs more than this.
fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut field));
            }
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            other => field.push(other),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_url_strips_edit_suffix() {
        let url = csv_export_url(
            "https://docs.google.com/spreadsheets/d/abc123/edit#gid=0",
            "42",
        );
        assert_eq!(
            url,
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42"
        );

        let bare = csv_export_url("https://docs.google.com/spreadsheets/d/abc123", "42");
        assert!(bare.ends_with("/export?format=csv&gid=42"));
    }

    #[test]
    fn test_parse_roster_basic() {
        let text = "ws-1,key-1\nws-2,key-2,Acme,Jordan\n";
        let roster = parse_roster(text);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].label, "ws-1");
        assert_eq!(roster[1].workspace_name.as_deref(), Some("Acme"));
        assert_eq!(roster[1].person_name.as_deref(), Some("Jordan"));
    }

    #[test]
    fn test_header_row_skipped() {
        let text = "Workspace ID,API Key\nws-1,key-1\n";
        let roster = parse_roster(text);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].label, "ws-1");
    }

    #[test]
    fn test_data_like_first_row_kept() {
        // First row only skipped when it looks like column labels.
        let text = "acme-corp,key-1\nws-2,key-2\n";
        assert_eq!(parse_roster(text).len(), 2);
    }

    #[test]
    fn test_short_and_empty_rows_skipped() {
        let text = "only-one-column\nws-1,key-1\n , \n,key-x\n";
        let roster = parse_roster(text);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].label, "ws-1");
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let text = "ws-1,key-1,\"Acme, Inc.\",\"Jordan \"\"JJ\"\" Lee\"\n";
        let roster = parse_roster(text);
        assert_eq!(roster[0].workspace_name.as_deref(), Some("Acme, Inc."));
        assert_eq!(roster[0].person_name.as_deref(), Some("Jordan \"JJ\" Lee"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "ws-1,key-1\r\nws-2,key-2\r\n";
        assert_eq!(parse_roster(text).len(), 2);
    }
}
