//! Workspace Resolution
//!
//! Maps a free-form query string from an agent to exactly one roster entry.
//! Exact label match wins; otherwise a substring match over the label,
//! workspace name, and person name, which must be unambiguous; otherwise a
//! substring match on the label alone. Errors carry enough candidates for
//! the agent to self-correct without another tool round-trip.

use crate::models::WorkspaceRef;
use crate::utils::error::{AppError, AppResult};

/// How many roster entries a not-found error lists.
const NOT_FOUND_PREVIEW: usize = 10;

/// Resolve a query to a single roster entry.
pub fn resolve_workspace<'a>(
    roster: &'a [WorkspaceRef],
    query: &str,
) -> AppResult<&'a WorkspaceRef> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(AppError::validation("empty workspace query"));
    }

    // Exact label match first.
    if let Some(found) = roster.iter().find(|w| w.label.to_lowercase() == needle) {
        return Ok(found);
    }

    // Substring match over every name column.
    let matches: Vec<&WorkspaceRef> = roster
        .iter()
        .filter(|w| {
            w.label.to_lowercase().contains(&needle)
                || field_contains(&w.workspace_name, &needle)
                || field_contains(&w.person_name, &needle)
        })
        .collect();

    match matches.len() {
        1 => return Ok(matches[0]),
        0 => {}
        _ => {
            let listing: Vec<String> = matches
                .iter()
                .map(|w| format!("  - {} ({})", w.display_name(), w.label))
                .collect();
            return Err(AppError::validation(format!(
                "Multiple matches found for '{query}':\n{}\n\nUse the exact workspace label or be more specific.",
                listing.join("\n")
            )));
        }
    }

    // Last resort: substring on the label alone.
    if let Some(found) = roster
        .iter()
        .find(|w| w.label.to_lowercase().contains(&needle))
    {
        return Ok(found);
    }

    let available: Vec<String> = roster
        .iter()
        .take(NOT_FOUND_PREVIEW)
        .map(|w| format!("  - {} ({})", w.display_name(), truncate_label(&w.label)))
        .collect();
    Err(AppError::not_found(format!(
        "Workspace '{query}' not found.\n\nAvailable clients (showing first {}):\n{}\n\nUse get_client_list to see all {} clients.",
        available.len(),
        available.join("\n"),
        roster.len()
    )))
}

fn field_contains(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|f| f.to_lowercase().contains(needle))
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() > 8 {
        let head: String = label.chars().take(8).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}
