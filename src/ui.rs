//! Interactive selection, editing, and confirmation prompts.

use dialoguer::{Confirm, Editor, Input, Select};

use crate::commit::{ChangeStatus, DiffRecord, Suggestion, parse_conventional};

/// What the user decided to do with the suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Commit(String),
    Cancel,
}

/// One-line label for a suggestion: confidence, message, and its type if conventional.
pub fn format_suggestion(suggestion: &Suggestion) -> String {
    let subject = suggestion.message.lines().next().unwrap_or("");
    let extra_lines = suggestion.message.lines().count().saturating_sub(1);

    let mut label = format!("[{:>3}%] {}", suggestion.confidence, subject);
    if extra_lines > 0 {
        label.push_str(&format!(" (+{extra_lines} body lines)"));
    }
    if let Some(conventional) = parse_conventional(&suggestion.message) {
        label.push_str(&format!("  <{}>", conventional.commit_type));
    }
    label
}

/// Marker shown next to a staged file.
pub fn status_icon(status: ChangeStatus) -> &'static str {
    match status {
        ChangeStatus::Added => "+",
        ChangeStatus::Modified => "~",
        ChangeStatus::Deleted => "-",
        ChangeStatus::Renamed => "→",
    }
}

/// Print the staged files with their line counts.
pub fn print_staged(records: &[DiffRecord]) {
    println!("Staged changes ({} files):", records.len());
    for record in records {
        println!(
            "  {} {} (+{}/-{})",
            status_icon(record.status),
            record.file,
            record.additions,
            record.deletions
        );
    }
}

/// Print each suggestion with its rationale.
pub fn print_suggestions(suggestions: &[Suggestion]) {
    for (idx, suggestion) in suggestions.iter().enumerate() {
        println!("{}. {}", idx + 1, format_suggestion(suggestion));
        println!("   {}", suggestion.rationale);
    }
}

/// Let the user pick a suggestion (or write one), then edit it before committing.
pub fn choose_message(suggestions: &[Suggestion]) -> dialoguer::Result<Choice> {
    let mut items: Vec<String> = suggestions.iter().map(format_suggestion).collect();
    let write_own = items.len();
    items.push("Write my own".to_string());
    items.push("Cancel".to_string());

    let selection = Select::new()
        .with_prompt("Choose a commit message")
        .items(&items)
        .default(0)
        .interact_opt()?;

    let initial = match selection {
        Some(idx) if idx < write_own => suggestions[idx].message.clone(),
        Some(idx) if idx == write_own => String::new(),
        _ => return Ok(Choice::Cancel),
    };

    // Multi-line messages go through $EDITOR; Input is single-line.
    if initial.contains('\n') {
        return Ok(match Editor::new().edit(&initial)? {
            Some(text) if !text.trim().is_empty() => Choice::Commit(text.trim().to_string()),
            _ => Choice::Cancel,
        });
    }

    let edited = Input::<String>::new()
        .with_prompt("Commit message")
        .with_initial_text(initial)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Commit message cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(Choice::Commit(edited.trim().to_string()))
}

/// Ask whether to push after committing.
pub fn confirm_push() -> dialoguer::Result<bool> {
    Confirm::new()
        .with_prompt("Push to remote?")
        .default(false)
        .interact()
}
