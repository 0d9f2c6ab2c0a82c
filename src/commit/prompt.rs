//! Prompt construction for AI-generated commit message suggestions.

use crate::commit::kind::CommitType;
use crate::commit::record::{DiffRecord, GenerationConfig};

/// Change lines rendered per file. Records may carry more.
pub const MAX_PROMPT_CHANGES: usize = 5;

/// Recent commit subjects included as style context.
pub const MAX_RECENT_COMMITS: usize = 5;

/// Number of suggestions the model is asked for.
pub const SUGGESTION_COUNT: usize = 3;

const DEFAULT_BRANCH: &str = "main";

/// Build the LLM prompt for suggesting commit messages.
///
/// Sections appear in a fixed order: role, repository context, changed files,
/// requirements, commit types, ranking instruction, output format, and finally
/// any extra instructions from the config. The output depends only on the
/// arguments, so identical inputs give byte-identical prompts.
pub fn build_prompt(
    diffs: &[DiffRecord],
    config: &GenerationConfig,
    recent_commits: &[String],
    branch: &str,
) -> String {
    let branch = if branch.trim().is_empty() {
        DEFAULT_BRANCH
    } else {
        branch
    };

    let mut prompt = String::from(
        "You are an expert software engineer who writes clear, precise Git commit messages.\n\
         Analyze the staged changes below and suggest commit messages for them.\n",
    );

    prompt.push_str("\n## Repository Context\n");
    prompt.push_str(&format!("Branch: {branch}\n"));
    if !recent_commits.is_empty() {
        prompt.push_str("\n## Recent Commits\n");
        for subject in recent_commits.iter().take(MAX_RECENT_COMMITS) {
            prompt.push_str(&format!("- {}\n", sanitize_line(subject)));
        }
    }

    prompt.push_str("\n## Staged Changes\n");
    prompt.push_str(&render_changes(diffs));

    prompt.push_str("\n## Requirements\n");
    prompt.push_str(&requirements(config));

    prompt.push_str("\n## Commit Types\n");
    for commit_type in CommitType::ALL {
        prompt.push_str(&format!("- {}: {}\n", commit_type, commit_type.definition()));
    }

    prompt.push_str(&format!(
        "\n## Task\n\
         Generate exactly {SUGGESTION_COUNT} commit message suggestions, ranked from best to worst.\n\
         Give each a confidence score from 0 to 100 and a short reasoning.\n"
    ));

    prompt.push_str(
        "\n## Output Format\n\
         Respond with ONLY a JSON object (no markdown, no explanation):\n\
         {\"suggestions\": [{\"message\": \"feat(auth): add login endpoint\", \"confidence\": 90, \"reasoning\": \"why this message fits\"}]}\n",
    );

    if let Some(extra) = config
        .extra_instructions
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        prompt.push_str("\n## Additional Instructions\n");
        prompt.push_str(extra);
        prompt.push('\n');
    }

    prompt
}

/// Render one block per record: header line then its first change lines.
fn render_changes(diffs: &[DiffRecord]) -> String {
    let mut out = String::new();
    for record in diffs {
        out.push_str(&format!(
            "- {} (+{}/-{}) [{}]\n",
            record.file, record.additions, record.deletions, record.status
        ));
        for change in record.changes().iter().take(MAX_PROMPT_CHANGES) {
            out.push_str(&format!("    {}\n", sanitize_line(change)));
        }
    }
    out
}

fn requirements(config: &GenerationConfig) -> String {
    let mut out = String::new();

    if config.use_conventional_format {
        out.push_str(
            "- Use the Conventional Commits format: `type(scope): description`\n\
             - type is one of the commit types listed below; scope is optional\n\
             - description is in imperative mood, lowercase, with no trailing period\n",
        );
    } else {
        out.push_str(
            "- Write a clear, descriptive sentence in imperative mood\n\
             - Do not use a `type(scope):` prefix\n",
        );
    }

    out.push_str(&format!(
        "- The subject line MUST be at most {} characters\n",
        config.max_message_length
    ));

    if config.include_body {
        out.push_str(
            "- Include a body after a blank line explaining what changed and why\n\
             - Encode the line break inside the JSON string as \\n\n",
        );
    } else {
        out.push_str("- Write only the subject line, with no body\n");
    }

    out
}

/// Strip control characters (tabs kept) so raw diff bytes cannot break the layout.
fn sanitize_line(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\t' || !c.is_control())
        .collect()
}
