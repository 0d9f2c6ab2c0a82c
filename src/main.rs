//! quill - CLI entry point.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use git2::Repository;
use tracing_subscriber::EnvFilter;

use quill::commit::prompt::MAX_RECENT_COMMITS;
use quill::commit::{GenerationInput, Suggestion, generate_suggestions};
use quill::config::Config;
use quill::error::GitError;
use quill::git::{collect_staged, commit_staged, current_branch, push, recent_subjects};
use quill::llm::GeminiClient;
use quill::ui::{self, Choice};

/// Suggest commit messages for staged changes using Gemini.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Suggest commit messages for staged changes using Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Commit the top suggestion without prompting
    #[arg(short = 'y', long)]
    yes: bool,

    /// Push after committing
    #[arg(long)]
    push: bool,

    /// Print suggestions without committing
    #[arg(long)]
    dry_run: bool,

    /// Show debug output (prompt size, raw response)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current settings (API key masked)
    Show,
    /// Set a key, e.g. `quill config set includeBody true`
    Set { key: String, value: String },
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Config { ref action }) => run_config(action),
        None => run_suggest(&cli).await,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "quill=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run_config(action: &ConfigAction) -> Result<()> {
    let path = Config::path().context("Failed to locate config file")?;

    match action {
        ConfigAction::Show => {
            let config = Config::load_from(&path).context("Failed to load config")?;
            let shown = serde_json::to_string_pretty(&config.redacted())?;
            println!("{shown}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&path).context("Failed to load config")?;
            config.set(key, value)?;
            config
                .save_to(&path)
                .context("Failed to save config")?;
            println!("✓ Set {} in {}", key, path.display());
        }
        ConfigAction::Path => println!("{}", path.display()),
    }

    Ok(())
}

async fn run_suggest(cli: &Cli) -> Result<()> {
    // Step 1: Load settings
    let config = Config::load().context("Failed to load config")?;

    // Step 2: Open git repository
    let repo = Repository::discover(".")
        .map_err(GitError::OpenRepository)
        .context("Run quill from within a git repository")?;

    // Step 3: Collect staged changes
    let records = match collect_staged(&repo) {
        Ok(records) => records,
        Err(GitError::NothingStaged) => {
            println!("Nothing staged. Stage files with 'git add' first.");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read staged changes"),
    };
    ui::print_staged(&records);

    // Step 4: Gather context
    let branch = current_branch(&repo);
    let recent = recent_subjects(&repo, MAX_RECENT_COMMITS).unwrap_or_else(|e| {
        tracing::warn!("Could not read recent commits: {e}");
        Vec::new()
    });

    // Step 5: Ask the model
    let api_key = config.api_key()?;
    let client = GeminiClient::new(api_key, config.model.clone())?;

    println!("\nGenerating commit messages with {}...", client.model());

    let input = GenerationInput {
        diffs: &records,
        recent_commits: &recent,
        branch: &branch,
    };
    let mut suggestions = generate_suggestions(&input, &config.generation(), &client)
        .await
        .context("Failed to generate commit messages")?;
    suggestions.retain(|s| !s.message.trim().is_empty());

    if suggestions.is_empty() {
        bail!("The model returned no usable commit messages. Try again or write one yourself.");
    }

    // Step 6: Pick a message
    if cli.dry_run {
        println!();
        ui::print_suggestions(&suggestions);
        return Ok(());
    }

    let message = match pick_message(cli, &suggestions)? {
        Choice::Commit(message) => message,
        Choice::Cancel => {
            println!("Cancelled. Nothing was committed.");
            return Ok(());
        }
    };

    // Step 7: Commit, then optionally push
    let oid = commit_staged(&repo, &message).context("Failed to create commit")?;
    let short = oid.to_string().chars().take(7).collect::<String>();
    println!(
        "✓ Committed {}: {}",
        short,
        message.lines().next().unwrap_or_default()
    );

    let should_push = cli.push || config.auto_push || (!cli.yes && ui::confirm_push()?);
    if should_push {
        let workdir = repo
            .workdir()
            .context("Cannot push from a bare repository")?;
        println!("Pushing...");
        push(workdir).context("Commit was created but push failed")?;
        println!("✓ Pushed");
    }

    Ok(())
}

fn pick_message(cli: &Cli, suggestions: &[Suggestion]) -> Result<Choice> {
    if cli.yes {
        let top = &suggestions[0];
        println!("\nUsing top suggestion ({}% confidence)", top.confidence);
        return Ok(Choice::Commit(top.message.trim().to_string()));
    }

    println!();
    ui::print_suggestions(suggestions);
    println!();
    ui::choose_message(suggestions).context("Selection prompt failed")
}
