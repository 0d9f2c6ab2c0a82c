//! The commit types the prompt teaches the model, and conventional subject parsing.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Pattern: type(scope)!: description, with scope and `!` optional.
static CONVENTIONAL_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*\S").expect("conventional subject regex")
});

/// Recognized commit types, in the order they are listed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 7] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Test,
        CommitType::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }

    /// One-line definition shown to the model.
    pub fn definition(&self) -> &'static str {
        match self {
            CommitType::Feat => "A new feature",
            CommitType::Fix => "A bug fix",
            CommitType::Docs => "Documentation only changes",
            CommitType::Style => "Formatting or whitespace changes that do not affect meaning",
            CommitType::Refactor => "A code change that neither fixes a bug nor adds a feature",
            CommitType::Test => "Adding or correcting tests",
            CommitType::Chore => "Build process, tooling, or dependency maintenance",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "test" => Ok(Self::Test),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// Conventional parts of a suggested subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalSubject {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub breaking: bool,
}

/// Parse the first line of a message as `type(scope)!: description`.
///
/// Returns `None` for free-form messages and for types outside [`CommitType::ALL`].
pub fn parse_conventional(message: &str) -> Option<ConventionalSubject> {
    let first_line = message.lines().next().unwrap_or("").trim();
    let caps = CONVENTIONAL_SUBJECT.captures(first_line)?;

    let commit_type = caps.get(1)?.as_str().parse::<CommitType>().ok()?;
    Some(ConventionalSubject {
        commit_type,
        scope: caps.get(2).map(|m| m.as_str().to_string()),
        breaking: caps.get(3).is_some(),
    })
}
