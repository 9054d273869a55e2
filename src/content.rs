//! Presentation content: reading paragraphs, quiz questions and credits
//!
//! Content is data. The built-in set is embedded at compile time and goes
//! through the same validation as any other document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BUILTIN: &str = include_str!("../assets/content.json");

/// One of the four answer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// Lower-case letter used in content documents
    pub fn letter(self) -> &'static str {
        match self {
            Choice::A => "a",
            Choice::B => "b",
            Choice::C => "c",
            Choice::D => "d",
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Choice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Choice::A),
            "b" => Ok(Choice::B),
            "c" => Ok(Choice::C),
            "d" => Ok(Choice::D),
            _ => Err(Error::UnknownChoice(s.to_string())),
        }
    }
}

impl TryFrom<String> for Choice {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Choice> for String {
    fn from(c: Choice) -> String {
        c.letter().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: Choice,
}

/// A credits entry that opens a page when clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub header: String,
    /// Plain lines shown above the links
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Everything the presentation shows besides its own chrome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Paragraphs of the reading pane, top to bottom
    pub reading: Vec<String>,
    pub questions: Vec<Question>,
    /// Prompt text after a correct answer
    #[serde(default = "default_correct")]
    pub correct: String,
    /// Prompt text after an incorrect answer
    #[serde(default = "default_incorrect")]
    pub incorrect: String,
    /// Prompt text once every question is answered
    pub final_message: String,
    pub credits: Credits,
}

fn default_correct() -> String {
    "Correct!".to_string()
}

fn default_incorrect() -> String {
    "Incorrect!".to_string()
}

impl Content {
    /// The content shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    /// Parse and validate a content document
    pub fn from_json(json: &str) -> Result<Self> {
        let content: Self = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(Error::InvalidContent("at least one question is required".into()));
        }
        if let Some(i) = self.questions.iter().position(|q| q.prompt.trim().is_empty()) {
            return Err(Error::InvalidContent(format!("question {} has an empty prompt", i + 1)));
        }
        if let Some(link) = self.credits.links.iter().find(|l| !is_web_url(&l.url)) {
            return Err(Error::InvalidContent(format!(
                "credits link `{}` has a non-http URL `{}`",
                link.label, link.url
            )));
        }
        Ok(())
    }
}

fn is_web_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
