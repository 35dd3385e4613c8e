use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

static TITLE_LABEL: LazyLock<Regex> = LazyLock::new(|| label_pattern("title|t[ií]tulo"));
static CONTEXT_LABEL: LazyLock<Regex> = LazyLock::new(|| label_pattern("context|contexto"));
static SUMMARY_LABEL: LazyLock<Regex> = LazyLock::new(|| label_pattern("summary|resumo"));

fn label_pattern(names: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)^\s*(?:\d+\.\s*)?(?:\*\*)?\s*(?:{names})\s*:\s*(?:\*\*)?\s*"
    ))
    .expect("label pattern is a valid regex")
}

/// Title, context and summary drafted by the language model for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResult {
    pub title: String,
    pub context: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Scan for `title` / `context` / `summary` header lines and collect the
    /// lines that follow each one.
    HeaderScan,
    /// Read title, context and summary from the first three lines.
    FixedLines,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::HeaderScan => "headers",
            ParseStrategy::FixedLines => "lines",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "headers" | "header" | "header-scan" => Some(ParseStrategy::HeaderScan),
            "lines" | "fixed" | "fixed-lines" => Some(ParseStrategy::FixedLines),
            _ => None,
        }
    }

    pub fn parse(&self, text: &str) -> AppResult<CompletionResult> {
        match self {
            ParseStrategy::HeaderScan => Ok(parse_sections(text)),
            ParseStrategy::FixedLines => parse_fixed_lines(text),
        }
    }
}

#[derive(Clone, Copy)]
enum Section {
    Title,
    Context,
    Summary,
}

fn header_section(line: &str) -> Option<Section> {
    let lowered = line.trim().to_lowercase();
    if lowered.contains("title") {
        Some(Section::Title)
    } else if lowered.contains("context") {
        Some(Section::Context)
    } else if lowered.contains("summary") {
        Some(Section::Summary)
    } else {
        None
    }
}

pub fn parse_sections(text: &str) -> CompletionResult {
    let mut title = Vec::new();
    let mut context = Vec::new();
    let mut summary = Vec::new();
    let mut current = None;

    for line in text.lines() {
        if let Some(section) = header_section(line) {
            current = Some(section);
            continue;
        }
        let buffer = match current {
            Some(Section::Title) => &mut title,
            Some(Section::Context) => &mut context,
            Some(Section::Summary) => &mut summary,
            None => continue,
        };
        buffer.push(line.trim());
    }

    CompletionResult {
        title: title.join(" ").trim().to_string(),
        context: context.join(" ").trim().to_string(),
        summary: summary.join(" ").trim().to_string(),
    }
}

pub fn parse_fixed_lines(text: &str) -> AppResult<CompletionResult> {
    let lines = text.lines().collect::<Vec<_>>();
    if lines.len() < 3 {
        return Err(AppError::Parse(format!(
            "expected at least 3 lines in completion, got {}",
            lines.len()
        )));
    }

    Ok(CompletionResult {
        title: strip_label(&TITLE_LABEL, lines[0]),
        context: strip_label(&CONTEXT_LABEL, lines[1]),
        summary: strip_label(&SUMMARY_LABEL, lines[2]),
    })
}

fn strip_label(label: &Regex, line: &str) -> String {
    label.replace(line, "").trim().to_string()
}
