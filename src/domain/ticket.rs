#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    /// Atlassian document wrapper with a single paragraph.
    Document,
    Plain,
}

impl DescriptionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptionFormat::Document => "document",
            DescriptionFormat::Plain => "plain",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "document" | "doc" | "adf" => Some(DescriptionFormat::Document),
            "plain" | "text" => Some(DescriptionFormat::Plain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub project_key: String,
    pub summary: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: String,
    pub url: String,
}
