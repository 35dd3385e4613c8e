use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration read from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = AppConfig::from_env()?;

    println!("Discord API base: {}", cfg.discord_api_base);
    println!("Discord token: {}", mask_secret(&cfg.discord_token));
    println!("Trigger emoji: {}", cfg.trigger_emoji);
    println!("Jira base URL: {}", cfg.jira_base_url);
    println!("Jira email: {}", cfg.jira_email);
    println!("Jira API token: {}", mask_secret(&cfg.jira_token));
    println!("Default project: {}", cfg.default_project_key);
    println!("Issue type: {}", cfg.jira_issue_type);
    println!("Description format: {}", cfg.description_format.as_str());
    println!("OpenAI base URL: {}", cfg.openai_base_url);
    println!("OpenAI API key: {}", mask_secret(&cfg.openai_api_key));
    println!("OpenAI model: {}", cfg.openai_model);
    println!("Parse strategy: {}", cfg.parse_strategy.as_str());
    println!("Response language: {}", cfg.response_language);
    println!("HTTP timeout: {}s", cfg.http_timeout.as_secs());

    Ok(())
}

fn mask_secret(value: &str) -> String {
    let chars = value.chars().collect::<Vec<_>>();
    match chars.len() {
        len if len > 6 => {
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[len - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        0 => "<not set>".to_string(),
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret("sk-abcdef123"), "sk-***123");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "<not set>");
    }
}
