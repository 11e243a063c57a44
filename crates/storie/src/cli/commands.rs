//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storie::VisualStyle;
use uuid::Uuid;

/// Storie - illustrated bedtime storybooks from a one-line idea
#[derive(Parser, Debug)]
#[command(name = "storie")]
#[command(about = "Generate, browse and touch up illustrated bedtime storybooks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Load configuration from this file instead of the default layers
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Account email (falls back to STORIE_EMAIL)
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Account password (falls back to STORIE_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a storybook and generate its pages
    Create {
        #[command(flatten)]
        story: StoryArgs,

        /// Run the job in the background and poll its status until it settles
        #[arg(long)]
        wait: bool,
    },

    /// List your storybooks, newest first
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Read a storybook page by page
    Show {
        /// Storybook id
        id: Uuid,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Regenerate one page's illustration or text
    Regenerate {
        /// Page id
        page_id: Uuid,

        #[command(flatten)]
        target: RegenerateTarget,

        /// What to change, in your own words
        #[arg(long)]
        feedback: Option<String>,
    },

    /// Delete a storybook and its pages
    Delete {
        /// Storybook id
        id: Uuid,
    },

    /// Wait until a storybook finishes generating
    Wait {
        /// Storybook id
        id: Uuid,
    },

    /// List the available visual styles
    Styles,

    /// Generate a storybook locally without the hosted backend
    Draft {
        #[command(flatten)]
        story: StoryArgs,

        /// Directory receiving the illustrations
        #[arg(long)]
        out: PathBuf,
    },
}

/// The story to write.
#[derive(Args, Debug, Clone)]
pub struct StoryArgs {
    /// Story premise
    #[arg(long)]
    pub prompt: String,

    /// Name of the child starring in the story
    #[arg(long)]
    pub child_name: String,

    /// Illustration style (see `storie styles`)
    #[arg(long, default_value = "watercolor")]
    pub style: VisualStyle,
}

/// Which part of the page to regenerate.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct RegenerateTarget {
    /// Redraw the illustration
    #[arg(long)]
    pub image: bool,

    /// Rewrite the text
    #[arg(long)]
    pub text: bool,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_parses_style_and_wait() {
        let cli = Cli::try_parse_from([
            "storie",
            "create",
            "--prompt",
            "A snail who races the rain",
            "--child-name",
            "Ivy",
            "--style",
            "digital_art",
            "--wait",
        ])
        .unwrap();

        match cli.command {
            Commands::Create { story, wait } => {
                assert_eq!(story.style, VisualStyle::DigitalArt);
                assert_eq!(story.child_name, "Ivy");
                assert!(wait);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn regenerate_needs_exactly_one_target() {
        let id = Uuid::new_v4().to_string();
        assert!(Cli::try_parse_from(["storie", "regenerate", &id]).is_err());
        assert!(Cli::try_parse_from(["storie", "regenerate", &id, "--image", "--text"]).is_err());

        let cli = Cli::try_parse_from([
            "storie",
            "regenerate",
            &id,
            "--text",
            "--feedback",
            "more rhymes",
        ])
        .unwrap();
        match cli.command {
            Commands::Regenerate {
                target, feedback, ..
            } => {
                assert!(target.text && !target.image);
                assert_eq!(feedback.as_deref(), Some("more rhymes"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_style_is_rejected() {
        let result = Cli::try_parse_from([
            "storie", "draft", "--prompt", "p", "--child-name", "c", "--style", "oil", "--out",
            "/tmp/x",
        ]);
        assert!(result.is_err());
    }
}
