//! chatfmt CLI - reply formatter and Gemini prompt relay

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use chatfmt::relay::{RelayConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PORT};
use chatfmt::{ChatHistory, EntryId, FormatOptions, JsonFormat};

mod client;
mod server;

use client::GeminiClient;

#[derive(Parser)]
#[command(name = "chatfmt")]
#[command(author = "chatfmt contributors")]
#[command(version)]
#[command(about = "Format Gemini replies as HTML and relay prompts upstream", long_about = None)]
struct Cli {
    /// Input text file (stdin if "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a reply as HTML
    #[command(alias = "fmt")]
    Format {
        /// Input text file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// HTML-escape reply content before formatting
        #[arg(long)]
        escape: bool,

        /// Copy button label
        #[arg(long, value_name = "LABEL")]
        copy_label: Option<String>,

        /// Leave the clipboard icon out of code headers
        #[arg(long)]
        no_icon: bool,

        /// Print formatting statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Dump the split and classified segments as JSON
    Segments {
        /// Input text file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run the HTTP relay
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        #[command(flatten)]
        api: ApiArgs,

        /// HTML-escape replies formatted by the relay
        #[arg(long)]
        escape: bool,
    },

    /// Send one prompt upstream and print the reply
    Ask {
        /// Prompt text
        #[arg(value_name = "PROMPT")]
        prompt: String,

        #[command(flatten)]
        api: ApiArgs,

        /// History file to record the exchange in
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,

        /// Print the raw reply instead of HTML
        #[arg(long)]
        raw: bool,

        /// HTML-escape the reply before formatting
        #[arg(long)]
        escape: bool,
    },

    /// Manage a saved chat history
    History {
        /// History file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recent prompts, newest first
    List,

    /// Show one entry with its formatted reply
    Show {
        /// Position in the list (0 = newest)
        index: usize,

        /// Print the raw reply instead of HTML
        #[arg(long)]
        raw: bool,
    },

    /// Delete one entry, by position or by id
    Delete {
        /// Position in the list (0 = newest)
        #[arg(required_unless_present = "id")]
        index: Option<usize>,

        /// Entry id, as shown by `list`
        #[arg(long, conflicts_with = "index")]
        id: Option<u64>,
    },
}

/// Upstream connection settings shared by `serve` and `ask`.
#[derive(Args)]
struct ApiArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl ApiArgs {
    fn into_config(self) -> RelayConfig {
        RelayConfig::new(self.api_key)
            .with_model(self.model)
            .with_base_url(self.base_url)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Format {
            input,
            output,
            escape,
            copy_label,
            no_icon,
            stats,
        }) => {
            let options = format_options(escape, copy_label, no_icon);
            cmd_format(input.as_deref(), output.as_deref(), &options, stats)
        }
        Some(Commands::Segments { input, compact }) => cmd_segments(input.as_deref(), compact),
        Some(Commands::Serve {
            host,
            port,
            api,
            escape,
        }) => cmd_serve(
            api.into_config()
                .with_host(host)
                .with_port(port)
                .with_escape_html(escape),
        ),
        Some(Commands::Ask {
            prompt,
            api,
            history,
            raw,
            escape,
        }) => cmd_ask(&prompt, api.into_config(), history.as_deref(), raw, escape),
        Some(Commands::History { file, action }) => cmd_history(&file, action),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: format the input if one is provided
            if let Some(input) = cli.input {
                cmd_format(Some(&input), None, &FormatOptions::default(), false)
            } else {
                println!("{}", "Usage: chatfmt <FILE>".yellow());
                println!("       chatfmt --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn format_options(escape: bool, copy_label: Option<String>, no_icon: bool) -> FormatOptions {
    let mut options = FormatOptions::new().with_copy_icon(!no_icon);
    if escape {
        options = options.escaped();
    }
    if let Some(label) = copy_label {
        options = options.with_copy_label(label);
    }
    options
}

/// Read a file, or stdin when the path is absent or "-".
fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_format(
    input: Option<&Path>,
    output: Option<&Path>,
    options: &FormatOptions,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;

    if !show_stats {
        let html = chatfmt::format_with_options(&raw, options);
        write_output(output, html.as_trusted_html())?;
        return Ok(());
    }

    let result = chatfmt::render::to_html_with_stats(&raw, options);
    write_output(output, result.html.as_trusted_html())?;

    let stats = &result.stats;
    eprintln!("{}", "Format Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Text segments".bold(), stats.text_segments);
    eprintln!(
        "{}: {} ({} tagged)",
        "Code blocks".bold(),
        stats.code_segments,
        stats.tagged_code_segments
    );
    eprintln!("{}: {}", "Bold spans".bold(), stats.bold_count);
    eprintln!("{}: {}", "Bullets".bold(), stats.bullet_count);
    eprintln!("{}: {}", "Line breaks".bold(), stats.line_break_count);

    Ok(())
}

fn cmd_segments(input: Option<&Path>, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = chatfmt::to_segments_json(&raw, format)?;
    println!("{}", json);

    Ok(())
}

fn cmd_serve(config: RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::new(config.clone())?;

    println!(
        "{} http://{} ({})",
        "Relay starting on".cyan(),
        config.bind_addr(),
        config.model
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(config, Arc::new(client)))?;

    Ok(())
}

fn cmd_ask(
    prompt: &str,
    config: RelayConfig,
    history_path: Option<&Path>,
    raw: bool,
    escape: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if prompt.trim().is_empty() {
        return Err("Prompt is required.".into());
    }

    let client = GeminiClient::new(config)?;

    let mut history = match history_path {
        Some(path) => Some(ChatHistory::load(path)?),
        None => None,
    };
    let entry = history.as_mut().map(|h| h.record(prompt)).transpose()?;

    let rt = tokio::runtime::Runtime::new()?;
    let reply = rt.block_on(client.generate_text(prompt))?;

    if let (Some(history), Some(id), Some(path)) = (history.as_mut(), entry, history_path) {
        history.set_reply(id, reply.as_str())?;
        history.save(path)?;
        log::info!("Recorded {} in {}", id, path.display());
    }

    if raw {
        println!("{}", reply);
    } else {
        let mut options = FormatOptions::new();
        if escape {
            options = options.escaped();
        }
        println!("{}", chatfmt::format_with_options(&reply, &options).as_trusted_html());
    }

    Ok(())
}

fn cmd_history(file: &Path, action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = ChatHistory::load(file)?;

    match action {
        HistoryAction::List => {
            if history.is_empty() {
                println!("{}", "No recent prompts".dimmed());
                return Ok(());
            }

            println!("{}", "Recent".cyan().bold());
            println!("{}", "─".repeat(40).dimmed());
            for (index, entry) in history.iter().enumerate() {
                let marker = if entry.reply.is_some() { " " } else { "?" };
                println!(
                    "{:>3} {:<6} {} {} {}",
                    index.to_string().bold(),
                    entry.id.to_string().dimmed(),
                    marker.yellow(),
                    entry.preview(),
                    entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
                );
            }
        }
        HistoryAction::Show { index, raw } => {
            let entry = history.select(index)?;

            println!("{}: {}", "Prompt".bold(), entry.prompt);
            println!("{}: {}", "Asked".bold(), entry.created_at.to_rfc3339());
            println!("{}", "─".repeat(40).dimmed());
            match entry.reply.as_deref() {
                Some(reply) if raw => println!("{}", reply),
                Some(reply) => println!("{}", chatfmt::format(reply).as_trusted_html()),
                None => println!("{}", "No reply recorded".dimmed()),
            }
        }
        HistoryAction::Delete { index, id } => {
            let removed = match (index, id) {
                (_, Some(id)) => history.delete_id(EntryId(id))?,
                (Some(index), None) => history.delete(index)?,
                (None, None) => return Err("Give a position or --id".into()),
            };
            history.save(file)?;
            println!("{} {}", "Deleted".green(), removed.preview());
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "chatfmt".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Gemini reply formatter and prompt relay");
    println!();
    println!("Default model: {}", DEFAULT_MODEL.dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatfmt::EscapePolicy;

    #[test]
    fn test_cli_parses_format() {
        let cli = Cli::try_parse_from(["chatfmt", "format", "in.txt", "--escape", "--no-icon"])
            .unwrap();
        match cli.command {
            Some(Commands::Format {
                input,
                escape,
                no_icon,
                ..
            }) => {
                assert_eq!(input, Some(PathBuf::from("in.txt")));
                assert!(escape);
                assert!(no_icon);
            }
            _ => panic!("expected format command"),
        }
    }

    #[test]
    fn test_cli_parses_history_show() {
        let cli =
            Cli::try_parse_from(["chatfmt", "history", "--file", "h.json", "show", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                action: HistoryAction::Show { index: 2, raw: false },
                ..
            })
        ));
    }

    #[test]
    fn test_api_args_into_config() {
        let cli = Cli::try_parse_from([
            "chatfmt",
            "ask",
            "hi",
            "--api-key",
            "k",
            "--model",
            "m",
            "--base-url",
            "http://localhost:1",
        ])
        .unwrap();
        let Some(Commands::Ask { api, .. }) = cli.command else {
            panic!("expected ask command");
        };
        let config = api.into_config();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, "m");
        assert_eq!(config.base_url, "http://localhost:1");
    }

    #[test]
    fn test_format_options() {
        let options = format_options(true, Some("Copiar".to_string()), true);
        assert_eq!(options.escape, EscapePolicy::Escape);
        assert_eq!(options.copy_label, "Copiar");
        assert!(!options.copy_icon);

        let defaults = format_options(false, None, false);
        assert_eq!(defaults.escape, EscapePolicy::Trusted);
        assert!(defaults.copy_icon);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        fs::write(&path, "**x**").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "**x**");
    }

    #[test]
    fn test_cmd_format_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reply.txt");
        let output = dir.path().join("reply.html");
        fs::write(&input, "a\n* b").unwrap();

        cmd_format(Some(&input), Some(&output), &FormatOptions::default(), false).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "a<br/>&emsp;b");
    }

    #[test]
    fn test_cmd_history_delete() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.json");

        let mut history = ChatHistory::new();
        history.record("first").unwrap();
        history.record("second").unwrap();
        history.save(&file).unwrap();

        cmd_history(
            &file,
            HistoryAction::Delete {
                index: Some(0),
                id: None,
            },
        )
        .unwrap();

        let history = ChatHistory::load(&file).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).unwrap().prompt, "first");
    }

    #[test]
    fn test_cmd_format_with_stats_writes_same_markup() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reply.txt");
        let output = dir.path().join("reply.html");
        fs::write(&input, "**a**\n* b").unwrap();

        cmd_format(Some(&input), Some(&output), &FormatOptions::default(), true).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<strong>a</strong><br/>&emsp;b"
        );
    }

    #[test]
    fn test_cli_parses_history_delete_by_id() {
        let cli = Cli::try_parse_from(["chatfmt", "history", "-f", "h.json", "delete", "--id", "4"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                action: HistoryAction::Delete {
                    index: None,
                    id: Some(4)
                },
                ..
            })
        ));

        assert!(Cli::try_parse_from(["chatfmt", "history", "-f", "h.json", "delete"]).is_err());
        assert!(
            Cli::try_parse_from(["chatfmt", "history", "-f", "h.json", "delete", "0", "--id", "1"])
                .is_err()
        );
    }

    #[test]
    fn test_cmd_history_delete_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.json");

        let mut history = ChatHistory::new();
        let first = history.record("first").unwrap();
        history.record("second").unwrap();
        history.save(&file).unwrap();

        cmd_history(
            &file,
            HistoryAction::Delete {
                index: None,
                id: Some(first.0),
            },
        )
        .unwrap();

        let history = ChatHistory::load(&file).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).unwrap().prompt, "second");

        let missing = cmd_history(
            &file,
            HistoryAction::Delete {
                index: None,
                id: Some(first.0),
            },
        );
        assert!(missing.is_err());
    }

    #[test]
    fn test_cmd_history_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.json");

        let result = cmd_history(
            &file,
            HistoryAction::Delete {
                index: Some(3),
                id: None,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_ask_rejects_blank_prompt() {
        let result = cmd_ask("  ", RelayConfig::new("k"), None, true, false);
        assert!(result.is_err());
    }
}
