//! `sift shell`: one corpus load, many queries.
//!
//! Reads one query per line from stdin until EOF or `:quit`, printing
//! results after each. Lines starting with `:` are commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `:quit`, `:q` | End the session |
//! | `:strategy grouped\|rows` | Switch strategy for following queries |
//! | `:help` | List commands |
//!
//! Any front-end that produces plain text (a terminal, a transcription
//! pipeline) can drive the session through stdin.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use tablesift_core::models::Corpus;
use tablesift_core::search::SearchParams;
use tablesift_core::strategy::StrategyKind;

use crate::config::Config;
use crate::loader;
use crate::search::{render_search, SearchOptions};

const HELP: &str = "commands: :strategy grouped|rows, :quit, :help; anything else is a query";

/// What the session should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Print this text to stdout.
    Print(String),
    /// Print this text to stderr.
    Notice(String),
    Skip,
    Quit,
}

/// Mutable per-session state.
#[derive(Debug, Clone)]
pub struct ShellSession {
    pub params: SearchParams,
    pub json: bool,
}

impl ShellSession {
    pub fn new(params: SearchParams, json: bool) -> Self {
        Self { params, json }
    }

    pub fn handle_line(&mut self, corpus: &Corpus, line: &str) -> ShellAction {
        let line = line.trim();
        if line.is_empty() {
            return ShellAction::Skip;
        }

        if let Some(command) = line.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            return match (parts.next(), parts.next()) {
                (Some("quit") | Some("q"), _) => ShellAction::Quit,
                (Some("help"), _) => ShellAction::Notice(HELP.to_string()),
                (Some("strategy"), Some(kind)) => match kind.parse::<StrategyKind>() {
                    Ok(kind) => {
                        self.params.strategy = kind;
                        ShellAction::Notice(format!("strategy: {}", kind))
                    }
                    Err(e) => ShellAction::Notice(e),
                },
                (Some("strategy"), None) => {
                    ShellAction::Notice(format!("strategy: {}", self.params.strategy))
                }
                _ => ShellAction::Notice(format!("unknown command: {}", line)),
            };
        }

        match render_search(corpus, line, &self.params, self.json) {
            Ok(out) => ShellAction::Print(out),
            Err(e) => ShellAction::Notice(format!("Error: {:#}", e)),
        }
    }
}

pub async fn run_shell(config: &Config, opts: &SearchOptions) -> Result<()> {
    let corpus = loader::load_configured_corpus(config).await?;
    let mut session = ShellSession::new(opts.params(config), opts.json);
    let interactive = atty::is(atty::Stream::Stdin);

    info!(records = corpus.len(), strategy = %session.params.strategy, "shell session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            eprint!("sift> ");
            std::io::stderr().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match session.handle_line(&corpus, &line) {
            ShellAction::Print(out) => println!("{}\n", out),
            ShellAction::Notice(msg) => eprintln!("{}", msg),
            ShellAction::Skip => {}
            ShellAction::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesift_core::models::Record;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Record::builder("hr", "staff").text("name", "john smith").build(),
            Record::builder("hr", "staff").text("name", "jane doe").build(),
        ])
    }

    fn session() -> ShellSession {
        ShellSession::new(SearchParams::default(), false)
    }

    #[test]
    fn test_quit_and_blank() {
        let mut s = session();
        assert_eq!(s.handle_line(&corpus(), "   "), ShellAction::Skip);
        assert_eq!(s.handle_line(&corpus(), ":quit"), ShellAction::Quit);
        assert_eq!(s.handle_line(&corpus(), ":q"), ShellAction::Quit);
    }

    #[test]
    fn test_switch_strategy() {
        let mut s = session();
        let c = corpus();
        assert_eq!(
            s.handle_line(&c, ":strategy rows"),
            ShellAction::Notice("strategy: rows".to_string())
        );
        assert_eq!(s.params.strategy, StrategyKind::Rows);
        match s.handle_line(&c, "john") {
            ShellAction::Print(out) => assert!(out.starts_with("ORIGIN")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_strategy_keeps_current() {
        let mut s = session();
        assert!(matches!(
            s.handle_line(&corpus(), ":strategy fuzzy"),
            ShellAction::Notice(_)
        ));
        assert_eq!(s.params.strategy, StrategyKind::Grouped);
    }

    #[test]
    fn test_query_prints_results() {
        let mut s = session();
        match s.handle_line(&corpus(), "jane") {
            ShellAction::Print(out) => {
                assert!(out.contains("hr/staff"));
                assert!(out.contains("100.00%"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            s.handle_line(&corpus(), "zebra"),
            ShellAction::Print("No results.".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut s = session();
        assert_eq!(
            s.handle_line(&corpus(), ":frobnicate"),
            ShellAction::Notice("unknown command: :frobnicate".to_string())
        );
    }
}
