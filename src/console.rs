//! Terminal surface and stdin command source.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use video_request_client::models::{NewVideoRequest, SortOrder, TargetLevel, VoteType};
use video_request_client::render::{vote_control_id, MemorySurface};
use video_request_client::{DocumentPatch, EventSource, Surface, UiEvent};

pub const HELP: &str = "\
commands:
  sort none | sort top
  search <term>
  vote up <id> | vote down <id>
  submit <title> | <details> | <expected result> | <level> | <author>
  refresh | show | help | quit";

/// Surface that keeps the page in memory and prints the list when it changes.
#[derive(Default)]
pub struct ConsoleSurface {
    inner: MemorySurface,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn print(&self) {
        println!("{}", self.inner.snapshot());
    }
}

impl Surface for ConsoleSurface {
    fn apply(&self, patch: DocumentPatch) {
        let redraw = patch.touches_list();
        self.inner.apply(patch);
        if redraw {
            self.print();
        }
    }

    fn form_data(&self) -> NewVideoRequest {
        self.inner.form_data()
    }
}

/// A parsed stdin line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(UiEvent),
    /// Fill the form, then submit it
    Submit(NewVideoRequest),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "sort" => match rest {
            "none" | "newest" => Ok(Command::Event(UiEvent::SortClick(SortOrder::ServerOrder))),
            "top" => Ok(Command::Event(UiEvent::SortClick(SortOrder::TopVotedFirst))),
            other => Err(format!("unknown sort order '{}'", other)),
        },
        // An empty term clears the search
        "search" => Ok(Command::Event(UiEvent::SearchInput(rest.to_string()))),
        "vote" => {
            let (direction, id) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: vote up|down <id>".to_string())?;
            let vote_type = match direction {
                "up" => VoteType::Up,
                "down" => VoteType::Down,
                other => return Err(format!("unknown vote direction '{}'", other)),
            };
            Ok(Command::Event(UiEvent::ListClick {
                target_id: vote_control_id(id.trim(), vote_type),
            }))
        }
        "submit" => {
            let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
            let &[title, details, expected, level, author] = parts.as_slice() else {
                return Err(
                    "usage: submit <title> | <details> | <expected result> | <level> | <author>"
                        .to_string(),
                );
            };
            let target_level = TargetLevel::parse(level)
                .ok_or_else(|| format!("unknown level '{}'", level))?;
            Ok(Command::Submit(NewVideoRequest {
                topic_title: title.to_string(),
                topic_details: details.to_string(),
                expected_result: expected.to_string(),
                target_level,
                author_name: author.to_string(),
            }))
        }
        "refresh" => Ok(Command::Event(UiEvent::Refresh)),
        "show" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}'", other)),
    }
}

/// Reads commands from stdin and turns them into UI events.
pub struct StdinEvents {
    lines: Lines<BufReader<Stdin>>,
    surface: Arc<ConsoleSurface>,
}

impl StdinEvents {
    pub fn new(surface: Arc<ConsoleSurface>) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            surface,
        }
    }

    async fn next(&mut self) -> Option<UiEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    return None;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Ok(Command::Event(event)) => return Some(event),
                Ok(Command::Submit(form)) => {
                    self.surface.inner.fill_form(form);
                    return Some(UiEvent::Submit);
                }
                Ok(Command::Show) => self.surface.print(),
                Ok(Command::Help) => println!("{}", HELP),
                Ok(Command::Quit) => return None,
                Err(message) => eprintln!("{}", message),
            }
        }
    }
}

impl EventSource for StdinEvents {
    fn next_event(&mut self) -> BoxFuture<'_, Option<UiEvent>> {
        self.next().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_command("sort top"),
            Ok(Command::Event(UiEvent::SortClick(SortOrder::TopVotedFirst)))
        );
        assert_eq!(
            parse_command("sort none"),
            Ok(Command::Event(UiEvent::SortClick(SortOrder::ServerOrder)))
        );
        assert!(parse_command("sort sideways").is_err());
    }

    #[test]
    fn test_parse_vote_targets_vote_control() {
        assert_eq!(
            parse_command("vote down 5ec1"),
            Ok(Command::Event(UiEvent::ListClick {
                target_id: "votes_downs_5ec1".to_string()
            }))
        );
        assert!(parse_command("vote 5ec1").is_err());
    }

    #[test]
    fn test_parse_search_allows_empty_term() {
        assert_eq!(
            parse_command("search"),
            Ok(Command::Event(UiEvent::SearchInput(String::new())))
        );
        assert_eq!(
            parse_command("search  async traits "),
            Ok(Command::Event(UiEvent::SearchInput("async traits".to_string())))
        );
    }

    #[test]
    fn test_parse_submit() {
        let parsed = parse_command("submit Tokio | Runtime internals |  | advanced | Ana");
        assert_eq!(
            parsed,
            Ok(Command::Submit(NewVideoRequest {
                topic_title: "Tokio".to_string(),
                topic_details: "Runtime internals".to_string(),
                expected_result: String::new(),
                target_level: TargetLevel::Advanced,
                author_name: "Ana".to_string(),
            }))
        );
        assert!(parse_command("submit only | three | parts").is_err());
        assert!(parse_command("submit a | b | c | wizard | d").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("refresh"), Ok(Command::Event(UiEvent::Refresh)));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("dance").is_err());
    }
}
