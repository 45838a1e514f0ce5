use std::fmt;
use std::path::PathBuf;

use path_core::model::{IdError, QuestionId};
use services::{Clock, LearningPathService, LessonError};
use storage::{CatalogSnapshot, Storage};
use tracing::info;

mod render;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingCatalog,
    MissingQuestionId,
    UnknownArg(String),
    InvalidQuestionId { raw: String, source: IdError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingCatalog => {
                write!(f, "no catalog snapshot given (use --catalog or LEARN_CATALOG)")
            }
            ArgsError::MissingQuestionId => write!(f, "enter requires a question id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuestionId { raw, source } => {
                write!(f, "invalid question id {raw:?}: {source}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- path  [--catalog <file>] [--completed <id,id,...>] [--json]");
    eprintln!("  cargo run -p app -- next  [--catalog <file>] [--completed <id,id,...>]");
    eprintln!("  cargo run -p app -- enter <question-id> [--catalog <file>] [--completed <id,id,...>]");
    eprintln!();
    eprintln!("--json is only valid with path.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LEARN_CATALOG    catalog snapshot JSON (units, questions, completed)");
    eprintln!("  LEARN_COMPLETED  extra completed question ids, comma separated");
    eprintln!("  RUST_LOG         log filter (default: info)");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Path { json: bool },
    Next,
    Enter(QuestionId),
}

#[derive(Debug)]
struct Args {
    command: Command,
    catalog: PathBuf,
    completed: Vec<QuestionId>,
}

fn parse_completed(raw: &str) -> Vec<QuestionId> {
    raw.split(',')
        .filter_map(|part| part.parse::<QuestionId>().ok())
        .collect()
}

impl Args {
    fn parse(
        argv: impl IntoIterator<Item = String>,
        env_catalog: Option<String>,
        env_completed: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let sub = match args.peek().map(String::as_str) {
            Some("path" | "next" | "enter") => args.next(),
            _ => None,
        };

        let mut catalog = env_catalog
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut completed = env_completed
            .as_deref()
            .map(parse_completed)
            .unwrap_or_default();
        let mut json = false;
        let mut question: Option<String> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(&mut args, "--catalog")?));
                }
                "--completed" => {
                    let value = require_value(&mut args, "--completed")?;
                    completed.extend(parse_completed(&value));
                }
                "--json" if matches!(sub.as_deref(), None | Some("path")) => json = true,
                other if !other.starts_with("--")
                    && sub.as_deref() == Some("enter")
                    && question.is_none() =>
                {
                    question = Some(arg);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = match sub.as_deref() {
            Some("next") => Command::Next,
            Some("enter") => {
                let raw = question.ok_or(ArgsError::MissingQuestionId)?;
                let id = raw
                    .parse::<QuestionId>()
                    .map_err(|source| ArgsError::InvalidQuestionId { raw, source })?;
                Command::Enter(id)
            }
            _ => Command::Path { json },
        };

        Ok(Self {
            command,
            catalog: catalog.ok_or(ArgsError::MissingCatalog)?,
            completed,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), Some("--help" | "-h" | "help")) {
        print_usage();
        return Ok(());
    }

    let args = Args::parse(
        argv,
        std::env::var("LEARN_CATALOG").ok(),
        std::env::var("LEARN_COMPLETED").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let snapshot = CatalogSnapshot::load(&args.catalog).await?;
    let repo = snapshot.into_repository()?;
    repo.import_completions(args.completed)?;
    let storage = Storage::from_repository(repo);
    let service = LearningPathService::from_storage(Clock::system(), &storage);

    match args.command {
        Command::Path { json } => {
            let path = service.load_path().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&path)?);
            } else {
                print!("{}", render::render_path(&path));
            }
        }
        Command::Next => {
            let path = service.load_path().await?;
            print!("{}", render::render_next(&path));
        }
        Command::Enter(id) => match service.enter_lesson(&id).await {
            Ok(ticket) => {
                info!(%id, unit = %ticket.unit_id, "lesson entry granted");
                println!("{}: {}", ticket.tile.id, ticket.tile.description);
            }
            Err(err @ (LessonError::NotActive { .. } | LessonError::UnknownTile(_))) => {
                println!("{err}");
            }
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn defaults_to_path_command() {
        let args = Args::parse(argv(&["--catalog", "c.json"]), None, None).unwrap();
        assert_eq!(args.command, Command::Path { json: false });
        assert_eq!(args.catalog, PathBuf::from("c.json"));
    }

    #[test]
    fn env_supplies_catalog_and_completed() {
        let args = Args::parse(
            argv(&["next", "--completed", "q3"]),
            Some("snap.json".into()),
            Some("q1, q2,,".into()),
        )
        .unwrap();
        assert_eq!(args.command, Command::Next);
        assert_eq!(args.catalog, PathBuf::from("snap.json"));
        let ids: Vec<&str> = args.completed.iter().map(QuestionId::as_str).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn enter_requires_question_id() {
        let err = Args::parse(argv(&["enter", "--catalog", "c.json"]), None, None).unwrap_err();
        assert!(matches!(err, ArgsError::MissingQuestionId));

        let args = Args::parse(argv(&["enter", "q7", "--catalog", "c.json"]), None, None).unwrap();
        assert_eq!(args.command, Command::Enter(QuestionId::new("q7")));
    }

    #[test]
    fn missing_catalog_is_reported() {
        let err = Args::parse(argv(&["path", "--json"]), None, None).unwrap_err();
        assert!(matches!(err, ArgsError::MissingCatalog));
    }

    #[test]
    fn json_is_only_accepted_for_path() {
        let args = Args::parse(argv(&["path", "--json"]), Some("c.json".into()), None).unwrap();
        assert_eq!(args.command, Command::Path { json: true });

        for sub in ["next", "enter"] {
            let err = Args::parse(argv(&[sub, "--json"]), Some("c.json".into()), None).unwrap_err();
            assert!(matches!(err, ArgsError::UnknownArg(arg) if arg == "--json"));
        }
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = Args::parse(argv(&["--db", "x"]), Some("c.json".into()), None).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownArg(arg) if arg == "--db"));
    }
}
