use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error, info};
use serde::de::DeserializeOwned;

use userkit::config::Config;
use userkit::error::AppError;
use userkit::models::{CreateUserRequest, User, UserFilter, UserListResponse, UserStatus};
use userkit::presenter::UserCard;
use userkit::validation::validate_user;

/// Validate and present user records read as JSON.
#[derive(Parser, Debug)]
#[command(name = "userkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a `{username, email}` submission and print one violation per line.
    Validate {
        /// JSON file to read; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Render one user as a card.
    Render {
        /// JSON file to read; stdin when omitted.
        file: Option<PathBuf>,
        /// Leave out the edit/delete controls.
        #[arg(long)]
        hide_actions: bool,
        /// Emit the display tree as JSON instead of markup.
        #[arg(long)]
        json: bool,
    },
    /// Filter and paginate an array of users.
    List {
        /// JSON file to read; stdin when omitted.
        file: Option<PathBuf>,
        #[arg(long, value_parser = parse_status)]
        status: Option<UserStatus>,
        #[arg(long)]
        search: Option<String>,
        /// Only users created strictly after this instant (RFC 3339 or `YYYY-MM-DD[THH:MM:SS]`, UTC).
        #[arg(long)]
        after: Option<String>,
        /// Only users created strictly before this instant.
        #[arg(long)]
        before: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Defaults to USERKIT_PAGE_SIZE.
        #[arg(long)]
        page_size: Option<usize>,
    },
}

fn parse_status(raw: &str) -> Result<UserStatus, String> {
    match raw {
        "active" => Ok(UserStatus::Active),
        "inactive" => Ok(UserStatus::Inactive),
        other => Err(format!("expected 'active' or 'inactive', got '{}'", other)),
    }
}

fn read_json<T: DeserializeOwned>(file: Option<&PathBuf>, input: impl Read) -> Result<T, AppError> {
    match file {
        Some(path) => {
            debug!("reading {}", path.display());
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        None => Ok(serde_json::from_reader(input)?),
    }
}

/// Executes one subcommand. `input` stands in for stdin when no file is given.
fn run(
    command: Command,
    config: &Config,
    input: impl Read,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command {
        Command::Validate { file } => {
            let request: CreateUserRequest = read_json(file.as_ref(), input)?;
            let errors = validate_user(&request);
            for message in &errors {
                writeln!(out, "{}", message)?;
            }
            if !errors.is_empty() {
                return Err(AppError::ValidationError(errors.join("; ")));
            }
            info!("submission for {:?} is valid", request.username);
        }
        Command::Render {
            file,
            hide_actions,
            json,
        } => {
            let user: User = read_json(file.as_ref(), input)?;
            let formatter = config.date_formatter()?;
            let card = UserCard::new(&user)
                .show_actions(config.show_actions && !hide_actions)
                .date_formatter(&formatter);
            let tree = card.render();
            if json {
                serde_json::to_writer_pretty(&mut *out, &tree)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", tree)?;
            }
        }
        Command::List {
            file,
            status,
            search,
            after,
            before,
            page,
            page_size,
        } => {
            let users: Vec<User> = read_json(file.as_ref(), input)?;
            let filter = UserFilter {
                status,
                search,
                created_after: after,
                created_before: before,
            };
            filter.validate()?;

            let matched = filter.apply(&users);
            debug!("{} of {} users matched", matched.len(), users.len());
            let response =
                UserListResponse::paginate(matched, page, page_size.unwrap_or(config.page_size));
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn exit_status(result: &Result<(), AppError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => e.exit_code() as u8,
    }
}

fn main() -> ExitCode {
    // Loads `.env` first so RUST_LOG from it reaches the logger.
    let config = Config::from_env();
    env_logger::init();
    let cli = Cli::parse();

    let result = config.and_then(|config| {
        run(
            cli.command,
            &config,
            io::stdin().lock(),
            &mut io::stdout().lock(),
        )
    });
    match &result {
        // Violations were already printed to stdout.
        Ok(()) | Err(AppError::ValidationError(_)) => {}
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
        }
    }
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn command(args: &[&str]) -> Command {
        let argv = std::iter::once("userkit").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    fn invoke(args: &[&str], config: &Config, input: &str) -> (Result<(), AppError>, String) {
        let mut out = Vec::new();
        let result = run(command(args), config, input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    const ALICE: &str = r#"{"id": 42, "username": "alice", "email": "alice@example.com",
        "created_at": "2024-01-05T10:30:00Z", "is_active": true}"#;

    const USERS: &str = r#"[
        {"id": 1, "username": "alice", "email": "alice@example.com", "created_at": "2024-01-05T10:30:00Z", "is_active": true},
        {"id": 2, "username": "bob", "email": "bob@example.com", "created_at": "2024-02-01", "is_active": false},
        {"id": 3, "username": "carol", "email": "carol@example.com", "created_at": "2024-03-09T08:00:00Z", "is_active": true}
    ]"#;

    fn listed_ids(output: &str) -> (Vec<u64>, u64) {
        let value: serde_json::Value = serde_json::from_str(output).unwrap();
        let ids = value["users"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_u64().unwrap())
            .collect();
        (ids, value["total"].as_u64().unwrap())
    }

    #[test]
    fn test_validate_accepts_valid_submission() {
        let (result, output) = invoke(
            &["validate"],
            &Config::default(),
            r#"{"username": "alice", "email": "a@b.com"}"#,
        );
        assert!(result.is_ok());
        assert_eq!(output, "");
        assert_eq!(exit_status(&result), 0);
    }

    #[test]
    fn test_validate_prints_violations_and_exits_one() {
        let (result, output) = invoke(
            &["validate"],
            &Config::default(),
            r#"{"username": "ab", "email": "bad"}"#,
        );
        assert_eq!(
            output,
            "Username must be between 3 and 50 characters\nInvalid email format\n"
        );
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn test_malformed_input_exits_two() {
        let (result, output) = invoke(&["validate"], &Config::default(), "{not json");
        assert!(matches!(result, Err(AppError::Parse(_))));
        assert_eq!(output, "");
        assert_eq!(exit_status(&result), 2);
    }

    #[test]
    fn test_missing_file_exits_four() {
        let (result, _) = invoke(
            &["render", "/nonexistent/userkit/user.json"],
            &Config::default(),
            "",
        );
        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(exit_status(&result), 4);
    }

    #[test]
    fn test_render_markup_with_actions() {
        let (result, output) = invoke(&["render"], &Config::default(), ALICE);
        assert!(result.is_ok());
        assert!(output.starts_with("<div class=\"user-card\">"));
        assert!(output.contains("<p class=\"user-created\">Joined: Jan 5, 2024</p>"));
        assert!(output.contains("aria-label=\"Delete alice\""));
        assert!(output.ends_with("</div>\n"));
    }

    #[test]
    fn test_render_actions_need_both_config_and_flag() {
        let shown = Config::default();
        let hidden = Config {
            show_actions: false,
            ..Config::default()
        };

        let (_, output) = invoke(&["render", "--hide-actions"], &shown, ALICE);
        assert!(!output.contains("user-actions"));

        let (_, output) = invoke(&["render"], &hidden, ALICE);
        assert!(!output.contains("user-actions"));

        let (_, output) = invoke(&["render", "--hide-actions"], &hidden, ALICE);
        assert!(!output.contains("user-actions"));

        let (_, output) = invoke(&["render"], &shown, ALICE);
        assert!(output.contains("user-actions"));
    }

    #[test]
    fn test_render_json_uses_configured_date_format() {
        let config = Config {
            date_format: "%Y/%m/%d".to_string(),
            ..Config::default()
        };
        let (result, output) = invoke(&["render", "--json"], &config, ALICE);
        assert!(result.is_ok());

        let tree: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(tree["element"]["class"], "user-card");
        assert!(output.contains("Joined: 2024/01/05"));
    }

    #[test]
    fn test_render_rejects_bad_date_format() {
        let config = Config {
            date_format: "%Y %!".to_string(),
            ..Config::default()
        };
        let (result, _) = invoke(&["render"], &config, ALICE);
        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(exit_status(&result), 3);
    }

    #[test]
    fn test_list_page_size_falls_back_to_config() {
        let config = Config {
            page_size: 2,
            ..Config::default()
        };

        let (result, output) = invoke(&["list"], &config, USERS);
        assert!(result.is_ok());
        assert_eq!(listed_ids(&output), (vec![1, 2], 3));

        let (_, output) = invoke(&["list", "--page", "2"], &config, USERS);
        assert_eq!(listed_ids(&output), (vec![3], 3));

        let (_, output) = invoke(&["list", "--page-size", "5"], &config, USERS);
        assert_eq!(listed_ids(&output), (vec![1, 2, 3], 3));
    }

    #[test]
    fn test_list_filters() {
        let config = Config::default();

        let (_, output) = invoke(&["list", "--status", "inactive"], &config, USERS);
        assert_eq!(listed_ids(&output), (vec![2], 1));

        let (_, output) = invoke(&["list", "--search", "CAR"], &config, USERS);
        assert_eq!(listed_ids(&output), (vec![3], 1));

        let (_, output) = invoke(
            &["list", "--after", "2024-01-31", "--before", "2024-03-01T00:00:00Z"],
            &config,
            USERS,
        );
        assert_eq!(listed_ids(&output), (vec![2], 1));
    }

    #[test]
    fn test_list_rejects_bad_bound() {
        let (result, output) = invoke(&["list", "--after", "soon"], &Config::default(), USERS);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(output, "");
        assert_eq!(exit_status(&result), 2);
    }

    #[test]
    fn test_status_argument_parsing() {
        assert_eq!(parse_status("active"), Ok(UserStatus::Active));
        assert_eq!(parse_status("inactive"), Ok(UserStatus::Inactive));
        assert!(parse_status("Active").is_err());
        assert!(Cli::try_parse_from(["userkit", "list", "--status", "pending"]).is_err());

        match command(&["list", "--status", "active"]) {
            Command::List { status, page, page_size, .. } => {
                assert_eq!(status, Some(UserStatus::Active));
                assert_eq!(page, 1);
                assert_eq!(page_size, None);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }
}
