use std::fmt::Write as _;

use clap::{Args, Parser, Subcommand};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use serde_json::Value;
use wire::endpoints as ep;
use wire::{
    AddProblemRequest, ChangePasswordRequest, Difficulty, DifficultyStats, LoginRequest, PasswordResetConfirm,
    PasswordResetRequest, PracticeProblem, RegisterRequest, StatsPeriod, UpdateProblemRequest,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; pass --session-token or set FLASHCARDS_SESSION_TOKEN")]
    MissingSessionToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("response did not set a session cookie")]
    MissingSessionCookie,
    #[error("nothing to update; pass --title and/or --difficulty")]
    EmptyUpdate,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "flashcards", about = "Coding flashcards REST API CLI")]
struct Cli {
    #[arg(long, env = "FLASHCARDS_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "FLASHCARDS_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Auth(AuthCommand),
    Problems(ProblemsCommand),
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        password_confirm: Option<String>,
    },
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    ResetRequest {
        #[arg(long)]
        email: String,
    },
    ResetConfirm {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        password_confirm: Option<String>,
    },
    /// Change the password; the server ends every session, this one included.
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        password_confirm: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ProblemsCommand {
    #[command(subcommand)]
    command: ProblemsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProblemsSubcommand {
    List,
    Practice {
        /// Print raw JSON instead of grouped text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Add {
        url: String,
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    Done {
        id: i64,
    },
    Show {
        id: i64,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    Delete {
        id: i64,
    },
    History {
        id: i64,
    },
    Stats,
    /// Problems practiced in a period, split by difficulty.
    Difficulty {
        #[arg(long, default_value_t = StatsPeriod::Lifetime)]
        period: StatsPeriod,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Daily activity counts for a calendar year (defaults to the current one).
    Activity {
        #[arg(long)]
        year: Option<i32>,
    },
}

/// Body and the session token (if any) a response set.
#[derive(Debug)]
struct ApiResponse {
    body: Value,
    session_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext {
        base_url: cli.base_url,
        session_token: cli.session_token,
    };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Auth(auth) => run_auth(&ctx, auth).await,
        Command::Problems(problems) => run_problems(&ctx, problems).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/healthz", cli.base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_auth(cli: &CliContext, auth: AuthCommand) -> Result<(), CliError> {
    match auth.command {
        AuthSubcommand::Register {
            username,
            email,
            password,
            password_confirm,
        } => {
            let password_confirm = password_confirm.unwrap_or_else(|| password.clone());
            let req = RegisterRequest { username, email, password, password_confirm };
            let resp = api_request(cli, reqwest::Method::POST, ep::AUTH_REGISTER, Some(to_body(&req)?), false).await?;
            print_json(&resp.body)?;
            print_session_token(&resp)
        }
        AuthSubcommand::Login { username, password } => {
            let req = LoginRequest { username, password };
            let resp = api_request(cli, reqwest::Method::POST, ep::AUTH_LOGIN, Some(to_body(&req)?), false).await?;
            print_json(&resp.body)?;
            print_session_token(&resp)
        }
        AuthSubcommand::Logout => {
            let resp = api_request(cli, reqwest::Method::POST, ep::AUTH_LOGOUT, None, false).await?;
            print_json(&resp.body)
        }
        AuthSubcommand::Whoami => {
            let resp = api_request(cli, reqwest::Method::GET, ep::AUTH_USER, None, true).await?;
            print_json(&resp.body)
        }
        AuthSubcommand::ResetRequest { email } => {
            let req = PasswordResetRequest { email };
            let resp =
                api_request(cli, reqwest::Method::POST, ep::AUTH_PASSWORD_RESET, Some(to_body(&req)?), false).await?;
            print_json(&resp.body)
        }
        AuthSubcommand::ResetConfirm {
            token,
            password,
            password_confirm,
        } => {
            let new_password_confirm = password_confirm.unwrap_or_else(|| password.clone());
            let req = PasswordResetConfirm { token, new_password: password, new_password_confirm };
            let resp = api_request(
                cli,
                reqwest::Method::POST,
                ep::AUTH_PASSWORD_RESET_CONFIRM,
                Some(to_body(&req)?),
                false,
            )
            .await?;
            print_json(&resp.body)
        }
        AuthSubcommand::ChangePassword {
            current,
            password,
            password_confirm,
        } => {
            let new_password_confirm = password_confirm.unwrap_or_else(|| password.clone());
            let req = ChangePasswordRequest { current_password: current, new_password: password, new_password_confirm };
            let resp =
                api_request(cli, reqwest::Method::POST, ep::AUTH_CHANGE_PASSWORD, Some(to_body(&req)?), true).await?;
            print_json(&resp.body)?;
            eprintln!("all sessions ended; log in again and export the new FLASHCARDS_SESSION_TOKEN");
            Ok(())
        }
    }
}

async fn run_problems(cli: &CliContext, problems: ProblemsCommand) -> Result<(), CliError> {
    let resp = match problems.command {
        ProblemsSubcommand::List => api_request(cli, reqwest::Method::GET, ep::PROBLEMS, None, true).await?,
        ProblemsSubcommand::Practice { json } => {
            let resp = api_request(cli, reqwest::Method::GET, ep::PROBLEMS_PRACTICE, None, true).await?;
            if !json {
                let items: Vec<PracticeProblem> = serde_json::from_value(resp.body)?;
                print!("{}", render_practice(&items));
                return Ok(());
            }
            resp
        }
        ProblemsSubcommand::Add { url, difficulty } => {
            let req = AddProblemRequest { leetcode_url: url, difficulty };
            eprintln!("adding problem (metadata lookup may take a few seconds)...");
            api_request(cli, reqwest::Method::POST, ep::PROBLEMS_ADD, Some(to_body(&req)?), true).await?
        }
        ProblemsSubcommand::Done { id } => {
            api_request(cli, reqwest::Method::POST, &ep::problem_done(id), None, true).await?
        }
        ProblemsSubcommand::Show { id } => {
            api_request(cli, reqwest::Method::GET, &ep::problem_detail(id), None, true).await?
        }
        ProblemsSubcommand::Update { id, title, difficulty } => {
            let req = update_request(title, difficulty)?;
            api_request(cli, reqwest::Method::PUT, &ep::problem_detail(id), Some(to_body(&req)?), true).await?
        }
        ProblemsSubcommand::Delete { id } => {
            api_request(cli, reqwest::Method::DELETE, &ep::problem_detail(id), None, true).await?
        }
        ProblemsSubcommand::History { id } => {
            api_request(cli, reqwest::Method::GET, &ep::problem_history(id), None, true).await?
        }
        ProblemsSubcommand::Stats => api_request(cli, reqwest::Method::GET, ep::PROBLEMS_STATS, None, true).await?,
        ProblemsSubcommand::Difficulty { period, json } => {
            let resp = api_request(cli, reqwest::Method::GET, &ep::difficulty_stats(period), None, true).await?;
            if !json {
                let split: DifficultyStats = serde_json::from_value(resp.body)?;
                print!("{}", render_difficulty(&split));
                return Ok(());
            }
            resp
        }
        ProblemsSubcommand::Activity { year } => {
            api_request(cli, reqwest::Method::GET, &ep::activity_heatmap(year), None, true).await?
        }
    };
    print_json(&resp.body)
}

fn update_request(title: Option<String>, difficulty: Option<Difficulty>) -> Result<UpdateProblemRequest, CliError> {
    if title.is_none() && difficulty.is_none() {
        return Err(CliError::EmptyUpdate);
    }
    Ok(UpdateProblemRequest { title, difficulty })
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
    require_session: bool,
) -> Result<ApiResponse, CliError> {
    let mut headers = HeaderMap::new();
    match cli.session_token.as_deref() {
        Some(token) => {
            headers.insert(COOKIE, HeaderValue::from_str(&format!("{}={token}", ep::SESSION_COOKIE))?);
        }
        None if require_session => return Err(CliError::MissingSessionToken),
        None => {}
    }

    let client = reqwest::Client::builder().default_headers(headers).build()?;
    let url = ep::api_url(&cli.base_url, path);

    let request = client.request(method, &url);
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request
    };

    let response = request.send().await?;
    let status = response.status();
    let session_token = session_token_from_set_cookie(
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    );
    let value = response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: wire::error_message_from_value(&value).unwrap_or_else(|| value.to_string()),
        });
    }

    Ok(ApiResponse { body: value, session_token })
}

/// Token from the first non-empty `session_token=` cookie among `headers`.
fn session_token_from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<String> {
    headers.into_iter().find_map(|header| {
        let pair = header.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        (name.trim() == ep::SESSION_COOKIE && !value.trim().is_empty()).then(|| value.trim().to_owned())
    })
}

/// Practice list as indented text, one block per category.
fn render_practice(items: &[PracticeProblem]) -> String {
    if items.is_empty() {
        return "No problems to practice today!\n".to_owned();
    }
    let mut out = String::new();
    for (category, group) in wire::group_by_category(items) {
        let _ = writeln!(out, "{category}");
        for item in group {
            let p = &item.problem;
            let marker = if item.solved_recently { " *" } else { "" };
            let _ = writeln!(out, "  [{}] {} ({}) {}{marker}", p.id, p.title, p.difficulty, p.leetcode_url);
        }
    }
    out
}

/// Difficulty split as aligned text.
fn render_difficulty(split: &DifficultyStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "period: {}", split.period);
    for (label, count) in [("easy", split.easy), ("medium", split.medium), ("hard", split.hard)] {
        let _ = writeln!(out, "  {label:<7}{count}");
    }
    let _ = writeln!(out, "  {:<7}{}", "total", split.total);
    out
}

fn print_session_token(resp: &ApiResponse) -> Result<(), CliError> {
    let token = resp.session_token.as_deref().ok_or(CliError::MissingSessionCookie)?;
    eprintln!("export FLASHCARDS_SESSION_TOKEN={token}");
    Ok(())
}

fn to_body<T: serde::Serialize>(req: &T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(req)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
