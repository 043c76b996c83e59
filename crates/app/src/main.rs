use std::fmt;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use quizdeck_core::{Difficulty, MemorySession};
use services::{
    ApiClient, ApiConfig, GameController, GameEvent, GameLoop, GameMode, LoginRequest,
    RegisterRequest,
};

//
// ─── ARGS ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingRequired { flag: &'static str },
    UnknownArg(String),
    InvalidDifficulty { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingRequired { flag } => write!(f, "{flag} is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw} (easy, medium, hard)")
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
    eprintln!("  cargo run -p app -- play        [--difficulty <easy|medium|hard>]");
    eprintln!("  cargo run -p app -- leaderboard [--difficulty <d>] [--scope <alltime|weekly>]");
    eprintln!("  cargo run -p app -- scores");
    eprintln!("  cargo run -p app -- login    --user <email_or_school_id> --password <pw>");
    eprintln!("  cargo run -p app -- register --name <name> --password <pw>");
    eprintln!("                               [--email <email>] [--school-id <id>]");
    eprintln!();
    eprintln!("Common flags:");
    eprintln!("  --api-base <url>   backend base url (default http://localhost:3000)");
    eprintln!("  --token <jwt>      bearer token for authenticated calls");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZDECK_API_BASE, QUIZDECK_API_TOKEN");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Leaderboard,
    Scores,
    Login,
    Register,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "leaderboard" => Some(Self::Leaderboard),
            "scores" => Some(Self::Scores),
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            _ => None,
        }
    }
}

struct Args {
    api_base: Option<String>,
    token: Option<String>,
    difficulty: Difficulty,
    scope: String,
    user: Option<String>,
    name: Option<String>,
    email: Option<String>,
    school_id: Option<String>,
    password: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            api_base: None,
            token: None,
            difficulty: Difficulty::Easy,
            scope: "alltime".into(),
            user: None,
            name: None,
            email: None,
            school_id: None,
            password: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-base" => parsed.api_base = Some(require_value(args, "--api-base")?),
                "--token" => parsed.token = Some(require_value(args, "--token")?),
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    parsed.difficulty = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDifficulty { raw: value })?;
                }
                "--scope" => parsed.scope = require_value(args, "--scope")?,
                "--user" => parsed.user = Some(require_value(args, "--user")?),
                "--name" => parsed.name = Some(require_value(args, "--name")?),
                "--email" => parsed.email = Some(require_value(args, "--email")?),
                "--school-id" => parsed.school_id = Some(require_value(args, "--school-id")?),
                "--password" => parsed.password = Some(require_value(args, "--password")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    fn required(value: Option<String>, flag: &'static str) -> Result<String, ArgsError> {
        value.ok_or(ArgsError::MissingRequired { flag })
    }

    fn client(&self) -> Arc<ApiClient> {
        let mut config = ApiConfig::from_env();
        if let Some(base) = &self.api_base {
            config.base_url = base.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        Arc::new(ApiClient::new(config))
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

fn render(controller: &GameController) {
    println!();
    match controller.mode() {
        GameMode::Memory => render_board(controller),
        GameMode::Quiz => render_quiz(controller),
    }
}

fn render_board(controller: &GameController) {
    let Some(session) = controller.memory() else {
        println!("no board dealt; type `start [easy|medium|hard]`");
        return;
    };
    let columns = usize::try_from(session.columns()).unwrap_or(4);
    for (i, card) in session.deck().iter().enumerate() {
        let cell = if card.is_matched() || card.is_revealed() {
            card.label().to_owned()
        } else {
            format!("#{}", i + 1)
        };
        print!("{cell:^14}");
        if (i + 1) % columns == 0 {
            println!();
        }
    }
    println!(
        "moves: {}  matches: {}/{}  time: {}s",
        session.moves(),
        session.matches(),
        session.pairs(),
        session.seconds()
    );
    if let Some(message) = controller.board_message() {
        println!("{message}");
    }
}

fn render_quiz(controller: &GameController) {
    let Some(session) = controller.quiz() else {
        println!("no quiz running; type `start`");
        return;
    };
    if let Some(question) = session.current_question() {
        println!(
            "Question {}/{}  ({} pts, {}s)",
            session.index() + 1,
            session.total(),
            session.points(),
            session.seconds()
        );
        println!("{}", question.prompt());
        for (i, choice) in question.choices().iter().enumerate() {
            println!("  {}. {choice}", i + 1);
        }
        if let Some(answer) = controller.last_answer() {
            if answer.correct {
                println!("Correct! +{} pts", answer.awarded);
            } else {
                println!(
                    "Wrong. Correct answer: {}",
                    question.choices()[answer.correct_index]
                );
            }
            println!("type `next` to continue");
        }
    }
    if let Some(message) = controller.quiz_message() {
        println!("{message}");
    }
}

fn print_play_help() {
    println!("memory mode: start [easy|medium|hard], then pick cards by number (e.g. 3)");
    println!("quiz mode:   start, answer by number (e.g. 2), next to advance");
    println!("both:        memory / quiz switch games, help, quit");
}

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

enum Input {
    Event(GameEvent),
    Quit,
    Help,
    Invalid(String),
    Noop,
}

fn parse_input(line: &str, controller: &GameController) -> Input {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Input::Noop;
    };

    match head {
        "quit" | "exit" => Input::Quit,
        "help" | "?" => Input::Help,
        "memory" => Input::Event(GameEvent::SwitchMode(GameMode::Memory)),
        "quiz" => Input::Event(GameEvent::SwitchMode(GameMode::Quiz)),
        "next" => Input::Event(GameEvent::Advance),
        "start" => match controller.mode() {
            GameMode::Quiz => Input::Event(GameEvent::StartQuiz),
            GameMode::Memory => {
                let difficulty = match parts.next() {
                    None => controller
                        .memory()
                        .map_or(Difficulty::Easy, MemorySession::difficulty),
                    Some(raw) => match raw.parse() {
                        Ok(d) => d,
                        Err(_) => return Input::Invalid(format!("unknown difficulty: {raw}")),
                    },
                };
                Input::Event(GameEvent::StartMemory(difficulty))
            }
        },
        number => match number.parse::<usize>() {
            Ok(n) if n >= 1 => pick_by_number(n, controller),
            _ => Input::Invalid(format!("unknown command: {head} (try `help`)")),
        },
    }
}

fn pick_by_number(n: usize, controller: &GameController) -> Input {
    match controller.mode() {
        GameMode::Memory => {
            let Some(session) = controller.memory() else {
                return Input::Invalid("no board dealt; type `start` first".into());
            };
            match session.deck().get(n - 1) {
                Some(card) => Input::Event(GameEvent::PickCard(card.id())),
                None => Input::Invalid(format!("card #{n} is off the board")),
            }
        }
        GameMode::Quiz => {
            let choices = controller
                .quiz()
                .and_then(|s| s.current_question())
                .map_or(0, |q| q.choices().len());
            if n <= choices {
                Input::Event(GameEvent::Answer(n - 1))
            } else {
                Input::Invalid(format!("choice {n} is out of range"))
            }
        }
    }
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

async fn play(client: Arc<ApiClient>, difficulty: Difficulty) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = GameLoop::new(client);
    game.handle(GameEvent::StartMemory(difficulty))?;
    print_play_help();
    render(game.controller());

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line, game.controller()) {
                    Input::Quit => break,
                    Input::Help => print_play_help(),
                    Input::Invalid(message) => println!("{message}"),
                    Input::Noop => {}
                    Input::Event(event) => {
                        game.handle(event)?;
                        render(game.controller());
                    }
                }
            }
            event = game.recv() => {
                let Some(event) = event else { break };
                // Ticks only move the second counter; redrawing on each
                // would flood the terminal.
                let redraw = !matches!(event, GameEvent::Tick(_));
                game.handle(event)?;
                if redraw {
                    render(game.controller());
                }
            }
        }
    }
    Ok(())
}

async fn show_leaderboard(
    client: &ApiClient,
    difficulty: Difficulty,
    scope: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = client.leaderboard(difficulty, scope).await?;
    println!("leaderboard ({difficulty}, {scope}):");
    if rows.is_empty() {
        println!("  no scores yet");
    }
    for (i, row) in rows.iter().enumerate() {
        println!(
            "  {:>3}. {:<20} {:>5} pts  {:>3} moves  {:>4}s  {}",
            i + 1,
            row.player,
            row.score,
            row.moves,
            row.seconds,
            row.created_at
        );
    }

    if client.has_token() {
        let rank = client.my_rank(difficulty, scope).await?;
        if rank.has_score {
            if let (Some(best), Some(place), Some(total)) =
                (rank.best, rank.rank, rank.total_players)
            {
                println!(
                    "  you: #{place} of {total}, best {} pts ({} moves, {}s)",
                    best.score, best.moves, best.seconds
                );
            }
        } else {
            println!("  you have no score on this board yet");
        }
    }
    Ok(())
}

async fn show_scores(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let memory = client.my_memory_scores().await?;
    println!("memory scores:");
    if memory.is_empty() {
        println!("  none yet");
    }
    for row in &memory {
        println!(
            "  {:<6} {:>5} pts  {:>3} moves  {:>4}s  {}",
            row.difficulty, row.score, row.moves, row.seconds, row.created_at
        );
    }

    let quiz = client.my_quiz_scores().await?;
    println!("quiz scores:");
    if quiz.is_empty() {
        println!("  none yet");
    }
    for row in &quiz {
        println!(
            "  {:>5} pts  {} questions  {:>4}s  {}",
            row.score, row.total, row.seconds, row.created_at
        );
    }
    Ok(())
}

//
// ─── MAIN ──────────────────────────────────────────────────────────────────────
//

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let client = args.client();

    match cmd {
        Command::Play => play(client, args.difficulty).await,
        Command::Leaderboard => show_leaderboard(&client, args.difficulty, &args.scope).await,
        Command::Scores => show_scores(&client).await,
        Command::Login => {
            let request = LoginRequest {
                email_or_school_id: Args::required(args.user, "--user")?,
                password: Args::required(args.password, "--password")?,
            };
            let auth = client.login(&request).await?;
            println!("logged in as {}", auth.user.name);
            println!("export QUIZDECK_API_TOKEN={}", auth.token);
            Ok(())
        }
        Command::Register => {
            let request = RegisterRequest {
                school_id: args.school_id,
                name: Args::required(args.name, "--name")?,
                email: args.email,
                password: Args::required(args.password, "--password")?,
            };
            let auth = client.register(&request).await?;
            println!("registered as {}", auth.user.name);
            println!("export QUIZDECK_API_TOKEN={}", auth.token);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
