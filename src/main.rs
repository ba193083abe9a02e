use delve::build_info;
use delve::core::constants::{DEFAULT_PLAYER_NAME, LOG_FILE_NAME};
use delve::core::{player_stats, run_game, GameEvent, GameOutcome, GameState};
use delve::dungeon::DungeonConfig;
use delve::input::{choose_valid, InputProvider, Menu};
use delve::save_manager::SaveManager;
use delve::ui::Console;
use delve::utils::{logger, persistence};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    new_game: bool,
    save_path: Option<PathBuf>,
    /// `Some(None)` logs to the default file.
    log_path: Option<Option<PathBuf>>,
}

enum Command {
    Play(Options),
    Version,
    Help,
}

fn print_help() {
    println!("Delve - a text roguelike dungeon crawler\n");
    println!("Usage: delve [options]\n");
    println!("Options:");
    println!("  --seed <n>     Use a fixed random seed");
    println!("  --new          Ignore any saved game and start over");
    println!("  --save <path>  Use a different save file");
    println!("  --log [path]   Write a debug log (default ~/.delve/{})", LOG_FILE_NAME);
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--new" => options.new_game = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--save" => {
                let value = iter.next().ok_or("--save needs a path")?;
                options.save_path = Some(PathBuf::from(value));
            }
            "--log" => {
                let path = iter
                    .next_if(|next| !next.starts_with("--"))
                    .map(PathBuf::from);
                options.log_path = Some(path);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(Command::Play(options))
}

fn init_logging(log_path: Option<Option<PathBuf>>) {
    let Some(path) = log_path else {
        return;
    };
    let path = match path {
        Some(path) => path,
        None => match persistence::data_path(LOG_FILE_NAME) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Could not locate log file: {}", e);
                return;
            }
        },
    };
    if let Err(e) = logger::init(&path, log::LevelFilter::Debug) {
        eprintln!("Could not open log file {}: {}", path.display(), e);
    }
}

fn save_manager(options: &Options) -> Option<SaveManager> {
    if let Some(path) = &options.save_path {
        return Some(SaveManager::with_path(path));
    }
    match SaveManager::new() {
        Ok(saves) => Some(saves),
        Err(e) => {
            log::warn!("Saving disabled: {}", e);
            eprintln!("Saving disabled: {}", e);
            None
        }
    }
}

/// Offers to continue a saved run, otherwise creates a new character.
fn load_or_create(
    saves: Option<&SaveManager>,
    new_game: bool,
    input: &mut impl InputProvider,
    rng: &mut StdRng,
) -> GameState {
    if !new_game {
        if let Some(state) = saves.and_then(SaveManager::load_or_none) {
            let menu = Menu::confirm(format!(
                "A saved game for {} was found. Continue it?",
                state.player.name
            ));
            if choose_valid(input, &menu) == "y" {
                log::info!("continuing saved run for {}", state.player.name);
                return state;
            }
        }
    }

    let name = input.answer(&format!(
        "Enter your character's name (default {}):",
        DEFAULT_PLAYER_NAME
    ));
    GameState::new_game(&name, DungeonConfig::default(), rng)
}

fn play(options: Options) -> GameOutcome {
    init_logging(options.log_path.clone());
    log::info!("{} starting", build_info::version_line());

    let saves = save_manager(&options);
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut console = Console::stdio();

    let mut state = load_or_create(saves.as_ref(), options.new_game, &mut console, &mut rng);
    console.notify(&GameEvent::Panel {
        title: "Player Stats".to_string(),
        lines: player_stats(&state.player),
    });

    run_game(&mut state, &mut console, saves.as_ref(), &mut rng)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            ExitCode::SUCCESS
        }
        Ok(Command::Help) => {
            print_help();
            ExitCode::SUCCESS
        }
        Ok(Command::Play(options)) => match play(options) {
            GameOutcome::Escaped => ExitCode::SUCCESS,
            GameOutcome::Died => ExitCode::from(2),
        },
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'delve --help' for usage.");
            ExitCode::FAILURE
        }
    }
}
