use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use memory_match::logging::init_cli_logger;
use memory_match::{
    CardImageRepository, FlipOutcome, GameConfig, GameEvent, GameSummary, HighScoreRepository,
    ImageCatalogue, JsonFileStorage, Leaderboard, LeaderboardConfig, MemoryGame, Player,
};

/// Matching-pairs memory game in the terminal.
#[derive(Parser, Debug)]
#[command(name = "memory-match", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// High-score file
    #[arg(long, env = "MEMORY_MATCH_SCORES", default_value = "highscores.json", global = true)]
    scores: PathBuf,

    /// Leaderboard capacity
    #[arg(long, default_value_t = 10, global = true)]
    max_entries: usize,

    /// Directory holding custom card images and their index
    #[arg(long, env = "MEMORY_MATCH_IMAGES", default_value = "card_images", global = true)]
    image_dir: PathBuf,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game (default)
    Play(PlayArgs),
    /// Print the leaderboard
    Scores {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Manage custom card images
    #[command(subcommand)]
    Images(ImageCommand),
}

#[derive(Subcommand, Debug)]
enum ImageCommand {
    /// List registered images
    List,
    /// Copy an image file into the catalogue
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        file: PathBuf,
    },
    /// Remove an image and its file
    Remove { id: String },
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Player name; prompted for when absent
    #[arg(short, long)]
    name: Option<String>,

    /// Number of pairs to deal
    #[arg(short, long, default_value_t = 8)]
    pairs: usize,

    /// Fixed shuffle seed
    #[arg(long)]
    seed: Option<u64>,

    /// How long a failed pair stays visible
    #[arg(long, default_value_t = 1500)]
    flip_back_ms: u64,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            name: None,
            pairs: 8,
            seed: None,
            flip_back_ms: 1500,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let open_board = || {
        let config = LeaderboardConfig::default().with_max_entries(cli.max_entries);
        Leaderboard::open(JsonFileStorage::new(&cli.scores), config)
    };

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => play(args, &mut open_board()?),
        Command::Scores { top } => {
            print_scores(&open_board()?, top);
            Ok(())
        }
        Command::Images(command) => images(command, cli.image_dir),
    }
}

fn images(command: ImageCommand, image_dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let storage = JsonFileStorage::new(image_dir.join("images.json"));
    let mut catalogue = ImageCatalogue::open(storage, image_dir)?;

    match command {
        ImageCommand::List => {
            let images = catalogue.all_images();
            if images.is_empty() {
                println!("No custom images.");
            }
            for image in images {
                println!(
                    "{}  {:<20} {}  {}",
                    image.id(),
                    image.name(),
                    image.date_added().format("%Y-%m-%d"),
                    image.file_path().display()
                );
            }
        }
        ImageCommand::Add { name, file } => {
            let extension = file.extension().and_then(|e| e.to_str()).unwrap_or_default().to_string();
            let mut source = File::open(&file)?;
            let image = catalogue.add_image(&name, &mut source, &extension)?;
            println!("Added {} as {}", image.name(), image.id());
        }
        ImageCommand::Remove { id } => match catalogue.delete_image(&id) {
            Some(image) => println!("Removed {}", image.name()),
            None => println!("No image with id {}", id),
        },
    }
    Ok(())
}

fn play(args: PlayArgs, board: &mut Leaderboard<JsonFileStorage>) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let name = match args.name {
        Some(name) => name,
        None => prompt(&mut input, "Enter your name: ")?.unwrap_or_default(),
    };
    let player = Player::new(name)?;

    let mut config = GameConfig::new(args.pairs);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut game = MemoryGame::with_config(player, config, &mut *board)?;
    game.subscribe(|event: &GameEvent| match event {
        GameEvent::MatchFound { .. } => println!("Match found!"),
        GameEvent::MatchFailed { .. } => println!("No match. Try again!"),
        GameEvent::GameCompleted(summary) => print_summary(summary),
        GameEvent::CardFlipped { .. } => {}
    });

    let delay = Duration::from_millis(args.flip_back_ms);
    while !game.is_completed() {
        draw(&game);
        let Some(index) = read_selection(&mut input, game.card_count())? else {
            println!("Game aborted.");
            return Ok(());
        };

        match game.flip_card(index) {
            Ok(FlipOutcome::Mismatched { first, second }) => {
                draw(&game);
                thread::sleep(delay);
                game.flip_card_back(first)?;
                game.flip_card_back(second)?;
            }
            Ok(_) => {}
            Err(err) => println!("Error: {}", err),
        }
    }
    let board = game.into_repository();

    print_scores(&*board, 10);
    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read a 1-based card position. `None` on quit or end of input.
fn read_selection(input: &mut impl BufRead, card_count: usize) -> io::Result<Option<usize>> {
    loop {
        let message = format!("Select a card (1-{}) or 'q' to quit: ", card_count);
        let Some(line) = prompt(input, &message)? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(position) if (1..=card_count).contains(&position) => return Ok(Some(position - 1)),
            _ => println!("'{}' is not a card position", line),
        }
    }
}

fn draw<R: HighScoreRepository>(game: &MemoryGame<R>) {
    let cards = game.cards();
    let columns = (cards.len() as f64).sqrt().ceil() as usize;

    println!();
    println!(
        "Pairs remaining: {}  Attempts: {}  Time: {:.1}s",
        game.remaining_pairs(),
        game.attempts(),
        game.duration().as_secs_f64()
    );
    for (row_index, row_cards) in cards.chunks(columns.max(1)).enumerate() {
        let line: Vec<String> = row_cards
            .iter()
            .enumerate()
            .map(|(col, card)| {
                let position = row_index * columns + col + 1;
                let face = if card.is_face_up() { card.symbol() } else { "?" };
                format!("{:>3}:[{:^3}]", position, face)
            })
            .collect();
        println!("{}", line.join(" "));
    }
}

fn print_summary(summary: &GameSummary) {
    println!();
    println!("Congratulations! You've completed the game!");
    println!("Player:   {}", summary.player);
    println!("Score:    {}", summary.score);
    println!("Cards:    {}", summary.card_count);
    println!("Attempts: {}", summary.attempts);
    println!("Time:     {:.1} seconds", summary.duration.as_secs_f64());
    if summary.is_high_score {
        println!("New High Score!");
    }
}

fn print_scores(board: &impl HighScoreRepository, top: usize) {
    let scores = board.top_scores(top);
    println!();
    println!("===== HIGH SCORES =====");
    if scores.is_empty() {
        println!("No high scores yet.");
        return;
    }

    println!(
        "{:<4} {:<15} {:<7} {:<5} {:<8} {:<8} {:<10}",
        "Rank", "Player", "Score", "Cards", "Attempts", "Time", "Date"
    );
    println!("{}", "-".repeat(64));
    for (rank, record) in scores.iter().enumerate() {
        println!(
            "{:<4} {:<15} {:<7} {:<5} {:<8} {:<8} {:<10}",
            rank + 1,
            record.player_name(),
            record.score(),
            record.card_count(),
            record.attempts(),
            format!("{:.1}s", record.duration().as_secs_f64()),
            record.date().format("%Y-%m-%d"),
        );
    }
}
