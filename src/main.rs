mod colors;
mod config;
mod error;
mod input;
mod layout;
mod leaderboard;
mod midi;
mod overlay;
mod prompt;
mod session;
mod settings;
mod stopwatch;
mod terminal;
mod tutor;
mod typing;
mod view;

use clap::{Parser, Subcommand};
use config::{Overrides, TutorConfig};
use error::Result;
use layout::{KeyKind, Layout, KEY_ROWS};
use leaderboard::{render_table, JsonFileStore, Leaderboard};
use settings::Settings;
use std::path::PathBuf;
use stopwatch::format_record_time;
use terminal::Terminal;

#[derive(Parser)]
#[command(name = "pianotype")]
#[command(version)]
#[command(about = "Learn to type on a piano keyboard in your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the tutorial stages and the timed challenge
    Play {
        /// Player name for the leaderboard (skips the name prompt)
        #[arg(short, long)]
        name: Option<String>,

        /// Don't listen for MIDI input; mouse clicks only
        #[arg(long)]
        no_midi: bool,

        /// Only connect MIDI ports whose name contains this text
        #[arg(short, long)]
        port: Option<String>,

        /// Lowest note on the keyboard
        #[arg(short, long)]
        start: Option<u8>,

        /// Highest note on the keyboard
        #[arg(short, long)]
        end: Option<u8>,

        /// Leaderboard storage file
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show the leaderboard, fastest first
    Scores {
        /// Leaderboard storage file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Print the keyboard and which note types which symbol
    Layout {
        /// Lowest note on the keyboard
        #[arg(short, long)]
        start: Option<u8>,

        /// Highest note on the keyboard
        #[arg(short, long)]
        end: Option<u8>,
    },

    /// List MIDI input ports
    MidiPorts,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("pianotype: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();

    match cli.command {
        Commands::Play {
            name,
            no_midi,
            port,
            start,
            end,
            store,
        } => {
            let config = TutorConfig::resolve(
                &settings,
                Overrides {
                    name,
                    no_midi,
                    midi_port: port,
                    note_start: start,
                    note_end: end,
                    store,
                },
            );
            let store_path = config.store_path.clone();

            if let Some(finish) = tutor::run(config)? {
                let record = finish.record;
                println!(
                    "{} finished in {}\n",
                    record.name,
                    format_record_time(record.time)
                );
                if let Some(e) = finish.save_error {
                    return Err(e);
                }
                let board = Leaderboard::new(JsonFileStore::open(&store_path)?);
                print!("{}", render_table(&board.ranked(), 10, Some(&record)));
            }
        }
        Commands::Scores { store, limit } => {
            let config = TutorConfig::resolve(
                &settings,
                Overrides {
                    store,
                    ..Overrides::default()
                },
            );
            let board = Leaderboard::new(JsonFileStore::open(&config.store_path)?);
            print!("{}", render_table(&board.ranked(), limit, None));
        }
        Commands::Layout { start, end } => {
            let config = TutorConfig::resolve(
                &settings,
                Overrides {
                    note_start: start,
                    note_end: end,
                    ..Overrides::default()
                },
            );
            let layout =
                Layout::generate(config.note_start, config.note_end, &config.accidental_offsets)?;
            print_layout(&layout);
        }
        Commands::MidiPorts => {
            let ports = midi::list_ports()?;
            if ports.is_empty() {
                println!("No MIDI input ports found.");
            }
            for (i, name) in ports.iter().enumerate() {
                println!("{}: {}", i, name);
            }
        }
    }

    Ok(())
}

fn print_layout(layout: &Layout) {
    let mut term = Terminal::offscreen(layout.width() + 1, KEY_ROWS + 1);
    view::draw_layout(&mut term, layout);
    term.print_to_stdout();
    println!(
        "\n{} naturals, {} accidentals\n",
        layout.naturals().len(),
        layout.accidentals().len()
    );

    for key in layout.keys() {
        let kind = match key.kind {
            KeyKind::Natural => "natural",
            KeyKind::Accidental => "accidental",
        };
        let clickable = if key.column.is_some() { "" } else { "  (not clickable)" };
        println!("{:>3}  {:<10}  {}{}", key.note, kind, key.symbol.label(), clickable);
    }
}
