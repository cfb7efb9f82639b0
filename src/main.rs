use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use flappy_ball::build_info;
use flappy_ball::game::{self, GameSession, TICK_INTERVAL_MS};
use flappy_ball::input::{map_key, GameInput};
use flappy_ball::ui;

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "flappy-ball {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Flappy Ball - Terminal Arcade Game\n");
                println!("Usage: flappy-ball\n");
                println!("Controls:");
                println!("  Space/Enter/Up  Jump (restart after game over)");
                println!("  q/Esc           Quit");
                println!("\nOptions:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'flappy-ball --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Log to a file; stdout belongs to the terminal UI.
    let _ = simple_logging::log_to_file("flappy-ball.log", log::LevelFilter::Info);
    info!("Starting Flappy Ball");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    info!("Exiting");
    result
}

/// Driver loop: render, poll input until the next tick is due, and advance
/// the simulation on a fixed 20ms cadence.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut session = GameSession::new();
    let mut rng = rand::thread_rng();

    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, frame.size(), &session))?;

        // Wait for input at most until the next tick is due.
        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                match map_key(key_event) {
                    Some(GameInput::Activate) => {
                        game::process_activate(&mut session, Instant::now(), &mut rng);
                    }
                    Some(GameInput::Quit) => {
                        info!("Quit at score {}", session.score);
                        return Ok(());
                    }
                    None => {}
                }
            }
        }

        // Advance the simulation, catching up if rendering ran long.
        while last_tick.elapsed() >= tick_interval {
            game::process_tick(&mut session, &mut rng, Instant::now());
            last_tick += tick_interval;
        }
    }
}
