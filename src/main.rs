use clap::Parser;
use runnr::app::App;
use runnr::config::Config;
use runnr::render::TerminalRenderer;
use std::io;

#[derive(Parser)]
#[command(version, about = "Terminal-based ASCII endless runner", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "SPEED",
        help = "Starting game speed (default 6.0)"
    )]
    speed: Option<f64>,

    #[arg(short, long, help = "Start in the night-run game mode")]
    alt: bool,

    #[arg(short, long, help = "Force night mode on (for testing moon and stars)")]
    night: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("\nContinuing with default settings");
            eprintln!("\nTo customize, create a config file at:");
            eprintln!("  $XDG_CONFIG_HOME/runnr/config.toml");
            eprintln!("  or ~/.config/runnr/config.toml");
            eprintln!("\nExample config.toml:");
            eprintln!("  [game]");
            eprintln!("  gap_coefficient = 0.6");
            eprintln!("  fps_cap = 30");
            eprintln!();
            Config::default()
        }
    };

    let mut renderer = TerminalRenderer::new()?;
    renderer.init()?;

    let mut app = App::new(&config, &renderer, cli.speed, cli.alt, cli.night);

    let result = app.run(&mut renderer);

    renderer.cleanup()?;

    result
}
