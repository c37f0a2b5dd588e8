use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::io;

use wandr::app::App;
use wandr::config::Config;
use wandr::onboard;
use wandr::render::TerminalRenderer;
use wandr::scene::Theme;

#[derive(Parser)]
#[command(version, about = "Terminal Pomodoro timer with animated journey scenes", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "THEME",
        help = "Scene for this run (desert, ocean, snow)"
    )]
    theme: Option<String>,

    #[arg(short, long, value_name = "MINUTES", help = "Session length for this run")]
    minutes: Option<u64>,

    #[arg(long, help = "Start the countdown immediately")]
    autostart: bool,

    #[arg(long, help = "Run the setup wizard and exit")]
    setup: bool,

    #[arg(
        long,
        value_name = "SHELL",
        value_enum,
        help = "Print shell completions and exit"
    )]
    completions: Option<Shell>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "wandr", &mut io::stdout());
        return Ok(());
    }

    if cli.setup {
        if let Err(e) = onboard::run(Config::load().unwrap_or_default()) {
            eprintln!("Setup failed: {e}");
        }
        return Ok(());
    }

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("\nContinuing with defaults (desert scene, 25 minutes)");
            eprintln!("\nTo customize, run `wandr --setup` or create a config file at:");
            eprintln!("  $XDG_CONFIG_HOME/wandr/config.toml");
            eprintln!("  or ~/.config/wandr/config.toml");
            eprintln!("\nExample config.toml:");
            eprintln!("  [session]");
            eprintln!("  minutes = 25");
            eprintln!();
            eprintln!("  [scene]");
            eprintln!("  theme = \"ocean\"");
            eprintln!();
            Config::default()
        }
    };

    if let Some(ref theme_str) = cli.theme {
        match theme_str.parse::<Theme>() {
            Ok(theme) => config.scene.theme = theme,
            Err(e) => eprintln!("{}", e),
        }
    }
    if let Some(minutes) = cli.minutes {
        config.session.minutes = minutes;
    }
    if cli.autostart {
        config.session.autostart = true;
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid settings: {e}");
        return Ok(());
    }

    let mut renderer = TerminalRenderer::new()?;
    renderer.init()?;

    let mut app = App::new(&config);
    let result = app.run(&mut renderer).await;

    renderer.cleanup()?;

    result
}
