//! First-run setup wizard: picks a theme and session length, then writes the
//! config file.

use std::fs;

use console::Term;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};

use crate::config::Config;
use crate::error::{ConfigError, OnboardError};
use crate::scene::Theme;

// ── Styling helpers ──────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!(
        "{}",
        "┌───────────────────────────────────────┐".cyan().bold()
    );
    println!(
        "{}",
        "│         Welcome to wandr setup!       │".cyan().bold()
    );
    println!(
        "{}",
        "│  Pick a journey for your focus time.  │".cyan().bold()
    );
    println!(
        "{}",
        "└───────────────────────────────────────┘".cyan().bold()
    );
    println!();
    println!(
        "{}",
        "  Tip: existing values are shown as defaults. Press Enter to keep them.".dim()
    );
    println!();
}

fn print_section(title: &str) {
    let line = "─".repeat(40 - title.len().min(38));
    println!();
    println!("{}", format!("── {title} {line}").cyan().bold());
    println!();
}

fn print_success(config_path: &std::path::Path) {
    println!();
    println!(
        "{}",
        "── All set! ────────────────────────────".green().bold()
    );
    println!();
    println!(
        "  Config saved to {}",
        config_path.display().to_string().bold()
    );
    println!();
    println!("  Run {} to start the timer!", "wandr".green().bold());
    println!();
}

// ── Wizard ───────────────────────────────────────────────────────────

pub fn run(existing: Config) -> Result<Config, OnboardError> {
    Term::stdout().clear_screen().ok();
    print_banner();

    let mut config = existing;

    print_section("Scene");
    let theme_labels: Vec<&str> = Theme::ALL.iter().map(|t| t.label()).collect();
    let current_theme = Theme::ALL
        .iter()
        .position(|t| *t == config.scene.theme)
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Which journey do you want to watch?")
        .items(&theme_labels)
        .default(current_theme)
        .interact()?;
    config.scene.theme = Theme::ALL[picked];

    print_section("Session");
    config.session.minutes = Input::new()
        .with_prompt("Session length in minutes")
        .default(config.session.minutes)
        .validate_with(|minutes: &u64| {
            if (1..=600).contains(minutes) {
                Ok(())
            } else {
                Err("session length must be between 1 and 600 minutes")
            }
        })
        .interact_text()?;

    config.session.autostart = Confirm::new()
        .with_prompt("Start the countdown as soon as wandr launches?")
        .default(config.session.autostart)
        .interact()?;

    config.scene.hide_hud = !Confirm::new()
        .with_prompt("Show the countdown HUD over the scene?")
        .default(!config.scene.hide_hud)
        .interact()?;

    config.validate()?;

    let config_dir = Config::get_config_dir()?;
    fs::create_dir_all(&config_dir).map_err(|e| ConfigError::WriteError {
        path: config_dir.display().to_string(),
        source: e,
    })?;
    let config_path = Config::get_config_path()?;
    config.save(&config_path)?;

    print_success(&config_path);
    Ok(config)
}
