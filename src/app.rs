use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Color as TermColor;

use crate::app_state::AppState;
use crate::config::Config;
use crate::render::TerminalRenderer;
use crate::scene::{Scene, Theme};
use crate::timer::{Tick, Ticker};

/// Poll cadence while nothing animates; input stays responsive without
/// redrawing at full frame rate.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The pending-frame token. A deadline exists only while an animation frame
/// is scheduled; every stop path (completion, reset, resize, teardown)
/// clears it, so no stale frame can fire.
pub struct FrameClock {
    interval: Duration,
    deadline: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u64) -> Self {
        FrameClock {
            interval: Duration::from_millis(1000 / fps.max(1)),
            deadline: None,
        }
    }

    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// How long input polling may block before the next frame is due.
    pub fn poll_timeout(&self) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => IDLE_POLL,
        }
    }

    /// True when the scheduled frame has come due; re-arms for the next one.
    pub fn frame_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = Some(Instant::now() + self.interval);
                true
            }
            _ => false,
        }
    }
}

pub struct App {
    state: AppState,
    scene: Scene,
    ticker: Ticker,
    frames: FrameClock,
    autostart: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let theme = config.scene.theme;
        App {
            state: AppState::new(theme, config.session_secs(), config.scene.hide_hud),
            scene: Scene::new(theme),
            ticker: Ticker::new(),
            frames: FrameClock::new(config.scene.fps),
            autostart: config.session.autostart,
        }
    }

    pub async fn run(&mut self, renderer: &mut TerminalRenderer) -> io::Result<()> {
        let (width, height) = renderer.canvas_size();
        self.scene.resize(width, height);

        if self.autostart {
            self.start_session();
        }

        loop {
            // Drain the ticker before painting so the countdown is current.
            while self.ticker.try_tick() {
                match self.state.timer.tick() {
                    Tick::Completed => {
                        self.ticker.stop();
                        self.frames.cancel();
                        self.state.on_complete();
                    }
                    Tick::Ticked => self.state.mark_hud_dirty(),
                    Tick::Idle => {}
                }
            }

            if self.state.is_animating && self.frames.frame_due() {
                self.scene.step();
            }

            renderer.begin_frame();
            self.scene.render(renderer.canvas_mut());
            renderer.present()?;

            self.state.update_cached_hud();
            if !self.state.hide_hud {
                renderer.render_line_colored(1, 0, &self.state.cached_hud, TermColor::Cyan)?;
            }
            if let Some(banner) = self.state.banner() {
                let rows = renderer.get_size().1;
                renderer.render_line_centered(rows / 2, &banner, TermColor::Green)?;
            }
            renderer.flush()?;

            if event::poll(self.frames.poll_timeout())? {
                match event::read()? {
                    Event::Resize(cols, rows) => {
                        self.handle_resize(renderer, cols, rows)?;
                    }
                    Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('c')
                            if key.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            break;
                        }
                        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                            self.start_session();
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => self.reset_session(),
                        KeyCode::Char('t') | KeyCode::Char('T') => {
                            self.switch_theme(renderer, self.state.theme.next());
                        }
                        KeyCode::Char('1') => self.switch_theme(renderer, Theme::Desert),
                        KeyCode::Char('2') => self.switch_theme(renderer, Theme::Ocean),
                        KeyCode::Char('3') => self.switch_theme(renderer, Theme::Snow),
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        self.ticker.stop();
        self.frames.cancel();
        Ok(())
    }

    fn start_session(&mut self) {
        // A finished countdown needs a reset before it can run again, and a
        // running one ignores further starts.
        if self.state.timer.remaining_secs() == 0 || !self.state.timer.start() {
            return;
        }
        // Re-entered, not resumed: every session is a fresh journey.
        self.scene.rebuild();
        self.ticker.start();
        self.state.on_start();
        self.frames.schedule();
    }

    fn reset_session(&mut self) {
        self.ticker.stop();
        self.frames.cancel();
        self.state.on_reset();
        self.scene.rebuild();
    }

    fn switch_theme(&mut self, renderer: &TerminalRenderer, theme: Theme) {
        if self.scene.theme() == theme {
            return;
        }
        self.state.set_theme(theme);
        self.scene = Scene::new(theme);
        let (width, height) = renderer.canvas_size();
        self.scene.resize(width, height);
    }

    fn handle_resize(
        &mut self,
        renderer: &mut TerminalRenderer,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        renderer.manual_resize(cols, rows)?;
        let (width, height) = renderer.canvas_size();
        // Entity layouts don't rescale; rebuild wholesale and restart the
        // animation schedule.
        self.scene.resize(width, height);
        if self.state.is_animating {
            self.frames.cancel();
            self.frames.schedule();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_starts_unscheduled() {
        let clock = FrameClock::new(30);
        assert!(!clock.is_scheduled());
        assert_eq!(clock.poll_timeout(), IDLE_POLL);
    }

    #[test]
    fn test_frame_clock_schedule_and_cancel() {
        let mut clock = FrameClock::new(30);
        clock.schedule();
        assert!(clock.is_scheduled());
        assert!(clock.poll_timeout() <= Duration::from_millis(34));
        clock.cancel();
        assert!(!clock.is_scheduled());
        assert!(!clock.frame_due());
    }

    #[test]
    fn test_frame_clock_fires_after_interval() {
        let mut clock = FrameClock::new(60);
        clock.schedule();
        assert!(!clock.frame_due());
        std::thread::sleep(Duration::from_millis(20));
        assert!(clock.frame_due());
        // Firing re-arms rather than clearing.
        assert!(clock.is_scheduled());
        assert!(!clock.frame_due());
    }

    #[test]
    fn test_frame_clock_zero_fps_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.interval, Duration::from_millis(1000));
    }
}
