use chrono::{DateTime, Duration, Local};

use crate::scene::Theme;
use crate::timer::CountdownTimer;

pub struct AppState {
    pub timer: CountdownTimer,
    pub theme: Theme,
    pub is_animating: bool,
    pub hide_hud: bool,
    pub ends_at: Option<DateTime<Local>>,
    pub completed_at: Option<DateTime<Local>>,
    pub cached_hud: String,
    hud_needs_update: bool,
}

impl AppState {
    pub fn new(theme: Theme, session_secs: u32, hide_hud: bool) -> Self {
        Self {
            timer: CountdownTimer::new(session_secs),
            theme,
            is_animating: false,
            hide_hud,
            ends_at: None,
            completed_at: None,
            cached_hud: String::new(),
            hud_needs_update: true,
        }
    }

    pub fn on_start(&mut self) {
        self.is_animating = true;
        self.completed_at = None;
        self.ends_at = Some(Local::now() + Duration::seconds(self.timer.remaining_secs() as i64));
        self.hud_needs_update = true;
    }

    pub fn on_complete(&mut self) {
        self.is_animating = false;
        self.ends_at = None;
        self.completed_at = Some(Local::now());
        self.hud_needs_update = true;
    }

    pub fn on_reset(&mut self) {
        self.timer.reset();
        self.is_animating = false;
        self.ends_at = None;
        self.completed_at = None;
        self.hud_needs_update = true;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.hud_needs_update = true;
        }
    }

    pub fn mark_hud_dirty(&mut self) {
        self.hud_needs_update = true;
    }

    pub fn update_cached_hud(&mut self) {
        if !self.hud_needs_update {
            return;
        }

        let state = if self.timer.is_active() {
            match self.ends_at {
                Some(ends) => format!("focus until {}", ends.format("%H:%M")),
                None => "focus".to_string(),
            }
        } else if self.completed_at.is_some() {
            "done".to_string()
        } else {
            "[s] start".to_string()
        };

        self.cached_hud = format!(
            " {} | {} | {} | [r]eset [t]heme [q]uit ",
            self.timer.format_time(),
            self.theme.label(),
            state
        );

        self.hud_needs_update = false;
    }

    /// Completion banner text, shown centered until the next start/reset.
    pub fn banner(&self) -> Option<String> {
        self.completed_at
            .map(|at| {
                format!(
                    " Session complete at {}. Press r, then s for another ",
                    at.format("%H:%M")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Tick;

    fn state() -> AppState {
        AppState::new(Theme::Desert, 120, false)
    }

    #[test]
    fn test_initial_hud_shows_start_hint() {
        let mut s = state();
        s.update_cached_hud();
        assert!(s.cached_hud.contains("02:00"));
        assert!(s.cached_hud.contains("Desert"));
        assert!(s.cached_hud.contains("[s] start"));
        assert!(s.banner().is_none());
    }

    #[test]
    fn test_start_sets_end_time_and_animation() {
        let mut s = state();
        s.timer.start();
        s.on_start();
        assert!(s.is_animating);
        assert!(s.ends_at.is_some());
        s.update_cached_hud();
        assert!(s.cached_hud.contains("focus until"));
    }

    #[test]
    fn test_complete_stops_animation_and_banners() {
        let mut s = state();
        s.timer.start();
        s.on_start();
        while s.timer.tick() != Tick::Completed {}
        s.on_complete();
        assert!(!s.is_animating);
        assert!(s.banner().is_some());
        s.update_cached_hud();
        assert!(s.cached_hud.contains("done"));
        assert!(s.cached_hud.contains("00:00"));
    }

    #[test]
    fn test_reset_clears_session_markers() {
        let mut s = state();
        s.timer.start();
        s.on_start();
        s.timer.tick();
        s.on_reset();
        assert!(!s.is_animating);
        assert!(s.ends_at.is_none());
        assert!(s.banner().is_none());
        assert_eq!(s.timer.remaining_secs(), 120);
    }

    #[test]
    fn test_hud_cache_only_rebuilds_when_dirty() {
        let mut s = state();
        s.update_cached_hud();
        let before = s.cached_hud.clone();
        // Mutating the timer without marking dirty leaves the cache alone.
        s.timer.start();
        s.timer.tick();
        s.update_cached_hud();
        assert_eq!(s.cached_hud, before);

        s.mark_hud_dirty();
        s.update_cached_hud();
        assert!(s.cached_hud.contains("01:59"));
    }

    #[test]
    fn test_theme_switch_marks_dirty() {
        let mut s = state();
        s.update_cached_hud();
        s.set_theme(Theme::Snow);
        s.update_cached_hud();
        assert!(s.cached_hud.contains("Snow"));
    }
}
