//! The journey scene engine.
//!
//! One generic skeleton drives all three themes: a vehicle approaches from
//! off-screen left, latches onto the horizontal center, and from then on the
//! world scrolls past it. Each theme supplies its entity catalog and draw
//! routines through the [`World`] trait; the engine owns the state machine,
//! the per-frame phase accumulation, and the (re)initialization lifecycle.

pub mod desert;
pub mod ocean;
pub mod snow;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Desert,
    Ocean,
    Snow,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Desert, Theme::Ocean, Theme::Snow];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Desert => "Desert",
            Theme::Ocean => "Ocean",
            Theme::Snow => "Snow",
        }
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Desert => Theme::Ocean,
            Theme::Ocean => Theme::Snow,
            Theme::Snow => Theme::Desert,
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desert" => Ok(Theme::Desert),
            "ocean" => Ok(Theme::Ocean),
            "snow" => Ok(Theme::Snow),
            other => Err(ConfigError::InvalidTheme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Desert => "desert",
            Theme::Ocean => "ocean",
            Theme::Snow => "snow",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Vertical oscillation sampled as `amplitude * sin(phase)`; the phase
/// accumulates forever and relies on sine's periodicity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shake {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Shake {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Shake {
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    pub fn offset(&self) -> f32 {
        self.amplitude * self.phase.sin()
    }

    pub fn advance(&mut self) {
        self.phase += self.frequency;
    }
}

/// Accumulating rotation (wheels, snowmobile track).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub angle: f32,
    pub speed: f32,
}

impl Spin {
    pub fn new(speed: f32) -> Self {
        Spin { angle: 0.0, speed }
    }

    pub fn advance(&mut self) {
        self.angle += self.speed;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub reached_center: bool,
    pub shake: Shake,
    pub spin: Spin,
}

impl Vehicle {
    /// Every vehicle enters from the same off-screen position.
    pub const START_X: f32 = -100.0;

    pub fn new(y: f32, width: f32, height: f32, speed: f32, shake: Shake, spin: Spin) -> Self {
        Vehicle {
            x: Vehicle::START_X,
            y,
            width,
            height,
            speed,
            reached_center: false,
            shake,
            spin,
        }
    }

    /// The x the vehicle pins to once centered.
    pub fn center_x(&self, bounds: &Bounds) -> f32 {
        bounds.width / 2.0 - self.width / 2.0
    }

    pub fn shake_offset(&self) -> f32 {
        self.shake.offset()
    }
}

/// Per-theme entity catalog plus draw routines. `populate` rebuilds the
/// collections from scratch; `advance` applies the scrolling/recycling rules
/// for one frame; the two draw methods never mutate anything.
pub trait World {
    fn theme(&self) -> Theme;

    fn spawn_vehicle(&self, bounds: &Bounds) -> Vehicle;

    fn populate(&mut self, bounds: &Bounds, rng: &mut dyn RngCore);

    fn advance(&mut self, bounds: &Bounds, vehicle: &Vehicle, rng: &mut dyn RngCore);

    fn draw(&self, canvas: &mut Canvas, bounds: &Bounds);

    fn draw_vehicle(&self, canvas: &mut Canvas, vehicle: &Vehicle);
}

fn world_for(theme: Theme) -> Box<dyn World> {
    match theme {
        Theme::Desert => Box::new(desert::DesertWorld::new()),
        Theme::Ocean => Box::new(ocean::OceanWorld::new()),
        Theme::Snow => Box::new(snow::SnowWorld::new()),
    }
}

pub struct Scene {
    world: Box<dyn World>,
    vehicle: Vehicle,
    bounds: Option<Bounds>,
    rng: Box<dyn RngCore>,
}

impl Scene {
    pub fn new(theme: Theme) -> Self {
        Scene::with_rng(theme, Box::new(rand::rng()))
    }

    /// Inject the randomness source; tests use a fixed-sequence generator to
    /// get reproducible layouts.
    pub fn with_rng(theme: Theme, rng: Box<dyn RngCore>) -> Self {
        let world = world_for(theme);
        Scene {
            // Replaced by the world's vehicle on the first real resize.
            vehicle: Vehicle::new(0.0, 120.0, 60.0, 2.0, Shake::new(0.0, 0.0), Spin::new(0.0)),
            world,
            bounds: None,
            rng,
        }
    }

    pub fn theme(&self) -> Theme {
        self.world.theme()
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_initialized(&self) -> bool {
        self.bounds.is_some()
    }

    /// Rebuild the scene for a new viewport. Degenerate dimensions defer
    /// initialization entirely; `step` and `render` stay no-ops until a
    /// positive size arrives.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            self.bounds = None;
            return;
        }
        let bounds = Bounds { width, height };
        self.world.populate(&bounds, self.rng.as_mut());
        self.vehicle = self.world.spawn_vehicle(&bounds);
        self.bounds = Some(bounds);
    }

    /// Fresh journey on the current viewport: new collections, vehicle back
    /// off-screen. Used when a session (re)starts.
    pub fn rebuild(&mut self) {
        if let Some(bounds) = self.bounds {
            self.resize(bounds.width, bounds.height);
        }
    }

    /// Advance one frame: vehicle state machine, oscillation phases, world
    /// scrolling/recycling.
    pub fn step(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };

        let center = self.vehicle.center_x(&bounds);
        if self.vehicle.reached_center {
            self.vehicle.x = center;
        } else {
            let next = self.vehicle.x + self.vehicle.speed;
            if next >= center {
                // Clamp on crossing: never overshoots, latches one-way.
                self.vehicle.x = center;
                self.vehicle.reached_center = true;
            } else {
                self.vehicle.x = next;
            }
        }

        self.vehicle.shake.advance();
        self.vehicle.spin.advance();

        let snapshot = self.vehicle.clone();
        self.world.advance(&bounds, &snapshot, self.rng.as_mut());
    }

    /// Paint the current snapshot. Pure with respect to the model; safe to
    /// call for the static initial frame and for every animated frame alike.
    pub fn render(&self, canvas: &mut Canvas) {
        let Some(bounds) = self.bounds else {
            return;
        };
        self.world.draw(canvas, &bounds);
        self.world.draw_vehicle(canvas, &self.vehicle);
    }
}
