//! Open sea: a sailboat bobs across the swell while gulls and fish pass by.

use std::f32::consts::TAU;

use rand::{Rng, RngCore};

use super::{Bounds, Shake, Spin, Theme, Vehicle, World};
use crate::canvas::{Canvas, Color, Paint, Path};

const NUM_CLOUDS: usize = 6;
const NUM_WAVES: usize = 5;
const NUM_FISH: usize = 8;
const NUM_SEAGULLS: usize = 4;

const FISH_COLORS: [Color; 5] = [
    Color::hex(0xFF9F40),
    Color::hex(0x4D9DE0),
    Color::hex(0xE15554),
    Color::hex(0x3BB273),
    Color::hex(0x7768AE),
];

const HULL_BROWN: Color = Color::hex(0x8B4513);

#[derive(Debug, Clone)]
struct Cloud {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    speed: f32,
}

#[derive(Debug, Clone)]
struct Wave {
    y: f32,
    amplitude: f32,
    frequency: f32,
    speed: f32,
    phase: f32,
    color: Color,
}

#[derive(Debug, Clone)]
struct Fish {
    x: f32,
    y: f32,
    size: f32,
    speed: f32,
    /// 1.0 swims right, -1.0 swims left.
    direction: f32,
    color: Color,
}

#[derive(Debug, Clone)]
struct Seagull {
    x: f32,
    y: f32,
    size: f32,
    speed: f32,
    wing_phase: f32,
    wing_speed: f32,
}

pub struct OceanWorld {
    clouds: Vec<Cloud>,
    waves: Vec<Wave>,
    fish: Vec<Fish>,
    seagulls: Vec<Seagull>,
}

impl OceanWorld {
    pub fn new() -> Self {
        OceanWorld {
            clouds: Vec::new(),
            waves: Vec::new(),
            fish: Vec::new(),
            seagulls: Vec::new(),
        }
    }
}

impl Default for OceanWorld {
    fn default() -> Self {
        OceanWorld::new()
    }
}

impl World for OceanWorld {
    fn theme(&self) -> Theme {
        Theme::Ocean
    }

    fn spawn_vehicle(&self, bounds: &Bounds) -> Vehicle {
        // The bob is gentler and slower than the desert shake; no spinning
        // parts on a sailboat.
        Vehicle::new(
            bounds.height * 0.6,
            120.0,
            80.0,
            2.0,
            Shake::new(3.0, 0.05),
            Spin::new(0.0),
        )
    }

    fn populate(&mut self, bounds: &Bounds, rng: &mut dyn RngCore) {
        self.clouds.clear();
        self.waves.clear();
        self.fish.clear();
        self.seagulls.clear();

        for _ in 0..NUM_CLOUDS {
            self.clouds.push(Cloud {
                x: rng.random_range(0.0..bounds.width),
                y: rng.random_range(0.0..bounds.height * 0.3),
                width: rng.random_range(100.0..250.0),
                height: rng.random_range(40.0..90.0),
                speed: rng.random_range(0.1..0.3),
            });
        }

        for i in 0..NUM_WAVES {
            let depth = i as f32;
            self.waves.push(Wave {
                y: bounds.height * 0.6 + depth * 15.0,
                // Deeper rows flatten out and tighten up.
                amplitude: 20.0 / (depth + 1.0),
                frequency: 0.01 * (depth + 1.0),
                speed: 0.05 * (depth + 1.0),
                phase: rng.random_range(0.0..TAU),
                color: Color::rgba(0.0, 70.0 / 255.0, 140.0 / 255.0, 0.2 + depth * 0.15),
            });
        }

        for _ in 0..NUM_FISH {
            self.fish.push(Fish {
                x: rng.random_range(0.0..bounds.width),
                y: bounds.height * 0.7 + rng.random_range(0.0..bounds.height * 0.25),
                size: rng.random_range(10.0..30.0),
                speed: rng.random_range(1.0..3.0),
                direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                color: FISH_COLORS[rng.random_range(0..FISH_COLORS.len())],
            });
        }

        for _ in 0..NUM_SEAGULLS {
            self.seagulls.push(Seagull {
                x: rng.random_range(0.0..bounds.width),
                y: rng.random_range(0.0..bounds.height * 0.4),
                size: rng.random_range(5.0..15.0),
                speed: rng.random_range(0.5..2.0),
                wing_phase: rng.random_range(0.0..TAU),
                wing_speed: rng.random_range(0.05..0.15),
            });
        }
    }

    fn advance(&mut self, bounds: &Bounds, vehicle: &Vehicle, rng: &mut dyn RngCore) {
        // The seascape holds still until the boat takes center stage.
        if !vehicle.reached_center {
            return;
        }

        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.x + cloud.width < 0.0 {
                cloud.x = bounds.width;
                cloud.y = rng.random_range(0.0..bounds.height * 0.3);
            }
        }

        for wave in &mut self.waves {
            wave.phase += wave.speed;
        }

        for fish in &mut self.fish {
            fish.x += fish.speed * fish.direction;
            let gone_right = fish.direction > 0.0 && fish.x > bounds.width + fish.size;
            let gone_left = fish.direction < 0.0 && fish.x < -fish.size;
            if gone_right || gone_left {
                fish.x = if fish.direction > 0.0 {
                    -fish.size
                } else {
                    bounds.width + fish.size
                };
                fish.y = bounds.height * 0.7 + rng.random_range(0.0..bounds.height * 0.25);
            }
        }

        for gull in &mut self.seagulls {
            gull.x += gull.speed;
            gull.wing_phase += gull.wing_speed;
            if gull.x > bounds.width + gull.size {
                gull.x = -gull.size;
                gull.y = rng.random_range(0.0..bounds.height * 0.4);
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas, bounds: &Bounds) {
        let (w, h) = (bounds.width, bounds.height);

        let mut sky = Paint::linear(0.0, 0.0, 0.0, h * 0.6);
        sky.add_stop(0.0, Color::hex(0x1A90D6));
        sky.add_stop(1.0, Color::hex(0x87CEEB));
        canvas.fill_rect(0.0, 0.0, w, h * 0.6, &sky);

        for cloud in &self.clouds {
            draw_cloud(canvas, cloud);
        }

        let mut ocean = Paint::linear(0.0, h * 0.6, 0.0, h);
        ocean.add_stop(0.0, Color::hex(0x0077BE));
        ocean.add_stop(1.0, Color::hex(0x003366));
        canvas.fill_rect(0.0, h * 0.6, w, h * 0.4, &ocean);

        for wave in &self.waves {
            let mut path = Path::new();
            path.move_to(0.0, wave.y);
            let mut x = 0.0;
            while x <= w {
                let y = wave.y + (x * wave.frequency + wave.phase).sin() * wave.amplitude;
                path.line_to(x, y);
                x += 20.0;
            }
            canvas.stroke_path(&path, &wave.color.into(), 5.0);
        }

        for gull in &self.seagulls {
            let wing_y = gull.wing_phase.sin() * gull.size / 2.0;
            let mut wings = Path::new();
            wings
                .move_to(gull.x, gull.y)
                .line_to(gull.x - gull.size, gull.y - wing_y);
            wings
                .move_to(gull.x, gull.y)
                .line_to(gull.x + gull.size, gull.y - wing_y);
            canvas.stroke_path(&wings, &Color::BLACK.into(), 2.0);
        }

        for fish in &self.fish {
            draw_fish(canvas, fish);
        }
    }

    fn draw_vehicle(&self, canvas: &mut Canvas, vehicle: &Vehicle) {
        let bob = vehicle.shake_offset();
        let (x, y) = (vehicle.x, vehicle.y + bob);
        let (vw, vh) = (vehicle.width, vehicle.height);

        // Hull tapers toward the waterline.
        let mut hull = Path::new();
        hull.move_to(x, y)
            .line_to(x + vw, y)
            .line_to(x + vw * 0.8, y + vh * 0.3)
            .line_to(x + vw * 0.2, y + vh * 0.3)
            .close();
        canvas.fill_path(&hull, &HULL_BROWN.into());

        // Cabin and portholes.
        canvas.fill_rect(
            x + vw * 0.3,
            y - vh * 0.3,
            vw * 0.4,
            vh * 0.3,
            &Color::hex(0xD2B48C).into(),
        );
        canvas.fill_rect(
            x + vw * 0.35,
            y - vh * 0.25,
            vw * 0.1,
            vh * 0.15,
            &Color::hex(0x87CEEB).into(),
        );
        canvas.fill_rect(
            x + vw * 0.55,
            y - vh * 0.25,
            vw * 0.1,
            vh * 0.15,
            &Color::hex(0x87CEEB).into(),
        );

        // Mast.
        canvas.fill_rect(x + vw * 0.5 - 2.0, y - vh * 0.8, 4.0, vh * 0.8, &HULL_BROWN.into());

        // Sail with a soft back shadow.
        let mut sail = Path::new();
        sail.move_to(x + vw * 0.5, y - vh * 0.8)
            .line_to(x + vw * 0.75, y - vh * 0.4)
            .line_to(x + vw * 0.5, y - vh * 0.3)
            .close();
        canvas.fill_path(&sail, &Color::WHITE.into());

        let mut sail_shadow = Path::new();
        sail_shadow
            .move_to(x + vw * 0.5, y - vh * 0.8)
            .line_to(x + vw * 0.65, y - vh * 0.6)
            .line_to(x + vw * 0.55, y - vh * 0.4)
            .close();
        canvas.fill_path(&sail_shadow, &Color::BLACK.with_alpha(0.1).into());

        // Wake trails once the boat is under way.
        if vehicle.reached_center {
            for i in 0..3 {
                let wake_x = x - i as f32 * 20.0;
                let wake_width = i as f32 * 10.0 + 10.0;
                let wake_y = y + vh * 0.15;
                let mut wake = Path::new();
                wake.move_to(wake_x, wake_y).quadratic_to(
                    wake_x - wake_width / 2.0,
                    wake_y + wake_width / 4.0,
                    wake_x - wake_width,
                    wake_y,
                );
                canvas.stroke_path(&wake, &Color::WHITE.into(), 2.0);
            }
        }
    }
}

fn draw_cloud(canvas: &mut Canvas, cloud: &Cloud) {
    // Five overlapping puffs make one blob.
    let mut path = Path::new();
    path.arc(cloud.x, cloud.y, cloud.height / 2.0, 0.0, TAU, false);
    path.arc(
        cloud.x + cloud.width * 0.25,
        cloud.y - cloud.height * 0.1,
        cloud.height * 0.6,
        0.0,
        TAU,
        false,
    );
    path.arc(
        cloud.x + cloud.width * 0.5,
        cloud.y,
        cloud.height * 0.7,
        0.0,
        TAU,
        false,
    );
    path.arc(
        cloud.x + cloud.width * 0.75,
        cloud.y - cloud.height * 0.1,
        cloud.height * 0.6,
        0.0,
        TAU,
        false,
    );
    path.arc(cloud.x + cloud.width, cloud.y, cloud.height / 2.0, 0.0, TAU, false);
    canvas.fill_path(&path, &Color::WHITE.into());
}

fn draw_fish(canvas: &mut Canvas, fish: &Fish) {
    canvas.save();
    canvas.translate(fish.x, fish.y);
    // Mirror the whole fish when it swims left.
    canvas.scale(fish.direction, 1.0);

    let mut body = Path::new();
    body.ellipse(0.0, 0.0, fish.size, fish.size / 2.0, 0.0, 0.0, TAU, false);
    canvas.fill_path(&body, &fish.color.into());

    let mut tail = Path::new();
    tail.move_to(0.0, 0.0)
        .line_to(-fish.size, -fish.size / 2.0)
        .line_to(-fish.size, fish.size / 2.0)
        .close();
    canvas.fill_path(&tail, &fish.color.into());

    let mut eye_white = Path::new();
    eye_white.arc(fish.size / 2.0, -fish.size / 6.0, fish.size / 6.0, 0.0, TAU, false);
    canvas.fill_path(&eye_white, &Color::WHITE.into());

    let mut pupil = Path::new();
    pupil.arc(fish.size / 2.0, -fish.size / 6.0, fish.size / 10.0, 0.0, TAU, false);
    canvas.fill_path(&pupil, &Color::BLACK.into());

    canvas.restore();
}
