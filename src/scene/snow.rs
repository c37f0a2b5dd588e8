//! Night snowfield: a snowmobile runs a groomed trail under moonlit peaks.

use std::f32::consts::TAU;

use rand::{Rng, RngCore};

use super::{Bounds, Shake, Spin, Theme, Vehicle, World};
use crate::canvas::{Canvas, Color, Paint, Path};

const NUM_MOUNTAINS: usize = 5;
const NUM_TREES: usize = 15;
const NUM_SNOWFLAKES: usize = 200;

const SNOWFIELD: Color = Color::hex(0xF1F2F6);
const TRAIL: Color = Color::hex(0xDFE4EA);
const PINE_GREEN: Color = Color::hex(0x2E7830);
const BODY_TEAL: Color = Color::hex(0x0ABDE3);

#[derive(Debug, Clone)]
struct Mountain {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    /// Horizontal skew of the summit, as a fraction of width.
    peak_offset: f32,
}

#[derive(Debug, Clone)]
struct Tree {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    layers: usize,
    snow_cover: f32,
}

#[derive(Debug, Clone)]
struct Snowflake {
    x: f32,
    y: f32,
    radius: f32,
    speed_x: f32,
    speed_y: f32,
    opacity: f32,
}

#[derive(Debug, Clone)]
struct ExhaustPuff {
    dx: f32,
    radius: f32,
}

pub struct SnowWorld {
    mountains: Vec<Mountain>,
    trees: Vec<Tree>,
    snowflakes: Vec<Snowflake>,
    exhaust: Vec<ExhaustPuff>,
}

impl SnowWorld {
    pub fn new() -> Self {
        SnowWorld {
            mountains: Vec::new(),
            trees: Vec::new(),
            snowflakes: Vec::new(),
            exhaust: Vec::new(),
        }
    }
}

impl Default for SnowWorld {
    fn default() -> Self {
        SnowWorld::new()
    }
}

impl World for SnowWorld {
    fn theme(&self) -> Theme {
        Theme::Snow
    }

    fn spawn_vehicle(&self, bounds: &Bounds) -> Vehicle {
        Vehicle::new(
            bounds.height * 0.78,
            120.0,
            60.0,
            2.0,
            Shake::new(2.0, 0.15),
            Spin::new(0.15),
        )
    }

    fn populate(&mut self, bounds: &Bounds, rng: &mut dyn RngCore) {
        self.mountains.clear();
        self.trees.clear();
        self.snowflakes.clear();
        self.exhaust.clear();

        for i in 0..NUM_MOUNTAINS {
            let height = rng.random_range(150.0..350.0);
            let width = rng.random_range(300.0..800.0);
            self.mountains.push(Mountain {
                // Overlapping spread, one peak hanging off each edge.
                x: (i as f32 - 1.0) * (bounds.width / (NUM_MOUNTAINS - 2) as f32) - width / 2.0,
                y: bounds.height - height,
                width,
                height,
                peak_offset: rng.random_range(-0.15..0.15),
            });
        }

        for _ in 0..NUM_TREES {
            let height = rng.random_range(60.0..140.0);
            self.trees.push(Tree {
                x: rng.random_range(0.0..bounds.width),
                y: bounds.height - height * 0.9,
                width: height * 0.6,
                height,
                layers: rng.random_range(3..=4),
                snow_cover: rng.random_range(0.1..0.4),
            });
        }

        for _ in 0..NUM_SNOWFLAKES {
            self.snowflakes.push(Snowflake {
                x: rng.random_range(0.0..bounds.width),
                y: rng.random_range(0.0..bounds.height),
                radius: rng.random_range(1.0..4.0),
                speed_x: rng.random_range(-0.5..0.5),
                speed_y: rng.random_range(1.0..2.0),
                opacity: rng.random_range(0.5..1.0),
            });
        }
    }

    fn advance(&mut self, bounds: &Bounds, vehicle: &Vehicle, rng: &mut dyn RngCore) {
        if vehicle.reached_center {
            for tree in &mut self.trees {
                tree.x -= vehicle.speed;
                if tree.x + tree.width < 0.0 {
                    tree.x = bounds.width;
                    tree.height = rng.random_range(60.0..140.0);
                    tree.width = tree.height * 0.6;
                    tree.y = bounds.height - tree.height * 0.9;
                    tree.layers = rng.random_range(3..=4);
                }
            }

            for mountain in &mut self.mountains {
                mountain.x -= vehicle.speed * 0.5;
                if mountain.x + mountain.width < 0.0 {
                    mountain.x = bounds.width;
                }
            }
        }

        // Snow keeps falling whether or not the ride has started.
        for flake in &mut self.snowflakes {
            flake.x += flake.speed_x;
            flake.y += flake.speed_y;
            if flake.y > bounds.height {
                flake.y = 0.0;
                flake.x = rng.random_range(0.0..bounds.width);
            }
            if flake.x < 0.0 || flake.x > bounds.width {
                flake.x = rng.random_range(0.0..bounds.width);
            }
        }

        self.exhaust.clear();
        if vehicle.reached_center && rng.random_range(0.0..1.0) > 0.3 {
            for _ in 0..3 {
                self.exhaust.push(ExhaustPuff {
                    dx: rng.random_range(0.0..5.0) - 10.0,
                    radius: rng.random_range(5.0..15.0),
                });
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas, bounds: &Bounds) {
        let (w, h) = (bounds.width, bounds.height);

        let mut sky = Paint::linear(0.0, 0.0, 0.0, h * 0.7);
        sky.add_stop(0.0, Color::hex(0x1A2A40));
        sky.add_stop(0.7, Color::hex(0x4B6584));
        canvas.fill_rect(0.0, 0.0, w, h, &sky);

        draw_star_field(canvas, bounds);
        draw_moon(canvas, bounds);

        for mountain in &self.mountains {
            draw_mountain(canvas, mountain, h);
        }

        // Snowfield floor plus its drift texture.
        canvas.fill_rect(0.0, h * 0.75, w, h * 0.25, &SNOWFIELD.into());
        for i in 0..100 {
            let x = ((i * 29) as f32) % w;
            let y = h * 0.75 + ((i * 17) as f32) % (h * 0.25);
            let rx = ((i * 13) % 50) as f32 + 20.0;
            let ry = ((i * 11) % 10) as f32 + 5.0;
            let mut drift = Path::new();
            drift.ellipse(x, y, rx, ry, 0.0, 0.0, TAU, false);
            canvas.fill_path(&drift, &Color::hex(0xC8D2DC).with_alpha(0.3).into());
        }

        for tree in &self.trees {
            draw_tree(canvas, tree);
        }

        for flake in &self.snowflakes {
            let mut path = Path::new();
            path.arc(flake.x, flake.y, flake.radius, 0.0, TAU, false);
            canvas.fill_path(&path, &Color::WHITE.with_alpha(flake.opacity).into());
        }

        self.draw_trail(canvas, bounds);
    }

    fn draw_vehicle(&self, canvas: &mut Canvas, vehicle: &Vehicle) {
        let vw = vehicle.width;
        canvas.save();
        canvas.translate(vehicle.x, vehicle.y + vehicle.shake_offset());

        // Track and its lugs.
        canvas.fill_rect(10.0, 20.0, vw - 20.0, 15.0, &Color::hex(0x1E272E).into());
        for i in 0..6 {
            canvas.fill_rect(20.0 + i as f32 * 16.0, 27.0, 8.0, 8.0, &Color::hex(0x485460).into());
        }

        // Lower hull.
        let mut hull = Path::new();
        hull.move_to(0.0, 15.0)
            .line_to(vw, 15.0)
            .line_to(vw - 10.0, 30.0)
            .line_to(10.0, 30.0)
            .close();
        canvas.fill_path(&hull, &BODY_TEAL.into());

        // Seat.
        canvas.fill_rect(vw * 0.3, -15.0, vw * 0.4, 25.0, &Color::hex(0x222F3E).into());

        // Windshield.
        let mut shield = Path::new();
        shield
            .move_to(vw * 0.7, -15.0)
            .line_to(vw * 0.85, -30.0)
            .line_to(vw * 0.7, -30.0)
            .close();
        canvas.fill_path(&shield, &Color::hex(0xC8E6FF).with_alpha(0.7).into());

        // Steering ski out front.
        let mut ski = Path::new();
        ski.move_to(vw * 0.75, 15.0)
            .line_to(vw * 0.9, 5.0)
            .line_to(vw + 10.0, 10.0)
            .line_to(vw, 15.0)
            .close();
        canvas.fill_path(&ski, &Color::hex(0x576574).into());

        // Hood.
        let mut hood = Path::new();
        hood.move_to(vw * 0.3, 0.0)
            .line_to(vw * 0.7, 0.0)
            .line_to(vw * 0.9, -10.0)
            .line_to(vw * 0.7, -15.0)
            .line_to(vw * 0.3, -15.0)
            .close();
        canvas.fill_path(&hood, &BODY_TEAL.into());

        // Headlight and glow.
        let mut lamp = Path::new();
        lamp.arc(vw * 0.85, -5.0, 5.0, 0.0, TAU, false);
        canvas.fill_path(&lamp, &Color::WHITE.into());

        let mut glow = Paint::radial(vw * 0.85, -5.0, 0.0, vw * 0.85, -5.0, 30.0);
        glow.add_stop(0.0, Color::hex(0xFFFFC8).with_alpha(0.8));
        glow.add_stop(1.0, Color::hex(0xFFFFC8).with_alpha(0.0));
        let mut halo = Path::new();
        halo.arc(vw * 0.85, -5.0, 30.0, 0.0, TAU, false);
        canvas.fill_path(&halo, &glow);

        for puff in &self.exhaust {
            let mut path = Path::new();
            path.arc(20.0 + puff.dx, 0.0, puff.radius, 0.0, TAU, false);
            canvas.fill_path(&path, &Color::WHITE.with_alpha(0.7).into());
        }

        canvas.restore();
    }
}

impl SnowWorld {
    fn draw_trail(&self, canvas: &mut Canvas, bounds: &Bounds) {
        let (w, h) = (bounds.width, bounds.height);
        canvas.fill_rect(0.0, h * 0.75 + 20.0, w, 30.0, &TRAIL.into());

        // Groomer marks every 50 px.
        let mut marks = Path::new();
        let mut x = 0.0;
        while x < w {
            marks
                .move_to(x, h * 0.75 + 25.0)
                .line_to(x + 30.0, h * 0.75 + 25.0);
            x += 50.0;
        }
        canvas.stroke_path(&marks, &Color::hex(0xC8D6E5).into(), 1.0);
    }
}

/// Fixed star pattern derived from index arithmetic; identical every frame,
/// no stored entities.
fn draw_star_field(canvas: &mut Canvas, bounds: &Bounds) {
    let (w, h) = (bounds.width, bounds.height);
    for i in 0..100 {
        let x = ((i * 17) as f32) % w;
        let y = ((i * 23) as f32) % (h * 0.7);
        let radius = ((i * 7) % 3) as f32 + 1.0;
        let opacity = ((i * 13) % 8) as f32 / 10.0 + 0.2;
        let mut path = Path::new();
        path.arc(x, y, radius, 0.0, TAU, false);
        canvas.fill_path(&path, &Color::WHITE.with_alpha(0.8 * opacity).into());
    }
}

fn draw_moon(canvas: &mut Canvas, bounds: &Bounds) {
    let (cx, cy) = (bounds.width * 0.8, bounds.height * 0.2);
    let moonlight = Color::hex(0xFFFFF0);
    let mut glow = Paint::radial(cx, cy, 5.0, cx, cy, 50.0);
    glow.add_stop(0.0, moonlight);
    glow.add_stop(0.3, moonlight.with_alpha(0.9));
    glow.add_stop(1.0, moonlight.with_alpha(0.0));
    let mut path = Path::new();
    path.arc(cx, cy, 50.0, 0.0, TAU, false);
    canvas.fill_path(&path, &glow);
}

fn draw_mountain(canvas: &mut Canvas, mountain: &Mountain, floor: f32) {
    let mut rock = Paint::linear(
        mountain.x,
        mountain.y,
        mountain.x + mountain.width,
        mountain.y + mountain.height,
    );
    rock.add_stop(0.0, SNOWFIELD);
    rock.add_stop(0.4, TRAIL);
    rock.add_stop(1.0, Color::hex(0xA5B1C2));

    let peak_x = mountain.x + mountain.width * (0.5 + mountain.peak_offset);

    let mut body = Path::new();
    body.move_to(mountain.x, floor)
        .quadratic_to(
            mountain.x + mountain.width * 0.25,
            mountain.y + mountain.height * 0.5,
            peak_x,
            mountain.y,
        )
        .quadratic_to(
            mountain.x + mountain.width * 0.75,
            mountain.y + mountain.height * 0.6,
            mountain.x + mountain.width,
            floor,
        );
    canvas.fill_path(&body, &rock);

    // Snow line tracing the upper ridges.
    let mut ridge = Path::new();
    ridge
        .move_to(
            mountain.x + mountain.width * 0.2,
            mountain.y + mountain.height * 0.3,
        )
        .line_to(peak_x, mountain.y)
        .line_to(
            mountain.x + mountain.width * 0.8,
            mountain.y + mountain.height * 0.25,
        );
    canvas.stroke_path(&ridge, &Color::WHITE.with_alpha(0.4).into(), 2.0);
}

fn draw_tree(canvas: &mut Canvas, tree: &Tree) {
    // Trunk.
    canvas.fill_rect(
        tree.x + tree.width * 0.45,
        tree.y + tree.height * 0.8,
        tree.width * 0.1,
        tree.height * 0.2,
        &Color::hex(0x3D3D3D).into(),
    );

    let layer_height = tree.height * 0.7 / tree.layers as f32;
    for i in 0..tree.layers {
        let layer_width = tree.width * (1.0 - i as f32 * 0.15);
        let layer_y = tree.y + i as f32 * layer_height;

        let mut bough = Path::new();
        bough
            .move_to(tree.x + (tree.width - layer_width) / 2.0, layer_y)
            .line_to(tree.x + (tree.width + layer_width) / 2.0, layer_y)
            .line_to(tree.x + tree.width / 2.0, layer_y - layer_height)
            .close();
        canvas.fill_path(&bough, &PINE_GREEN.into());

        // Snow sits on each bough, shallower than the bough itself.
        let mut snow = Path::new();
        snow.move_to(tree.x + (tree.width - layer_width) / 2.0, layer_y)
            .line_to(tree.x + (tree.width + layer_width) / 2.0, layer_y)
            .line_to(
                tree.x + tree.width / 2.0,
                layer_y - layer_height * tree.snow_cover,
            )
            .close();
        canvas.fill_path(&snow, &Color::WHITE.with_alpha(0.7).into());
    }
}
