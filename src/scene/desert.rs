//! Desert at dusk: an off-road car crosses a dune field under a fading sky.

use std::f32::consts::{PI, TAU};

use rand::{Rng, RngCore};

use super::{Bounds, Shake, Spin, Theme, Vehicle, World};
use crate::canvas::{Canvas, Color, Paint, Path};

const NUM_DUNES: usize = 8;
const NUM_CACTI: usize = 12;
const NUM_STARS: usize = 100;

const SAND: Color = Color::hex(0xD2B48C);
const ROAD: Color = Color::hex(0xC2B280);
const ROAD_STRIPE: Color = Color::hex(0xD8D0C0);
const CACTUS_GREEN: Color = Color::hex(0x2E7D32);

#[derive(Debug, Clone)]
struct Dune {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
}

#[derive(Debug, Clone)]
struct CactusBranch {
    height: f32,
    /// Fraction of the trunk height where the arm attaches.
    position: f32,
    /// -1.0 grows left, 1.0 grows right.
    side: f32,
}

#[derive(Debug, Clone)]
struct Cactus {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    branches: Vec<CactusBranch>,
}

#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    radius: f32,
    brightness: f32,
}

#[derive(Debug, Clone)]
struct Road {
    offset: f32,
    stripe_width: f32,
    stripe_gap: f32,
}

#[derive(Debug, Clone)]
struct DustPuff {
    dx: f32,
    dy: f32,
    radius: f32,
}

pub struct DesertWorld {
    dunes: Vec<Dune>,
    cacti: Vec<Cactus>,
    stars: Vec<Star>,
    road: Road,
    dust: Vec<DustPuff>,
}

impl DesertWorld {
    pub fn new() -> Self {
        DesertWorld {
            dunes: Vec::new(),
            cacti: Vec::new(),
            stars: Vec::new(),
            road: Road {
                offset: 0.0,
                stripe_width: 40.0,
                stripe_gap: 60.0,
            },
            dust: Vec::new(),
        }
    }

    fn random_branches(rng: &mut dyn RngCore) -> Vec<CactusBranch> {
        let count = rng.random_range(1..=2);
        (0..count)
            .map(|_| CactusBranch {
                height: rng.random_range(20.0..50.0),
                position: rng.random_range(0.2..0.6),
                side: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            })
            .collect()
    }
}

impl Default for DesertWorld {
    fn default() -> Self {
        DesertWorld::new()
    }
}

impl World for DesertWorld {
    fn theme(&self) -> Theme {
        Theme::Desert
    }

    fn spawn_vehicle(&self, bounds: &Bounds) -> Vehicle {
        Vehicle::new(
            bounds.height * 0.75,
            120.0,
            60.0,
            2.0,
            Shake::new(1.5, 0.2),
            Spin::new(0.2),
        )
    }

    fn populate(&mut self, bounds: &Bounds, rng: &mut dyn RngCore) {
        self.dunes.clear();
        self.cacti.clear();
        self.stars.clear();
        self.dust.clear();
        self.road.offset = 0.0;

        for i in 0..NUM_DUNES {
            let height = rng.random_range(100.0..250.0);
            let width = rng.random_range(200.0..500.0);
            self.dunes.push(Dune {
                // Spread evenly across the full width.
                x: i as f32 * (bounds.width / (NUM_DUNES - 1) as f32) - width / 2.0,
                y: bounds.height - height,
                width,
                height,
                color: SAND,
            });
        }

        for _ in 0..NUM_CACTI {
            let height = rng.random_range(40.0..100.0);
            let width = rng.random_range(15.0..25.0);
            self.cacti.push(Cactus {
                x: rng.random_range(0.0..bounds.width),
                y: bounds.height * 0.75 - height,
                width,
                height,
                branches: Self::random_branches(rng),
            });
        }

        for _ in 0..NUM_STARS {
            self.stars.push(Star {
                x: rng.random_range(0.0..bounds.width),
                y: rng.random_range(0.0..bounds.height * 0.6),
                radius: rng.random_range(0.5..2.0),
                brightness: rng.random_range(0.2..1.0),
            });
        }
    }

    fn advance(&mut self, bounds: &Bounds, vehicle: &Vehicle, rng: &mut dyn RngCore) {
        self.dust.clear();
        if !vehicle.reached_center {
            return;
        }

        // Dunes drift at half speed for depth.
        for dune in &mut self.dunes {
            dune.x -= vehicle.speed * 0.5;
            if dune.x + dune.width < 0.0 {
                dune.x = bounds.width;
            }
        }

        for cactus in &mut self.cacti {
            cactus.x -= vehicle.speed;
            if cactus.x + cactus.width < 0.0 {
                cactus.x = bounds.width;
                cactus.height = rng.random_range(40.0..100.0);
                cactus.y = bounds.height * 0.75 - cactus.height;
                cactus.branches = Self::random_branches(rng);
            }
        }

        self.road.offset += vehicle.speed;

        if rng.random_range(0.0..1.0) > 0.7 {
            for _ in 0..5 {
                self.dust.push(DustPuff {
                    dx: 10.0 + rng.random_range(0.0..20.0),
                    dy: 40.0 + rng.random_range(0.0..10.0),
                    radius: rng.random_range(3.0..11.0),
                });
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas, bounds: &Bounds) {
        let (w, h) = (bounds.width, bounds.height);

        let mut sky = Paint::linear(0.0, 0.0, 0.0, h * 0.75);
        sky.add_stop(0.0, Color::hex(0x1A237E));
        sky.add_stop(0.3, Color::hex(0x4A148C));
        sky.add_stop(0.7, Color::hex(0xE65100));
        sky.add_stop(1.0, Color::hex(0xFFB74D));
        canvas.fill_rect(0.0, 0.0, w, h, &sky);

        for star in &self.stars {
            let mut path = Path::new();
            path.arc(star.x, star.y, star.radius, 0.0, TAU, false);
            canvas.fill_path(&path, &Color::WHITE.with_alpha(star.brightness).into());
        }

        for dune in &self.dunes {
            let mut path = Path::new();
            path.move_to(dune.x, h)
                .quadratic_to(dune.x + dune.width / 2.0, dune.y, dune.x + dune.width, h);
            canvas.fill_path(&path, &dune.color.into());

            // Side shading gives the dune its rounded look.
            let mut shadow = Paint::linear(dune.x, dune.y, dune.x + dune.width, dune.y);
            shadow.add_stop(0.0, Color::BLACK.with_alpha(0.2));
            shadow.add_stop(0.5, Color::BLACK.with_alpha(0.0));
            shadow.add_stop(1.0, Color::BLACK.with_alpha(0.2));
            canvas.fill_path(&path, &shadow);
        }

        for cactus in &self.cacti {
            draw_cactus(canvas, cactus);
        }

        self.draw_road(canvas, bounds);
    }

    fn draw_vehicle(&self, canvas: &mut Canvas, vehicle: &Vehicle) {
        let shake = vehicle.shake_offset();
        let (x, y) = (vehicle.x, vehicle.y);
        let (vw, vh) = (vehicle.width, vehicle.height);

        // Chassis, body, roof.
        canvas.fill_rect(x, y + 10.0 + shake, vw, vh / 2.0, &Color::hex(0x333333).into());
        canvas.fill_rect(
            x + 10.0,
            y - 10.0 + shake,
            vw - 20.0,
            vh / 2.0 + 10.0,
            &Color::hex(0x8B4513).into(),
        );
        canvas.fill_rect(
            x + 20.0,
            y - 25.0 + shake,
            vw - 45.0,
            vh / 2.0,
            &Color::hex(0xA0522D).into(),
        );

        // Windows.
        canvas.fill_rect(
            x + 25.0,
            y - 20.0 + shake,
            vw - 70.0,
            vh / 2.0 - 10.0,
            &Color::hex(0xC8E6FF).with_alpha(0.6).into(),
        );
        canvas.fill_rect(
            x + vw - 40.0,
            y - 20.0 + shake,
            15.0,
            vh / 2.0 - 10.0,
            &Color::hex(0xC8E6FF).with_alpha(0.5).into(),
        );

        // Front bumper.
        canvas.fill_rect(x, y + 15.0 + shake, 15.0, 10.0, &Color::hex(0x444444).into());

        // Roof rack and its three posts.
        let mut rack = Path::new();
        rack.move_to(x + 25.0, y - 28.0 + shake)
            .line_to(x + vw - 45.0, y - 28.0 + shake);
        for i in 0..3 {
            let post_x = x + 30.0 + i as f32 * 20.0;
            rack.move_to(post_x, y - 28.0 + shake)
                .line_to(post_x, y - 25.0 + shake);
        }
        canvas.stroke_path(&rack, &Color::hex(0x555555).into(), 2.0);

        draw_wheel(canvas, x + 90.0, y + 35.0 + shake, vehicle.spin.angle);
        draw_wheel(canvas, x + 30.0, y + 35.0 + shake, vehicle.spin.angle);

        // Headlight with a radial glow.
        let mut lamp = Path::new();
        lamp.ellipse(x + 5.0, y + 5.0 + shake, 4.0, 6.0, 0.0, 0.0, TAU, false);
        canvas.fill_path(&lamp, &Color::hex(0xFFFFDD).into());

        let mut glow = Paint::radial(x + 5.0, y + 5.0 + shake, 0.0, x + 5.0, y + 5.0 + shake, 15.0);
        glow.add_stop(0.0, Color::hex(0xFFFFC8).with_alpha(0.8));
        glow.add_stop(1.0, Color::hex(0xFFFFC8).with_alpha(0.0));
        let mut halo = Path::new();
        halo.ellipse(x + 5.0, y + 5.0 + shake, 15.0, 15.0, 0.0, 0.0, TAU, false);
        canvas.fill_path(&halo, &glow);

        // Taillight.
        canvas.fill_rect(x + vw - 5.0, y + 5.0 + shake, 4.0, 6.0, &Color::hex(0xFF3333).into());

        for puff in &self.dust {
            let mut path = Path::new();
            path.arc(x + puff.dx, y + shake + puff.dy, puff.radius, 0.0, TAU, false);
            canvas.fill_path(&path, &SAND.with_alpha(0.3).into());
        }
    }
}

impl DesertWorld {
    fn draw_road(&self, canvas: &mut Canvas, bounds: &Bounds) {
        let (w, h) = (bounds.width, bounds.height);
        canvas.fill_rect(0.0, h * 0.75 + 30.0, w, 60.0, &ROAD.into());

        let total = self.road.stripe_width + self.road.stripe_gap;
        let stripes = (w / total).ceil() as i32 + 1;
        for i in 0..stripes {
            let x = i as f32 * total - (self.road.offset % total);
            canvas.fill_rect(x, h * 0.75 + 58.0, self.road.stripe_width, 4.0, &ROAD_STRIPE.into());
        }
    }
}

fn draw_cactus(canvas: &mut Canvas, cactus: &Cactus) {
    let paint: Paint = CACTUS_GREEN.into();

    canvas.fill_rect(cactus.x, cactus.y, cactus.width, cactus.height, &paint);

    // Rounded top.
    let mut cap = Path::new();
    cap.arc(
        cactus.x + cactus.width / 2.0,
        cactus.y,
        cactus.width / 2.0,
        0.0,
        PI,
        true,
    );
    canvas.fill_path(&cap, &paint);

    for branch in &cactus.branches {
        let branch_y = cactus.y + cactus.height * branch.position;
        let branch_x = cactus.x + if branch.side < 0.0 { 0.0 } else { cactus.width };

        // Horizontal arm out of the trunk.
        canvas.fill_rect(branch_x, branch_y, branch.side * cactus.width, cactus.width, &paint);

        // Vertical arm segment.
        let arm_x = branch_x + branch.side * cactus.width
            - if branch.side < 0.0 { cactus.width } else { 0.0 };
        canvas.fill_rect(arm_x, branch_y, cactus.width, branch.height, &paint);

        let mut arm_cap = Path::new();
        arm_cap.arc(
            arm_x + cactus.width / 2.0,
            branch_y,
            cactus.width / 2.0,
            0.0,
            PI,
            true,
        );
        canvas.fill_path(&arm_cap, &paint);

        // Rounded elbow where the arm meets the trunk.
        let mut elbow = Path::new();
        elbow.arc(
            branch_x,
            branch_y + cactus.width / 2.0,
            cactus.width / 2.0,
            if branch.side < 0.0 { 0.0 } else { PI / 2.0 },
            if branch.side < 0.0 { PI / 2.0 } else { PI },
            false,
        );
        canvas.fill_path(&elbow, &paint);
    }

    // Darker strip down the shaded side.
    canvas.fill_rect(
        cactus.x + cactus.width * 0.8,
        cactus.y,
        cactus.width * 0.2,
        cactus.height,
        &Color::hex(0x003200).with_alpha(0.5).into(),
    );
}

fn draw_wheel(canvas: &mut Canvas, cx: f32, cy: f32, rotation: f32) {
    canvas.save();
    canvas.translate(cx, cy);
    canvas.rotate(rotation);

    let mut tire = Path::new();
    tire.arc(0.0, 0.0, 18.0, 0.0, TAU, false);
    canvas.fill_path(&tire, &Color::hex(0x111111).into());

    // Tread pattern: eight radial bars.
    let mut tread = Path::new();
    for i in 0..8 {
        let angle = i as f32 * PI / 4.0;
        tread
            .move_to(9.0 * angle.cos(), 9.0 * angle.sin())
            .line_to(16.0 * angle.cos(), 16.0 * angle.sin());
    }
    canvas.stroke_path(&tread, &Color::hex(0x333333).into(), 2.0);

    let mut hub = Path::new();
    hub.arc(0.0, 0.0, 8.0, 0.0, TAU, false);
    canvas.fill_path(&hub, &Color::hex(0x777777).into());

    let mut hub_center = Path::new();
    hub_center.arc(0.0, 0.0, 5.0, 0.0, TAU, false);
    canvas.fill_path(&hub_center, &Color::hex(0x555555).into());

    canvas.restore();
}
