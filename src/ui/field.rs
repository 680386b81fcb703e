use std::collections::HashMap;

use ratatui::prelude::*;

use crate::game::entities::SHELTER_HIT_POINTS;
use crate::game::snapshot::{ExplosionView, Snapshot};
use crate::game::Tier;

const BACKGROUND: Color = Color::Rgb(0, 0, 5);

type Sprite = &'static [(i32, i32)];

// Sprites are braille-dot offsets around the entity's centre.
const SQUID: [Sprite; 2] = [
    &[
        (0, -2), (-1, -1), (0, -1), (1, -1),
        (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
        (-2, 1), (0, 1), (2, 1),
        (-1, 2), (1, 2),
    ],
    &[
        (0, -2), (-1, -1), (0, -1), (1, -1),
        (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
        (-2, 1), (0, 1), (2, 1),
        (-3, 2), (3, 2),
    ],
];

const CRAB: [Sprite; 2] = [
    &[
        (-1, -2), (1, -2),
        (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
        (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-3, 2), (-2, 2), (2, 2), (3, 2),
    ],
    &[
        (-1, -2), (1, -2),
        (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
        (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-2, 2), (-1, 2), (1, 2), (2, 2),
    ],
];

const OCTOPUS: [Sprite; 2] = [
    &[
        (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
        (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
        (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-2, 2), (2, 2),
    ],
    &[
        (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
        (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
        (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-3, 2), (3, 2),
    ],
];

const CANNON: Sprite = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
    (-4, 0), (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0), (4, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
];

const SAUCER: Sprite = &[
    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
    (-4, 0), (-3, 0), (-1, 0), (1, 0), (3, 0), (4, 0),
    (-5, 1), (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (5, 1),
    (-3, 2), (0, 2), (3, 2),
];

const ZIGZAG: [Sprite; 2] = [
    &[(0, 0), (1, 1), (0, 2), (-1, 3), (0, 4)],
    &[(0, 0), (-1, 1), (0, 2), (1, 3), (0, 4)],
];

/// Character grid where each cell packs a 2x4 block of braille dots.
struct Canvas {
    cells: Vec<Vec<(char, Style)>>,
    cols: usize,
    rows: usize,
    // arena pixels to braille dots
    scale_x: f32,
    scale_y: f32,
}

/// Dots of one colour, merged into the canvas in one pass.
#[derive(Default)]
struct Layer {
    bits: HashMap<(usize, usize), u8>,
}

impl Layer {
    fn dot(&mut self, canvas: &Canvas, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= canvas.dot_width() || y >= canvas.dot_height() {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        *self.bits.entry((x / 2, y / 4)).or_insert(0) |= dot_bit(x % 2, y % 4);
    }

    fn sprite(&mut self, canvas: &Canvas, cx: i32, cy: i32, sprite: Sprite) {
        for &(dx, dy) in sprite {
            self.dot(canvas, cx + dx, cy + dy);
        }
    }

    /// Fills the braille dots covered by an arena rectangle.
    fn fill(&mut self, canvas: &Canvas, x: i32, y: i32, w: i32, h: i32) {
        let (x0, y0) = canvas.to_dots(x, y);
        let (x1, y1) = canvas.to_dots(x + w, y + h);
        for by in y0..y1.max(y0 + 1) {
            for bx in x0..x1.max(x0 + 1) {
                self.dot(canvas, bx, by);
            }
        }
    }
}

fn dot_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

impl Canvas {
    fn new(cols: usize, rows: usize, snapshot: &Snapshot) -> Self {
        Self {
            cells: vec![vec![(' ', Style::default().bg(BACKGROUND)); cols]; rows],
            cols,
            rows,
            scale_x: (cols * 2) as f32 / snapshot.arena_width.max(1) as f32,
            scale_y: (rows * 4) as f32 / snapshot.arena_height.max(1) as f32,
        }
    }

    fn dot_width(&self) -> i32 {
        (self.cols * 2) as i32
    }

    fn dot_height(&self) -> i32 {
        (self.rows * 4) as i32
    }

    fn to_dots(&self, x: i32, y: i32) -> (i32, i32) {
        ((x as f32 * self.scale_x) as i32, (y as f32 * self.scale_y) as i32)
    }

    fn paint(&mut self, layer: &Layer, color: Color, bold: bool) {
        let mut style = Style::default().fg(color).bg(BACKGROUND);
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        for (&(cx, cy), &bits) in &layer.bits {
            if cx < self.cols && cy < self.rows && bits != 0 {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                self.cells[cy][cx] = (ch, style);
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect::<Vec<_>>()
                    .into()
            })
            .collect()
    }
}

// Animation frames and colour per alien sprite key
const ALIEN_LOOKS: [(&str, [Sprite; 2], Color); 3] = [
    ("alien.small", SQUID, Color::Rgb(255, 80, 80)),
    ("alien.medium", CRAB, Color::Rgb(80, 255, 150)),
    ("alien.large", OCTOPUS, Color::Rgb(200, 180, 255)),
];

/// An unknown key has no sprite and the alien is simply not drawn.
fn alien_look(tier: Tier) -> Option<([Sprite; 2], Color)> {
    let key = tier.sprite_key();
    ALIEN_LOOKS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|&(_, sprites, color)| (sprites, color))
}

/// Shelters darken as they lose hit-points.
fn shelter_color(hit_points: i32) -> Color {
    let health = hit_points.clamp(0, SHELTER_HIT_POINTS) as f32 / SHELTER_HIT_POINTS as f32;
    let green = 60.0 + 140.0 * health;
    Color::Rgb(20 + (20.0 * health) as u8, green as u8, 20 + (20.0 * health) as u8)
}

fn explosion_color(explosion: &ExplosionView) -> Color {
    let heat = explosion.ticks_left as f32 / explosion.lifetime.max(1) as f32;
    Color::Rgb(255, (120.0 + 135.0 * heat) as u8, (60.0 * heat) as u8)
}

/// Burst of rays that shrinks as the explosion ages.
fn explosion_layer(canvas: &Canvas, explosion: &ExplosionView, unit: i32) -> Layer {
    let mut layer = Layer::default();
    let (cx, cy) = canvas.to_dots(explosion.x + unit / 2, explosion.y + unit / 2);
    let reach = 1 + (3 * explosion.ticks_left / explosion.lifetime.max(1)) as i32;
    layer.dot(canvas, cx, cy);
    for step in 1..=reach {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (-1, -1), (1, -1), (-1, 1)] {
            layer.dot(canvas, cx + dx * step, cy + dy * step);
        }
    }
    layer
}

/// Draws the whole arena into `cols` x `rows` terminal cells.
pub fn render_field(snapshot: &Snapshot, cols: usize, rows: usize) -> Vec<Line<'static>> {
    let mut canvas = Canvas::new(cols, rows, snapshot);
    let unit = snapshot.unit;
    let frame = ((snapshot.tick / 15) % 2) as usize;

    for alien in &snapshot.aliens {
        let Some((sprites, color)) = alien_look(alien.tier) else {
            continue;
        };
        let (cx, cy) = canvas.to_dots(alien.x + unit / 2, alien.y + unit / 2);
        let mut layer = Layer::default();
        layer.sprite(&canvas, cx, cy, sprites[frame]);
        canvas.paint(&layer, color, false);
    }

    if let Some(bonus) = snapshot.bonus {
        let (cx, cy) = canvas.to_dots(bonus.x + bonus.w / 2, bonus.y + bonus.h / 2);
        let mut layer = Layer::default();
        layer.sprite(&canvas, cx, cy, SAUCER);
        canvas.paint(&layer, Color::Rgb(255, 90, 220), true);
    }

    for shelter in &snapshot.shelters {
        let mut layer = Layer::default();
        let r = shelter.rect;
        layer.fill(&canvas, r.x, r.y, r.w, r.h);
        canvas.paint(&layer, shelter_color(shelter.hit_points), false);
    }

    let mut shots = Layer::default();
    for shot in &snapshot.ship_shots {
        layer_bolt(&mut shots, &canvas, shot.x + shot.w / 2, shot.y, shot.h);
    }
    canvas.paint(&shots, Color::Rgb(255, 255, 200), true);

    let mut bolts = Layer::default();
    let zigzag = ZIGZAG[((snapshot.tick / 4) % 2) as usize];
    for shot in &snapshot.alien_shots {
        let (bx, by) = canvas.to_dots(shot.x + shot.w / 2, shot.y);
        bolts.sprite(&canvas, bx, by, zigzag);
    }
    canvas.paint(&bolts, Color::Rgb(255, 100, 100), true);

    if !snapshot.hud.game_over {
        let ship = snapshot.ship;
        let (cx, cy) = canvas.to_dots(ship.x + ship.w / 2, ship.y + ship.h / 2);
        let mut layer = Layer::default();
        layer.sprite(&canvas, cx, cy, CANNON);
        canvas.paint(&layer, Color::Rgb(80, 255, 80), true);
    }

    for explosion in &snapshot.explosions {
        let layer = explosion_layer(&canvas, explosion, unit);
        canvas.paint(&layer, explosion_color(explosion), true);
    }

    if let Some(ground) = canvas.cells.last_mut() {
        for cell in ground.iter_mut() {
            *cell = ('\u{2500}', Style::default().fg(Color::Rgb(40, 80, 40)).bg(BACKGROUND));
        }
    }

    canvas.into_lines()
}

/// Ship shots are drawn as a short vertical line.
fn layer_bolt(layer: &mut Layer, canvas: &Canvas, x: i32, y: i32, h: i32) {
    let (bx, top) = canvas.to_dots(x, y);
    let (_, bottom) = canvas.to_dots(x, y + h);
    for by in top..=bottom.max(top + 1) {
        layer.dot(canvas, bx, by);
    }
}
