use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use tinydraw::atlas::CELL;
use tinydraw::palette::{DARK_BLUE, GREEN, RED, WHITE};
use tinydraw::surface::to_rgb888;
use tinydraw::{Drawer, DrawerConfig, FrameBuffer, Surface};

const DEMO: &str = include_str!("../../assets/demo.hex");
const FPS: u64 = 30;

const PLAYER: usize = 0;
const BRICK: usize = 1;
const COIN: usize = 2;
const COIN_EDGE: usize = 3;
const CLOUD: usize = 4;
const PIPE: usize = 5;

struct Scene {
    tick: usize,
    x: i32,
    dx: i32,
    paused: bool,
    sheet: bool,
}

impl Scene {
    fn new() -> Self {
        Scene {
            tick: 0,
            x: 0,
            dx: 1,
            paused: false,
            sheet: false,
        }
    }

    fn update(&mut self, drawer: &Drawer) {
        if self.paused {
            return;
        }

        self.tick += 1;

        let zoom = drawer.zoom() as i32;
        let (width, _) = drawer.display_size();
        if self.tick % 90 == 0 {
            self.dx = -self.dx;
        }

        self.x += self.dx * zoom;
        if self.x < -(CELL as i32) * zoom {
            self.x = width as i32;
        } else if self.x > width as i32 {
            self.x = -(CELL as i32) * zoom;
        }
    }
}

/// Load the atlas named on the command line, `tester [file.hex [cells_w cells_h]]`,
/// or the built-in demo.
fn load() -> Result<Drawer> {
    let mut args = std::env::args().skip(1);

    let path = match args.next() {
        Some(path) => path,
        None => {
            return Drawer::with_defaults(DEMO).map_err(|e| anyhow!("demo atlas: {}", e));
        }
    };

    let hex =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;

    let mut config = DrawerConfig::default();
    if let Some(w) = args.next() {
        config.cells_w = w.parse().with_context(|| format!("atlas width {:?}", w))?;
    }
    if let Some(h) = args.next() {
        config.cells_h = h.parse().with_context(|| format!("atlas height {:?}", h))?;
    }

    Drawer::new(&hex, config).map_err(|e| anyhow!("{}: {}", path, e))
}

fn draw_scene(drawer: &mut Drawer, scene: &Scene, frame: &mut FrameBuffer) {
    let (width, height) = drawer.display_size();
    let cell = CELL as i32 * drawer.zoom() as i32;
    let floor = height as i32 - cell;

    frame.clear(drawer.color(DARK_BLUE as usize));

    // background at a fixed scale regardless of the configured zoom
    let cloud = drawer.sprite(CLOUD).zoom(3);
    drawer.draw_sprite(frame, &cloud.at(20, 8));
    drawer.draw_sprite(frame, &cloud.at(150, 20).flip(true, false));

    for col in 0..(width as i32 + cell - 1) / cell {
        drawer.spr(frame, BRICK, col * cell, floor);
    }

    let pipe = drawer
        .sprite(PIPE)
        .size(2, 2)
        .at(width as i32 - 2 * cell - 10, floor - 2 * cell);
    drawer.draw_sprite(frame, &pipe);

    let coin = if scene.tick % 20 > 10 { COIN_EDGE } else { COIN };
    drawer.spr(frame, coin, width as i32 / 2, floor - 2 * cell);

    let facing_left = scene.dx < 0;
    let player = drawer
        .sprite(PLAYER)
        .at(scene.x, floor - cell)
        .flip(facing_left, false);
    drawer.draw_sprite(frame, &player);

    // a recolored twin, upside down, trailing one cell behind
    drawer.set_override(RED, GREEN);
    let twin = drawer
        .sprite(PLAYER)
        .at(scene.x - scene.dx.signum() * cell, floor - cell)
        .flip(facing_left, true);
    drawer.draw_sprite(frame, &twin);
    drawer.clear_overrides();
}

/// Every sprite in the atlas, in atlas order.
fn draw_sheet(drawer: &Drawer, frame: &mut FrameBuffer) {
    const ZOOM: u32 = 3;
    const GAP: i32 = 2;
    let step = CELL as i32 * ZOOM as i32 + GAP;

    frame.clear(0);

    let atlas = drawer.atlas();
    for n in 0..atlas.sprite_count() {
        let col = (n % atlas.cells_w()) as i32;
        let row = (n / atlas.cells_w()) as i32;
        let sprite = drawer
            .sprite(n)
            .at(GAP + col * step, 14 + row * step)
            .zoom(ZOOM);
        drawer.draw_sprite(frame, &sprite);
    }
}

fn main() -> Result<()> {
    let mut drawer = load()?;
    let (width, height) = drawer.display_size();

    let atlas = drawer.atlas();
    println!(
        "atlas {}x{} cells, {} sprites, zoom {}",
        atlas.cells_w(),
        atlas.cells_h(),
        atlas.sprite_count(),
        drawer.zoom()
    );

    let options = WindowOptions {
        scale: Scale::X4,
        ..WindowOptions::default()
    };
    let mut window =
        Window::new("tinydraw", width, height, options).context("opening window")?;

    window.limit_update_rate(Some(Duration::from_micros(1_000_000 / FPS)));

    let mut frame = FrameBuffer::new(width, height);
    let mut buffer = vec![0u32; width * height];
    let mut scene = Scene::new();
    let mut fps = 0.0;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let started = Instant::now();

        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            scene.paused = !scene.paused;
        }
        if window.is_key_pressed(Key::Tab, KeyRepeat::No) {
            scene.sheet = !scene.sheet;
        }

        scene.update(&drawer);

        if scene.sheet {
            draw_sheet(&drawer, &mut frame);
        } else {
            draw_scene(&mut drawer, &scene, &mut frame);
        }
        frame.draw_text(&format!("{:.0} fps", fps), 2, 2, drawer.color(WHITE as usize));

        for (dst, src) in buffer.iter_mut().zip(frame.pixels()) {
            *dst = to_rgb888(src);
        }

        window
            .update_with_buffer(&buffer, width, height)
            .context("presenting frame")?;

        fps = 1.0 / started.elapsed().as_secs_f64().max(f64::EPSILON);
    }

    Ok(())
}
