/// Terminal frontend for the helio3d pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use helio3d_core::{Entity, RenderConfig, Renderer, Vec2, Vec3};

pub mod renderer;

pub use renderer::AsciiSurface;

/// Scene handed to the app: entities in world space plus the light position.
pub struct Scene {
    pub entities: Vec<Entity>,
    pub light: Vec3,
}

/// Raw-mode terminal loop driving the pipeline at ~30 FPS.
pub struct TerminalApp {
    renderer: Renderer,
    scene: Scene,
    surface: AsciiSurface,
    window: Vec2,
    running: bool,
    show_overlay: bool,
    ops: Vec<helio3d_core::DrawOp>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(window: Vec2, scene: Scene) -> Self {
        let mut renderer = Renderer::new(&RenderConfig {
            window,
            camera: Vec3::new(window.x / 2.0, window.y / 2.0, 100.0),
            near: 1.0,
            far: 1000.0,
        });
        // Terminal cells are about twice as tall as wide; the default scale
        // maps a pixel-sized window, not a character grid.
        renderer.set_render_scale(Vec2::new(window.y * 2.0, window.y));

        TerminalApp {
            renderer,
            scene,
            surface: AsciiSurface::new(window.x as usize, window.y as usize),
            window,
            running: true,
            show_overlay: false,
            ops: Vec::new(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Camera moves along its own basis vectors so the controls stay
    /// screen-relative after any rotation.
    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            let renderer = &mut self.renderer;
            match code {
                KeyCode::Esc => self.running = false,
                KeyCode::Up => renderer.rotation(renderer.right()),
                KeyCode::Down => renderer.rotation(renderer.left()),
                KeyCode::Right => renderer.rotation(renderer.up()),
                KeyCode::Left => renderer.rotation(renderer.down()),
                KeyCode::Char('n') => renderer.rotation(renderer.front()),
                KeyCode::Char('m') => renderer.rotation(renderer.back()),
                KeyCode::Char('w') => renderer.translation(renderer.back() * 2.0),
                KeyCode::Char('s') => renderer.translation(renderer.front() * 2.0),
                KeyCode::Char('a') => renderer.translation(renderer.right() * 2.0),
                KeyCode::Char('d') => renderer.translation(renderer.left() * 2.0),
                KeyCode::Char('q') => renderer.translation(renderer.down() * 2.0),
                KeyCode::Char('e') => renderer.translation(renderer.up() * 2.0),
                KeyCode::Char('c') => self.show_overlay = !self.show_overlay,
                KeyCode::Char('r') => {
                    let window = self.window;
                    renderer.reset(window);
                    renderer.set_render_scale(Vec2::new(window.y * 2.0, window.y));
                }
                KeyCode::Char('x') => {
                    // Take out the closest entity still standing.
                    if let Some(entity) = self
                        .scene
                        .entities
                        .iter_mut()
                        .rev()
                        .find(|e| !e.is_destroyed() && !e.is_destroying())
                    {
                        entity.start_destroy();
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        for entity in &mut self.scene.entities {
            if !entity.is_destroyed() {
                entity.orbit();
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.ops.clear();

        if self.show_overlay {
            self.renderer.camera_draw(self.scene.light, &mut self.ops);
        }

        let positions: Vec<Vec3> = self.scene.entities.iter().map(|e| e.position()).collect();
        let scales: Vec<Vec3> = self.scene.entities.iter().map(|e| e.scale()).collect();
        let order: Vec<usize> = self.renderer.order(&positions, &scales).to_vec();

        for idx in order {
            self.scene.entities[idx].draw(&self.renderer, self.scene.light, &mut self.ops);
        }

        self.surface.clear();
        self.surface.blit(&self.ops);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.surface.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "helio3d | FPS: {:.1} | Arrows/N/M=Look WASDQE=Move C=Frustum X=Destroy R=Reset ESC=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
