//! The terminal host for the particle field.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use drift_config::{Config, RenderConfig};
use drift_core::{Bounds, Palette};
use drift_field::{Animator, DrawList, FieldCanvas, FrameRequest, Surface};
use rand::rngs::ThreadRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
};

/// Event poll timeout while paused.
const PAUSED_POLL: Duration = Duration::from_millis(250);

/// Container bounds for a terminal of `cols` x `rows` cells.
///
/// A zero-sized terminal has no usable container.
pub fn container_bounds(cols: u16, rows: u16, render: &RenderConfig) -> Option<Bounds> {
    let (cell_width, cell_height) = render.cell_size();
    (cols > 0 && rows > 0).then(|| {
        Bounds::new(
            f64::from(cols) * cell_width,
            f64::from(rows) * cell_height,
        )
    })
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Is frame delivery paused?
    paused: bool,
    /// Show the key help line.
    show_help: bool,
    /// Current accent palette.
    palette: Palette,
    config: Config,
    /// Where the palette is saved on quit, if anywhere.
    config_path: Option<PathBuf>,
    /// Recorded drawing for the current frame.
    surface: DrawList,
    animator: Animator,
    /// The frame the animator asked for next.
    pending: Option<FrameRequest>,
    /// Last known container bounds.
    container: Option<Bounds>,
    rng: ThreadRng,
}

impl App {
    /// Construct a new instance of [`App`]. Nothing is mounted yet.
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let mut rng = rand::thread_rng();
        let animator = Animator::mount(
            None::<&mut DrawList>,
            None,
            config.theme.palette,
            &mut rng,
        );
        Self {
            running: false,
            paused: false,
            show_help: config.render.show_help,
            palette: config.theme.palette,
            config,
            config_path,
            surface: DrawList::new(),
            animator,
            pending: None,
            container: None,
            rng,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.mount(container_bounds(size.width, size.height, &self.config.render));

        let mut clock = crate::frame_clock::FrameClock::new(
            self.config.animation.fps(),
            Instant::now(),
        );
        log::info!("frame interval {:?}", clock.interval());

        self.running = true;
        while self.running {
            if clock.tick(Instant::now()) {
                self.on_frame();
            }
            terminal.draw(|frame| self.render(frame))?;

            let timeout = if self.paused {
                PAUSED_POLL
            } else {
                clock.timeout(Instant::now())
            };
            self.handle_crossterm_events(timeout)?;
        }

        self.animator.unmount();
        Ok(())
    }

    /// Mount a fresh particle field into `container`.
    fn mount(&mut self, container: Option<Bounds>) {
        self.container = container;
        let surface = self.config.render.enabled.then_some(&mut self.surface);
        self.animator = Animator::mount(surface, container, self.palette, &mut self.rng);
        self.pending = self.animator.first_frame();
    }

    /// Tear down the current field and mount a new one.
    fn remount(&mut self) {
        self.animator.unmount();
        self.surface.clear();
        self.mount(self.container);
    }

    /// Run the pending frame, if any.
    fn on_frame(&mut self) {
        if self.paused {
            return;
        }
        if let Some(request) = self.pending.take() {
            let surface = self.config.render.enabled.then_some(&mut self.surface);
            self.pending = self.animator.run_frame(request, surface);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let render = &self.config.render;

        frame.render_widget(
            FieldCanvas::new(&self.surface)
                .backdrop(render.backdrop)
                .gain(render.gain),
            area,
        );

        if !self.show_help {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Particle field
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let accent = Color::from(self.palette.primary());
        let mut help = vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "c".bold().fg(accent),
            " cycle palette  ".dark_gray(),
            "r".bold().fg(accent),
            " reset  ".dark_gray(),
            "space".bold().fg(accent),
            " pause  ".dark_gray(),
            "?".bold().fg(accent),
            " hide help".dark_gray(),
        ];
        if self.paused {
            help.push("  [paused]".fg(accent));
        }
        let help = Line::from(help)
            .style(Style::new().bg(Color::from(render.backdrop)))
            .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame is not delayed.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Container resize notification.
    ///
    /// A field that never mounted for lack of a container mounts now.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        let container = container_bounds(cols, rows, &self.config.render);
        if container.is_some() {
            self.container = container;
        }
        if container.is_some()
            && self.config.render.enabled
            && !self.animator.is_active()
            && !self.animator.is_unmounted()
        {
            log::debug!("container available, mounting particle field");
            self.mount(container);
            return;
        }
        let surface = self.config.render.enabled.then_some(&mut self.surface);
        self.animator.resize(surface, container);
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_palette(),
            (_, KeyCode::Char('r')) => self.remount(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('?')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Cycle through accent palettes. Particle colors are fixed, so this remounts.
    fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        log::info!("palette changed to {}", self.palette.name());
        self.remount();
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
    }

    /// Set running to false and tear down the field.
    fn quit(&mut self) {
        self.running = false;
        self.animator.unmount();
        self.save_palette();
    }

    /// Write a palette changed with `c` back to the config file.
    fn save_palette(&mut self) {
        if self.palette == self.config.theme.palette {
            return;
        }
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        self.config.theme.palette = self.palette;
        match self.config.save_to(path) {
            Ok(()) => log::info!("saved palette {} to {}", self.palette.name(), path.display()),
            Err(e) => log::warn!("could not save palette: {e}"),
        }
    }
}
