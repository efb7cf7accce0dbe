//! Output surface and input events: the window side of the runner.

use glam::Vec2;
use log::info;
use minifb::{Key, MouseButton, MouseMode, Scale, Window, WindowOptions};
use thiserror::Error;

use crate::pipeline::FrameBuffer;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("unable to open window: {0}")]
    Open(#[source] minifb::Error),
    #[error("unable to present frame: {0}")]
    Present(#[source] minifb::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Page scroll request in pixels, positive scrolls down
    Wheel(f32),
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    /// The user asked to quit
    Close,
}

/// Something frames can be shown on and input read from.
pub trait Surface {
    /// Viewport size in logical pixels
    fn size(&self) -> (usize, usize);

    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    fn is_open(&self) -> bool;

    /// Input gathered since the previous call
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;

    /// Show `frame`, blocking until the next display slot
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), SurfaceError>;
}

pub struct MinifbSurface {
    window: Window,
    size: (usize, usize),
    pixel_ratio: f32,
    scroll_step: f32,
    mouse_down: bool,
    last_mouse: Option<Vec2>,
}

impl MinifbSurface {
    pub fn open(
        title: &str,
        width: usize,
        height: usize,
        pixel_ratio: f32,
        scroll_step: f32,
        fps: usize,
    ) -> Result<Self, SurfaceError> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                scale: Scale::X1,
                ..WindowOptions::default()
            },
        )
        .map_err(SurfaceError::Open)?;
        window.set_target_fps(fps);
        info!("Opened {}x{} window at {} fps", width, height, fps);

        Ok(Self {
            window,
            size: (width, height),
            pixel_ratio,
            scroll_step,
            mouse_down: false,
            last_mouse: None,
        })
    }
}

impl Surface for MinifbSurface {
    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();

        if self.window.is_key_down(Key::Escape) || self.window.is_key_down(Key::Q) {
            events.push(SurfaceEvent::Close);
        }

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            if dy != 0.0 {
                // wheel up reports positive, which scrolls the page up
                events.push(SurfaceEvent::Wheel(-dy * self.scroll_step));
            }
        }

        let down = self.window.get_mouse_down(MouseButton::Left);
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Vec2::new(x, y));

        match (self.mouse_down, down, pos) {
            (false, true, Some(p)) => events.push(SurfaceEvent::PointerDown(p)),
            (true, true, Some(p)) if Some(p) != self.last_mouse => {
                events.push(SurfaceEvent::PointerMove(p))
            }
            (true, false, _) => events.push(SurfaceEvent::PointerUp),
            _ => {}
        }
        self.mouse_down = down && pos.is_some();
        if pos.is_some() {
            self.last_mouse = pos;
        }

        events
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), SurfaceError> {
        self.window
            .update_with_buffer(&frame.data, frame.width, frame.height)
            .map_err(SurfaceError::Present)
    }
}
