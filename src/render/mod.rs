//! Drawing is kept out of the simulation: a game only hands out a [`Frame`],
//! and whichever [`Renderer`] the caller picked turns it into output.

mod ascii;
mod packet;

pub use ascii::AsciiRenderer;
pub use packet::{PacketRenderer, SCENE_TAG_GATES, SCENE_TAG_TRACK};

use crate::sim::{CarState, EpisodeStatus, Gate, Track};
use glam::Vec2;
use std::io;

/// Variant-specific geometry of a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scene<'a> {
    Track(Track),
    Gates {
        gates: &'a [Gate],
        current_gate: usize,
        gates_passed: usize,
    },
}

/// Everything needed to draw one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<'a> {
    pub viewport: Vec2,
    pub car: CarState,
    pub step_count: u32,
    pub cumulative_reward: f32,
    pub status: EpisodeStatus,
    pub scene: Scene<'a>,
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Headless mode, drops every frame
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame<'_>) -> io::Result<()> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        (**self).draw(frame)
    }
}
