use super::{Frame, Renderer, Scene};
use crate::math::normalize_angle;
use std::{
    f32::consts::FRAC_PI_4,
    io::{self, Write},
};

const DEFAULT_COLS: usize = 80;
const DEFAULT_ROWS: usize = 30;

/// Draws frames as character grids, good enough to eyeball a run in a terminal
pub struct AsciiRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    grid: Vec<Vec<u8>>,
}

impl AsciiRenderer<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AsciiRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::with_size(out, DEFAULT_COLS, DEFAULT_ROWS)
    }

    #[must_use]
    pub fn with_size(out: W, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);

        Self {
            out,
            cols,
            rows,
            grid: vec![vec![b' '; cols]; rows],
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell_of(&self, frame: &Frame<'_>, x: f32, y: f32) -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 || x >= frame.viewport.x || y >= frame.viewport.y {
            return None;
        }

        let col = (x / frame.viewport.x * self.cols as f32) as usize;
        let row = (y / frame.viewport.y * self.rows as f32) as usize;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }

    fn plot(&mut self, frame: &Frame<'_>, x: f32, y: f32, ch: u8) {
        if let Some((col, row)) = self.cell_of(frame, x, y) {
            self.grid[row][col] = ch;
        }
    }

    fn car_glyph(angle_rad: f32) -> u8 {
        // Quadrants centered on up/right/down/left
        if angle_rad.abs() <= FRAC_PI_4 {
            b'^'
        } else if angle_rad > FRAC_PI_4 && angle_rad <= 3.0 * FRAC_PI_4 {
            b'>'
        } else if angle_rad < -FRAC_PI_4 && angle_rad >= -3.0 * FRAC_PI_4 {
            b'<'
        } else {
            b'v'
        }
    }

    /// Lays the frame out into the internal grid and returns it as text
    pub fn compose(&mut self, frame: &Frame<'_>) -> String {
        for row in &mut self.grid {
            row.fill(b' ');
        }

        let cell_h = frame.viewport.y / self.rows as f32;

        let status = match frame.scene {
            Scene::Track(track) => {
                for row in 0..self.rows {
                    let y = (row as f32 + 0.5) * cell_h;
                    let bounds = track.bounds(y);
                    self.plot(frame, bounds.left, y, b'|');
                    self.plot(frame, bounds.right, y, b'|');
                    self.plot(frame, bounds.center(), y, b'.');
                }

                String::new()
            }
            Scene::Gates {
                gates,
                current_gate,
                gates_passed,
            } => {
                let cell_w = frame.viewport.x / self.cols as f32;
                for (i, gate) in gates.iter().enumerate() {
                    let ch = if i < current_gate {
                        b'-'
                    } else if i == current_gate {
                        b'#'
                    } else {
                        b'='
                    };

                    // Only the columns the gate covers on screen
                    let y = gate.y();
                    if !(0.0..frame.viewport.y).contains(&y) || !(cell_w > 0.0 && cell_h > 0.0) {
                        continue;
                    }
                    let row = ((y / cell_h) as usize).min(self.rows - 1);
                    let first = (gate.left.x.max(0.0) / cell_w).ceil();
                    let last = (gate.right.x.min(frame.viewport.x) / cell_w).floor();
                    if first <= last {
                        let first = first as usize;
                        let last = (last as usize).min(self.cols - 1);
                        for col in first..=last {
                            self.grid[row][col] = ch;
                        }
                    }

                    self.plot(frame, gate.left.x, gate.y(), b'o');
                    self.plot(frame, gate.right.x, gate.y(), b'o');
                }

                format!("  gates {gates_passed}/{}", gates.len())
            }
        };

        let glyph = Self::car_glyph(normalize_angle(frame.car.angle_rad()));
        self.plot(frame, frame.car.pos.x, frame.car.pos.y, glyph);

        let mut text = String::with_capacity((self.cols + 1) * (self.rows + 1));
        for row in &self.grid {
            text.extend(row.iter().map(|&b| char::from(b)));
            text.push('\n');
        }

        text.push_str(&format!(
            "step {}  reward {:.2}  speed {:.2}  pos ({:.1}, {:.1}){status}{}\n",
            frame.step_count,
            frame.cumulative_reward,
            frame.car.speed,
            frame.car.pos.x,
            frame.car.pos.y,
            if frame.status.is_terminal() {
                "  [done]"
            } else {
                ""
            },
        ));

        text
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let text = self.compose(frame);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
