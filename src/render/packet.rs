use super::{Frame, Renderer, Scene};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::{self, Write};

pub const SCENE_TAG_TRACK: u8 = 0;
pub const SCENE_TAG_GATES: u8 = 1;

/// Streams frames to an external viewer
///
/// Every packet is a big-endian `u64` payload length followed by the payload.
/// The payload is little-endian:
///
/// * `u8` scene tag, `u8` terminal flag, `u32` step count, `f32` cumulative reward
/// * `f32 x2` viewport, `f32 x4` car x/y/angle/speed
/// * track: `f32 x4` base center, amplitude, frequency, half width
/// * gates: `u32` gate count, `u32` current gate, `u32` gates passed,
///   then `f32 x4` left x/y, right x/y per gate
pub struct PacketRenderer<W: Write> {
    out: W,
    buffer: Vec<u8>,
    packets_sent: u64,
}

impl<W: Write> PacketRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: Vec::with_capacity(256),
            packets_sent: 0,
        }
    }

    #[must_use]
    pub const fn packets_sent(&self) -> u64 {
        self.packets_sent
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn encode(buffer: &mut Vec<u8>, frame: &Frame<'_>) -> io::Result<()> {
        buffer.clear();

        let tag = match frame.scene {
            Scene::Track(_) => SCENE_TAG_TRACK,
            Scene::Gates { .. } => SCENE_TAG_GATES,
        };

        buffer.write_u8(tag)?;
        buffer.write_u8(u8::from(frame.status.is_terminal()))?;
        buffer.write_u32::<LittleEndian>(frame.step_count)?;
        buffer.write_f32::<LittleEndian>(frame.cumulative_reward)?;

        for val in frame.viewport.to_array() {
            buffer.write_f32::<LittleEndian>(val)?;
        }

        let car = &frame.car;
        for val in [car.pos.x, car.pos.y, car.angle, car.speed] {
            buffer.write_f32::<LittleEndian>(val)?;
        }

        match frame.scene {
            Scene::Track(track) => {
                for val in [
                    track.base_center,
                    track.amplitude,
                    track.frequency,
                    track.half_width,
                ] {
                    buffer.write_f32::<LittleEndian>(val)?;
                }
            }
            Scene::Gates {
                gates,
                current_gate,
                gates_passed,
            } => {
                let as_u32 = |val: usize| {
                    u32::try_from(val).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
                };

                buffer.write_u32::<LittleEndian>(as_u32(gates.len())?)?;
                buffer.write_u32::<LittleEndian>(as_u32(current_gate)?)?;
                buffer.write_u32::<LittleEndian>(as_u32(gates_passed)?)?;

                for gate in gates {
                    for val in [gate.left.x, gate.left.y, gate.right.x, gate.right.y] {
                        buffer.write_f32::<LittleEndian>(val)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl<W: Write> Renderer for PacketRenderer<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        Self::encode(&mut self.buffer, frame)?;

        self.out.write_u64::<BigEndian>(self.buffer.len() as u64)?;
        self.out.write_all(&self.buffer)?;
        self.out.flush()?;

        self.packets_sent += 1;
        Ok(())
    }
}
