use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use crate::batch::{Batch, Command};

use super::Backend;

/// Totals accumulated by a [`TraceBackend`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TraceStats {
    pub batches: u64,
    pub commands: u64,
    pub draws: u64,
    /// Vertices the draws invoke; indexed draws count one per index.
    pub vertices: u64,
}

/// Backend that replays nothing but logs each command at trace level.
///
/// Useful headless, and as a reference for the order a device backend walks
/// a batch in. Clones share one set of stats, so keep a clone to read them
/// after handing the backend to a `Context`.
#[derive(Debug, Clone, Default)]
pub struct TraceBackend {
    stats: Rc<Cell<TraceStats>>,
}

impl TraceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stats(&self) -> TraceStats {
        self.stats.get()
    }
}

impl Backend for TraceBackend {
    fn execute(&mut self, batch: &Batch) -> Result<()> {
        let mut stats = self.stats.get();
        stats.batches += 1;
        for (i, cmd) in batch.iter().enumerate() {
            stats.commands += 1;
            if cmd.is_draw() {
                stats.draws += 1;
            }
            match *cmd {
                Command::Draw { primitive, vertex_count, .. } => {
                    stats.vertices += u64::from(vertex_count);
                    log::trace!("[{i:03}] topology {:?}", primitive.to_wgpu());
                }
                Command::DrawIndexed { primitive, index_count, .. } => {
                    stats.vertices += u64::from(index_count);
                    log::trace!("[{i:03}] topology {:?}", primitive.to_wgpu());
                }
                Command::DrawInstanced {
                    primitive,
                    vertex_count,
                    instance_count,
                    ..
                } => {
                    stats.vertices += u64::from(vertex_count) * u64::from(instance_count);
                    log::trace!("[{i:03}] topology {:?}", primitive.to_wgpu());
                }
                Command::DrawIndexedInstanced {
                    primitive,
                    index_count,
                    instance_count,
                    ..
                } => {
                    stats.vertices += u64::from(index_count) * u64::from(instance_count);
                    log::trace!("[{i:03}] topology {:?}", primitive.to_wgpu());
                }
                Command::ClearColorFramebuffer { color, .. } => {
                    log::trace!("[{i:03}] clear {:?}", color.to_wgpu());
                }
                _ => {}
            }
            log::trace!("[{i:03}] {:?} params={:?}", cmd.opcode(), cmd.params());
        }
        self.stats.set(stats);
        Ok(())
    }
}
