//! Surfaces without a display.

use abacus_ui::{CommandRenderer, RenderCommand};
use crossbeam_channel::{Receiver, Sender};

/// Surface that forwards each posted frame as a command list.
///
/// Canvases left blank (nothing laid out yet) are not forwarded.
#[derive(Debug)]
pub struct RecordingSurface {
    frames: Sender<Vec<RenderCommand>>,
}

impl RecordingSurface {
    /// Creates a surface and the receiver its frames arrive on.
    #[must_use]
    pub fn new() -> (Self, Receiver<Vec<RenderCommand>>) {
        let (frames, receiver) = crossbeam_channel::unbounded();
        (Self { frames }, receiver)
    }
}

impl crate::worker::Surface for RecordingSurface {
    type Canvas = CommandRenderer;

    fn lock_canvas(&mut self) -> Option<CommandRenderer> {
        Some(CommandRenderer::new())
    }

    fn unlock_and_post(&mut self, mut canvas: CommandRenderer) {
        let commands = canvas.take_commands();
        if !commands.is_empty() {
            let _ = self.frames.send(commands);
        }
    }
}
