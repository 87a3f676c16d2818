use crate::framebuffer::Framebuffer;

use fugit::MicrosDurationU32;

pub trait Animation {
    /// Renders the next frame of the animation into the framebuffer and returns the duration this frame should be displayed for.
    ///
    /// Positions handed to the drawing primitives must already be clipped to the display.
    fn render_frame(&mut self, fb: &mut Framebuffer) -> MicrosDurationU32;
}
