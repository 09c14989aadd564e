use crate::error::DashResult;
use crate::render::{RenderFrame, Renderer, Surface};

/// Headless renderer used by tests and tooling.
///
/// Frames are validated before being accepted. The most recent frame per
/// surface is kept, together with the order surfaces were drawn in.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_log: Vec<Surface>,
    pub last_ribbon: Option<RenderFrame>,
    pub last_gauges: Option<RenderFrame>,
    pub last_scatter: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn last_frame(&self, surface: Surface) -> Option<&RenderFrame> {
        match surface {
            Surface::Ribbon => self.last_ribbon.as_ref(),
            Surface::Gauges => self.last_gauges.as_ref(),
            Surface::Scatter => self.last_scatter.as_ref(),
        }
    }

    #[must_use]
    pub fn render_count(&self, surface: Surface) -> usize {
        self.render_log.iter().filter(|s| **s == surface).count()
    }

    pub fn clear_log(&mut self) {
        self.render_log.clear();
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()> {
        frame.validate()?;
        self.render_log.push(frame.surface);
        let slot = match frame.surface {
            Surface::Ribbon => &mut self.last_ribbon,
            Surface::Gauges => &mut self.last_gauges,
            Surface::Scatter => &mut self.last_scatter,
        };
        *slot = Some(frame.clone());
        Ok(())
    }
}
