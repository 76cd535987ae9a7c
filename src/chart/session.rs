use super::{selection::UiSelection, DrawCommand, OverlayRegistry};

/// The drawing surface. Receives the complete overlay list, each with its
/// visibility flag, after every selection change; ids are stable so an
/// implementation can toggle visibility without rebuilding geometry.
pub trait MapRenderer {
    fn render(&mut self, commands: &[DrawCommand<'_>]);
}

/// Owns the registry for the lifetime of a display session and forwards
/// each resolved state to the renderer.
#[derive(Debug)]
pub struct ChartSession<R: MapRenderer> {
    registry: OverlayRegistry,
    renderer: R,
}

impl<R: MapRenderer> ChartSession<R> {
    /// Hands the registry's current state to `renderer` straight away.
    pub fn new(registry: OverlayRegistry, renderer: R) -> Self {
        let mut session = ChartSession { registry, renderer };
        session.redraw();
        session
    }

    pub fn on_selection(&mut self, selection: UiSelection) {
        self.registry.apply_selection(&selection);
        self.redraw();
    }

    fn redraw(&mut self) {
        let commands = self.registry.draw_commands();
        self.renderer.render(&commands);
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (OverlayRegistry, R) {
        (self.registry, self.renderer)
    }
}
