use crate::abs::App;
use crate::render::{FrameRenderer, GlowBackend, RendererConfig};

mod abs;
mod asset;
mod render;

fn main() {
    env_logger::init();

    let mut app = App::new("Cubefield", 1280, 720);
    let backend = GlowBackend::new(app.gl.clone());
    let mut renderer = FrameRenderer::new(backend, RendererConfig::default());

    'running: loop {
        for event in app.event_pump.poll_iter() {
            if matches!(event, sdl2::event::Event::Quit { .. }) {
                break 'running;
            }
        }

        let (width, height) = app.window.size();
        renderer.render(width, height);

        app.window.gl_swap_window();
    }
}
