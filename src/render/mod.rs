//! Per-frame rendering of the rotating cube grid.
//!
//! [`FrameRenderer`] owns the demo's lifecycle: the first call to
//! [`FrameRenderer::render`] builds the GPU resources (and runs the one-shot
//! diagnostic model probe), and every call afterwards just submits the
//! frame. Everything GPU-facing goes through the [`RenderBackend`] trait so
//! the submission logic stays testable without a GL context.

pub mod backend;
pub mod scene;

pub use backend::GlowBackend;

use std::path::{Path, PathBuf};

use glam::Mat4;

use crate::asset;
use scene::{CubeVertex, CUBE_INDICES, CUBE_VERTICES, GRID_DIM, TICK_INCREMENT};

/// The slice of the GPU surface the demo drives.
pub trait RenderBackend {
    /// Uploads the cube geometry and builds the shader program. Called
    /// exactly once, before the first frame.
    fn create_resources(
        &mut self,
        vertices: &[CubeVertex],
        indices: &[u16],
        vertex_shader: &Path,
        fragment_shader: &Path,
    );

    /// Clears the output target and applies the camera and viewport for the
    /// coming frame.
    fn begin_frame(&mut self, width: u32, height: u32, view: Mat4, projection: Mat4);

    /// Submits one cube draw with the given model transform.
    fn draw_cube(&mut self, model: Mat4);
}

/// On-disk locations of the assets the renderer loads on its first frame.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub probe_model: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("shaders/cubes.vert"),
            fragment_shader: PathBuf::from("shaders/cubes.frag"),
            probe_model: PathBuf::from("models/spider.gltf"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RendererState {
    Uninitialized,
    Ready,
}

/// Renders the 11x11 grid of rotating cubes, once per call.
pub struct FrameRenderer<B> {
    backend: B,
    config: RendererConfig,
    state: RendererState,
    tick: f32,
}

impl<B: RenderBackend> FrameRenderer<B> {
    pub fn new(backend: B, config: RendererConfig) -> Self {
        Self {
            backend,
            config,
            state: RendererState::Uninitialized,
            tick: 0.0,
        }
    }

    /// Submits one frame at the given viewport size, initializing GPU
    /// resources on the first call.
    pub fn render(&mut self, width: u32, height: u32) {
        if self.state == RendererState::Uninitialized {
            self.init();
        }

        self.backend.begin_frame(
            width,
            height,
            scene::view_matrix(),
            scene::projection_matrix(width, height),
        );

        for row in 0..GRID_DIM {
            for col in 0..GRID_DIM {
                self.backend.draw_cube(scene::model_matrix(self.tick, col, row));
            }
        }

        // Grows without bound; fine for a trig phase over any realistic run.
        self.tick += TICK_INCREMENT;
    }

    fn init(&mut self) {
        if let Some(stats) = asset::probe_model(&self.config.probe_model) {
            log::info!(
                "model probe: {} meshes, {} materials",
                stats.meshes,
                stats.materials
            );
        }

        self.backend.create_resources(
            &CUBE_VERTICES,
            &CUBE_INDICES,
            &self.config.vertex_shader,
            &self.config.fragment_shader,
        );
        self.state = RendererState::Ready;
    }

    /// Whether the first-frame initialization has run.
    pub fn is_ready(&self) -> bool {
        self.state == RendererState::Ready
    }

    /// The current rotation phase.
    pub fn tick(&self) -> f32 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        create_calls: usize,
        frames: Vec<(u32, u32, Mat4, Mat4)>,
        draws: Vec<Mat4>,
        uploaded_vertices: usize,
        uploaded_indices: usize,
    }

    impl RenderBackend for RecordingBackend {
        fn create_resources(
            &mut self,
            vertices: &[CubeVertex],
            indices: &[u16],
            _vertex_shader: &Path,
            _fragment_shader: &Path,
        ) {
            self.create_calls += 1;
            self.uploaded_vertices = vertices.len();
            self.uploaded_indices = indices.len();
        }

        fn begin_frame(&mut self, width: u32, height: u32, view: Mat4, projection: Mat4) {
            self.frames.push((width, height, view, projection));
        }

        fn draw_cube(&mut self, model: Mat4) {
            self.draws.push(model);
        }
    }

    fn renderer() -> FrameRenderer<RecordingBackend> {
        // A probe path that never exists: the probe must skip silently.
        let config = RendererConfig {
            vertex_shader: PathBuf::from("missing/demo.vert"),
            fragment_shader: PathBuf::from("missing/demo.frag"),
            probe_model: PathBuf::from("missing/probe.gltf"),
        };
        FrameRenderer::new(RecordingBackend::default(), config)
    }

    #[test]
    fn test_initialization_runs_exactly_once() {
        let mut renderer = renderer();
        assert!(!renderer.is_ready());

        renderer.render(1280, 720);
        renderer.render(640, 480);

        assert!(renderer.is_ready());
        assert_eq!(renderer.backend.create_calls, 1);
        assert_eq!(renderer.backend.uploaded_vertices, 8);
        assert_eq!(renderer.backend.uploaded_indices, 36);
    }

    #[test]
    fn test_each_frame_submits_121_draws() {
        let mut renderer = renderer();
        renderer.render(1280, 720);
        assert_eq!(renderer.backend.draws.len(), 121);
        renderer.render(17, 3);
        assert_eq!(renderer.backend.draws.len(), 242);
    }

    #[test]
    fn test_tick_advances_by_fixed_increment() {
        let mut renderer = renderer();
        assert_eq!(renderer.tick(), 0.0);

        let mut expected = 0.0f32;
        for _ in 0..5 {
            renderer.render(800, 600);
            expected += TICK_INCREMENT;
            assert_eq!(renderer.tick(), expected);
        }
    }

    #[test]
    fn test_frame_transforms_are_deterministic() {
        let mut first = renderer();
        let mut second = renderer();
        first.render(1024, 768);
        second.render(1024, 768);

        assert_eq!(first.backend.frames, second.backend.frames);
        assert_eq!(first.backend.draws.len(), second.backend.draws.len());
        for (a, b) in first.backend.draws.iter().zip(&second.backend.draws) {
            assert_eq!(a.to_cols_array(), b.to_cols_array());
        }
    }

    #[test]
    fn test_camera_is_set_before_draws_each_frame() {
        let mut renderer = renderer();
        renderer.render(320, 240);

        let (width, height, view, projection) = renderer.backend.frames[0];
        assert_eq!((width, height), (320, 240));
        assert_eq!(view.to_cols_array(), scene::view_matrix().to_cols_array());
        assert_eq!(
            projection.to_cols_array(),
            scene::projection_matrix(320, 240).to_cols_array()
        );
    }
}
