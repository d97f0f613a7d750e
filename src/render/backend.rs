//! The glow-backed [`RenderBackend`].

use std::path::Path;
use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;

use crate::abs::{Mesh, ShaderProgram};
use crate::render::RenderBackend;
use crate::render::scene::CubeVertex;

/// Owns the GPU-side resources and issues the actual GL calls.
pub struct GlowBackend {
    gl: Arc<glow::Context>,
    mesh: Option<Mesh>,
    program: Option<ShaderProgram>,
}

impl GlowBackend {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self {
            gl,
            mesh: None,
            program: None,
        }
    }
}

impl RenderBackend for GlowBackend {
    fn create_resources(
        &mut self,
        vertices: &[CubeVertex],
        indices: &[u16],
        vertex_shader: &Path,
        fragment_shader: &Path,
    ) {
        self.mesh = Some(Mesh::new(&self.gl, vertices, indices));

        let program = ShaderProgram::from_paths(&self.gl, vertex_shader, fragment_shader);
        if !program.is_linked() {
            log::warn!("cube shader program is unusable; frames will only clear");
        }
        self.program = Some(program);
    }

    fn begin_frame(&mut self, width: u32, height: u32, view: Mat4, projection: Mat4) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);

            // Fixed render-state preset: depth test, back-face culling,
            // standard alpha blend.
            self.gl.enable(glow::DEPTH_TEST);
            self.gl.enable(glow::CULL_FACE);
            self.gl.cull_face(glow::BACK);
            self.gl.front_face(glow::CCW);
            self.gl.enable(glow::BLEND);
            self.gl
                .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
            self.gl.clear_depth_f32(1.0);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        if let Some(program) = &self.program
            && program.is_linked()
        {
            program.use_program();
            program.set_uniform("view", view);
            program.set_uniform("projection", projection);
        }
    }

    fn draw_cube(&mut self, model: Mat4) {
        let (Some(mesh), Some(program)) = (&self.mesh, &self.program) else {
            return;
        };
        if !program.is_linked() {
            return;
        }

        program.set_uniform("model", model);
        mesh.draw();
    }
}
