//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for
//! managing OpenGL shaders. Shader sources are read from disk through
//! [`ProgramSources`]; a stage whose file is missing or empty is simply left
//! out, and [`ShaderProgram`] stays unlinked rather than failing
//! construction. The [`Uniform`] trait covers setting uniform variables in
//! linked programs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;
use thiserror::Error;

/// Errors produced while building a shader program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader source {} is empty", .path.display())]
    EmptySource { path: PathBuf },
    #[error("failed to create GL object: {0}")]
    Create(String),
    #[error("shader compilation failed: {0}")]
    Compile(String),
    #[error("program linking failed: {0}")]
    Link(String),
}

/// The two pipeline stages a program is linked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    fn gl_type(self) -> u32 {
        match self {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// The source text for a vertex/fragment stage pair, loaded from disk.
///
/// Each stage loads independently: a read failure on one path never aborts
/// the other. Whatever loaded is kept, and [`ProgramSources::complete`]
/// reports whether both stages are present.
pub struct ProgramSources {
    vertex: Option<String>,
    fragment: Option<String>,
}

impl ProgramSources {
    /// Reads both stage sources. Failures are logged and leave the stage
    /// absent.
    pub fn load(vertex_path: &Path, fragment_path: &Path) -> Self {
        Self {
            vertex: read_stage(vertex_path),
            fragment: read_stage(fragment_path),
        }
    }

    /// Whether both stages loaded and a link can be attempted.
    pub fn complete(&self) -> bool {
        self.vertex.is_some() && self.fragment.is_some()
    }
}

fn read_stage(path: &Path) -> Option<String> {
    let result = match std::fs::read_to_string(path) {
        Ok(source) if source.is_empty() => Err(ShaderError::EmptySource {
            path: path.to_path_buf(),
        }),
        Ok(source) => Ok(source),
        Err(source) => Err(ShaderError::Read {
            path: path.to_path_buf(),
            source,
        }),
    };
    match result {
        Ok(source) => Some(source),
        Err(err) => {
            log::warn!("{err}");
            None
        }
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, kind: StageKind, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(kind.gl_type()).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile(log));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

/// A vertex/fragment shader pair linked into a program.
///
/// Construction never fails: if either stage is missing or compilation or
/// linking goes wrong, the failure is logged and the program stays unlinked.
/// Callers check [`ShaderProgram::is_linked`] before relying on draws;
/// [`ShaderProgram::use_program`] and [`ShaderProgram::set_uniform`] are
/// no-ops on an unlinked program.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    program: Option<glow::Program>,
}

impl ShaderProgram {
    /// Loads both stage sources from disk and links them.
    pub fn from_paths(gl: &Arc<glow::Context>, vertex_path: &Path, fragment_path: &Path) -> Self {
        Self::from_sources(gl, &ProgramSources::load(vertex_path, fragment_path))
    }

    /// Links a program from already-loaded sources. An incomplete source
    /// pair produces an unlinked program without attempting a link.
    pub fn from_sources(gl: &Arc<glow::Context>, sources: &ProgramSources) -> Self {
        let (Some(vertex), Some(fragment)) = (&sources.vertex, &sources.fragment) else {
            return Self {
                gl: Arc::clone(gl),
                program: None,
            };
        };

        let program = match Self::link(gl, vertex, fragment) {
            Ok(program) => Some(program),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        };

        Self {
            gl: Arc::clone(gl),
            program,
        }
    }

    fn link(gl: &Arc<glow::Context>, vertex: &str, fragment: &str) -> Result<glow::Program, ShaderError> {
        let shaders = [
            Shader::new(gl, StageKind::Vertex, vertex)?,
            Shader::new(gl, StageKind::Fragment, fragment)?,
        ];

        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in &shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(log));
            }

            for shader in &shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(program)
        }
    }

    /// Whether linking succeeded and the program is usable for draws.
    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        if let Some(program) = self.program {
            unsafe {
                self.gl.use_program(Some(program));
            }
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(program) = self.program {
            value.set_uniform(&self.gl, program, name);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if let Some(program) = self.program {
            unsafe {
                self.gl.delete_program(program);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_sources_complete_when_both_files_readable() {
        let dir = tempfile::tempdir().unwrap();
        let vert = write_temp(&dir, "demo.vert", "void main() {}");
        let frag = write_temp(&dir, "demo.frag", "void main() {}");

        let sources = ProgramSources::load(&vert, &frag);
        assert!(sources.complete());
        assert_eq!(sources.vertex.as_deref(), Some("void main() {}"));
        assert_eq!(sources.fragment.as_deref(), Some("void main() {}"));
    }

    #[test]
    fn test_missing_vertex_stage_leaves_fragment_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let frag = write_temp(&dir, "demo.frag", "void main() {}");

        let sources = ProgramSources::load(&dir.path().join("nope.vert"), &frag);
        assert!(!sources.complete());
        assert!(sources.vertex.is_none());
        assert!(sources.fragment.is_some());
    }

    #[test]
    fn test_missing_fragment_stage_leaves_vertex_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let vert = write_temp(&dir, "demo.vert", "void main() {}");

        let sources = ProgramSources::load(&vert, &dir.path().join("nope.frag"));
        assert!(!sources.complete());
        assert!(sources.vertex.is_some());
        assert!(sources.fragment.is_none());
    }

    #[test]
    fn test_empty_source_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let vert = write_temp(&dir, "demo.vert", "");
        let frag = write_temp(&dir, "demo.frag", "void main() {}");

        let sources = ProgramSources::load(&vert, &frag);
        assert!(!sources.complete());
        assert!(sources.vertex.is_none());
    }
}
