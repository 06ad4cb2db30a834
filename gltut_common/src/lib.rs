//! Pieces of the tutorial utilities that don't need a live OpenGL context: the `gl.log` file,
//! the FPS counter shown in the window title, and loading shader sources from disk.

#[macro_use] extern crate lazy_static;

pub mod fps;
pub mod log_file;
pub mod shader_source;

pub use fps::{fps_title, FpsCounter};
pub use log_file::{errors_are_logged, GlLog, GL_LOG_FILE};
pub use shader_source::{read_shader_source, SourceError, MAX_SHADER_LENGTH};
