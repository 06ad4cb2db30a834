use std::error::Error;
use std::ffi::CString;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Largest shader source (in bytes, including the terminating NUL) the lessons will read.
pub const MAX_SHADER_LENGTH: usize = 262_144;

#[derive(Debug)]
pub enum SourceError {
    Open { path: PathBuf, source: io::Error },
    Read { path: PathBuf, source: io::Error },
    TooBig { path: PathBuf, max_len: usize },
    InteriorNul { path: PathBuf, position: usize },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Open { path, .. } =>
                write!(f, "could not open shader file {} for reading", path.display()),
            SourceError::Read { path, .. } =>
                write!(f, "error reading shader file {}", path.display()),
            SourceError::TooBig { path, max_len } =>
                write!(f, "shader file {} is too big (limit is {} bytes)", path.display(), max_len - 1),
            SourceError::InteriorNul { path, position } =>
                write!(f, "shader file {} contains a NUL byte at offset {}", path.display(), position),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SourceError::Open { source, .. } | SourceError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reads a shader source file into a C string ready to hand to `glShaderSource`.
pub fn read_shader_source<P: AsRef<Path>>(path: P) -> Result<CString, SourceError> {
    read_shader_source_limited(path, MAX_SHADER_LENGTH)
}

/// Like [`read_shader_source`], but with a custom size limit. Files of `max_len - 1` bytes or more
/// are rejected rather than silently truncated.
pub fn read_shader_source_limited<P: AsRef<Path>>(path: P, max_len: usize) -> Result<CString, SourceError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| SourceError::Open { path: path.to_path_buf(), source })?;

    let mut contents = Vec::new();
    file.take(max_len as u64)
        .read_to_end(&mut contents)
        .map_err(|source| SourceError::Read { path: path.to_path_buf(), source })?;

    if contents.len() >= max_len.saturating_sub(1) {
        return Err(SourceError::TooBig { path: path.to_path_buf(), max_len });
    }

    CString::new(contents).map_err(|e| SourceError::InteriorNul {
        path: path.to_path_buf(),
        position: e.nul_position(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::write;

    const VERT: &str = "#version 410\nin vec3 vp;\nvoid main() {\n    gl_Position = vec4(vp, 1.0);\n}\n";

    #[test]
    fn reads_a_shader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_vs.glsl");
        write(&path, VERT).unwrap();

        let source = read_shader_source(&path).unwrap();
        assert_eq!(source.to_str().unwrap(), VERT);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.glsl");

        let err = read_shader_source(&path).unwrap_err();
        assert!(matches!(err, SourceError::Open { .. }));
        assert!(err.to_string().contains("nope.glsl"));
        assert!(err.source().is_some());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.glsl");

        // 15 bytes with a 16 byte limit leaves no room for the terminator
        write(&path, "123456789012345").unwrap();
        assert!(matches!(
            read_shader_source_limited(&path, 16),
            Err(SourceError::TooBig { max_len: 16, .. })
        ));

        write(&path, "12345678901234").unwrap();
        assert_eq!(read_shader_source_limited(&path, 16).unwrap().as_bytes().len(), 14);
    }

    #[test]
    fn nul_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nul.glsl");
        write(&path, b"void\0main").unwrap();

        match read_shader_source(&path) {
            Err(SourceError::InteriorNul { position, .. }) => assert_eq!(position, 4),
            other => panic!("expected an interior NUL error, got {:?}", other),
        }
    }
}
