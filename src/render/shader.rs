use gl::types::*;
use std::collections::HashMap;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::Path;
use std::ptr;
use std::str::FromStr;
use thiserror::Error;

/// Section marker that switches the current stage in a combined shader file.
pub const STAGE_MARKER: &str = "#shader";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("Program linking failed: {0}")]
    Linking(String),
    #[error("No #shader {0} section in source")]
    MissingStage(ShaderStage),
    #[error("Unknown shader stage '{name}' on line {line}")]
    UnknownStage { line: usize, name: String },
    #[error("Line {0} precedes any #shader section")]
    OrphanLine(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

impl FromStr for ShaderStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertex" => Ok(ShaderStage::Vertex),
            "fragment" => Ok(ShaderStage::Fragment),
            _ => Err(()),
        }
    }
}

/// Per-stage source text produced by one linear scan of a combined file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Splits combined source on `#shader <stage>` markers. Each stage's
    /// source is the concatenation of the lines following its marker;
    /// a repeated marker keeps appending to that stage.
    pub fn parse(text: &str) -> Result<Self, ShaderError> {
        let mut source = ShaderSource::default();
        let mut current: Option<ShaderStage> = None;

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            // A marker is `#shader` alone or followed by whitespace;
            // `#shaderfoo` is ordinary source text
            let marker = trimmed
                .strip_prefix(STAGE_MARKER)
                .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
            if let Some(rest) = marker {
                let name = rest.trim();
                current = Some(name.parse().map_err(|_| ShaderError::UnknownStage {
                    line: index + 1,
                    name: name.to_string(),
                })?);
                continue;
            }

            match current {
                Some(ShaderStage::Vertex) => {
                    source.vertex.push_str(line);
                    source.vertex.push('\n');
                }
                Some(ShaderStage::Fragment) => {
                    source.fragment.push_str(line);
                    source.fragment.push('\n');
                }
                None if trimmed.is_empty() => {}
                None => return Err(ShaderError::OrphanLine(index + 1)),
            }
        }

        Ok(source)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn stage(&self, stage: ShaderStage) -> Result<&str, ShaderError> {
        let text = match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        };
        if text.is_empty() {
            return Err(ShaderError::MissingStage(stage));
        }
        Ok(text)
    }
}

/// Linked program with a uniform-location cache.
pub struct ShaderProgram {
    id: GLuint,
    uniforms: HashMap<String, GLint>,
}

impl ShaderProgram {
    /// Compiles both stages, links them, and deletes the stage objects.
    pub fn from_source(source: &ShaderSource) -> Result<Self, ShaderError> {
        // Both stages are required to link; check before touching GL so a
        // missing section cannot leak a compiled stage object
        let vertex_src = source.stage(ShaderStage::Vertex)?;
        let fragment_src = source.stage(ShaderStage::Fragment)?;

        let vertex = Self::compile_stage(vertex_src, ShaderStage::Vertex)?;
        let fragment = match Self::compile_stage(fragment_src, ShaderStage::Fragment) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(err);
            }
        };

        let program = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(program, vertex);
            gl::AttachShader(program, fragment);
            gl::LinkProgram(program);
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);
        }

        Self::check_link_status(program)
    }

    /// Loads a combined `#shader`-sectioned file and builds a program from it.
    pub fn from_combined_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        Self::from_source(&ShaderSource::from_file(path)?)
    }

    /// Classic two-file variant: one source file per stage.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let source = ShaderSource {
            vertex: fs::read_to_string(vertex_path)?,
            fragment: fs::read_to_string(fragment_path)?,
        };
        Self::from_source(&source)
    }

    fn compile_stage(source: &str, stage: ShaderStage) -> Result<GLuint, ShaderError> {
        let c_str = CString::new(source.as_bytes())?;

        let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
        unsafe {
            gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
            gl::CompileShader(shader);
        }

        let mut success = 1;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            }

            let log = Self::create_whitespace_cstring_with_len(len as usize);

            unsafe {
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), log.as_ptr() as *mut GLchar);
                gl::DeleteShader(shader);
            }

            return Err(ShaderError::Compilation {
                stage,
                log: log.to_string_lossy().into_owned(),
            });
        }

        Ok(shader)
    }

    fn check_link_status(program: GLuint) -> Result<Self, ShaderError> {
        let mut success = 1;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            }

            let log = Self::create_whitespace_cstring_with_len(len as usize);

            unsafe {
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), log.as_ptr() as *mut GLchar);
                gl::DeleteProgram(program);
            }

            return Err(ShaderError::Linking(log.to_string_lossy().into_owned()));
        }

        Ok(ShaderProgram {
            id: program,
            uniforms: HashMap::new(),
        })
    }

    fn create_whitespace_cstring_with_len(len: usize) -> CString {
        let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
        buffer.extend([b' '].iter().cycle().take(len));
        unsafe { CString::from_vec_unchecked(buffer) }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    pub fn get_uniform_location(&mut self, name: &str) -> GLint {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let cname = CString::new(name).unwrap_or_default();
        let location = unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) };

        if location == -1 {
            log::warn!("Uniform '{}' not found in shader", name);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    pub fn set_uniform_1f(&mut self, name: &str, value: f32) {
        self.set_used();
        let location = self.get_uniform_location(name);
        unsafe {
            gl::Uniform1f(location, value);
        }
    }

    pub fn set_uniform_4f(&mut self, name: &str, value: [f32; 4]) {
        self.set_used();
        let location = self.get_uniform_location(name);
        unsafe {
            gl::Uniform4f(location, value[0], value[1], value[2], value[3]);
        }
    }

    pub fn set_uniform_mat4(&mut self, name: &str, mat: &[f32; 16]) {
        self.set_used();
        let location = self.get_uniform_location(name);
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, mat.as_ptr());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_two_sections() {
        let combined = "\
#shader vertex
void main() { gl_Position = vec4(0.0); }
#shader fragment
out vec4 FragColor;
void main() { FragColor = vec4(1.0); }
";
        let source = ShaderSource::parse(combined).unwrap();
        assert_eq!(source.vertex, "void main() { gl_Position = vec4(0.0); }\n");
        assert_eq!(
            source.fragment,
            "out vec4 FragColor;\nvoid main() { FragColor = vec4(1.0); }\n"
        );
    }

    #[test]
    fn test_parse_marker_whitespace() {
        let combined = "  #shader   vertex  \nA\n\t#shader fragment\nB\n";
        let source = ShaderSource::parse(combined).unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_parse_repeated_marker_appends() {
        let combined = "\
#shader vertex
A
#shader fragment
F
#shader vertex
B
";
        let source = ShaderSource::parse(combined).unwrap();
        assert_eq!(source.vertex, "A\nB\n");
        assert_eq!(source.fragment, "F\n");
    }

    #[test]
    fn test_parse_unknown_stage() {
        let err = ShaderSource::parse("#shader vertex\nA\n#shader geometry\nB\n").unwrap_err();
        match err {
            ShaderError::UnknownStage { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "geometry");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_orphan_line() {
        let err = ShaderSource::parse("\n\nfloat x;\n#shader vertex\nA\n").unwrap_err();
        match err {
            ShaderError::OrphanLine(line) => assert_eq!(line, 3),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_marker_requires_separator() {
        // `#shaderfoo` is not a marker, just a source line
        let source = ShaderSource::parse("#shader vertex\n#shaderfoo\n#shader fragment\nB\n").unwrap();
        assert_eq!(source.vertex, "#shaderfoo\n");
    }

    #[test]
    fn test_parse_bare_marker_is_error() {
        let err = ShaderSource::parse("#shader\nA\n").unwrap_err();
        match err {
            ShaderError::UnknownStage { line, name } => {
                assert_eq!(line, 1);
                assert_eq!(name, "");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_blank_lines_before_marker_ok() {
        let source = ShaderSource::parse("\n  \n#shader vertex\nA\n#shader fragment\nB\n").unwrap();
        assert_eq!(source.vertex, "A\n");
    }

    #[test]
    fn test_parse_empty_input() {
        let source = ShaderSource::parse("").unwrap();
        assert!(source.vertex.is_empty());
        assert!(source.fragment.is_empty());
    }

    #[test]
    fn test_missing_stage_reported() {
        let source = ShaderSource::parse("#shader vertex\nA\n").unwrap();
        assert!(source.stage(ShaderStage::Vertex).is_ok());
        match source.stage(ShaderStage::Fragment).unwrap_err() {
            ShaderError::MissingStage(stage) => assert_eq!(stage, ShaderStage::Fragment),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_stage_marker_roundtrip() {
        assert_eq!("vertex".parse::<ShaderStage>(), Ok(ShaderStage::Vertex));
        assert_eq!("fragment".parse::<ShaderStage>(), Ok(ShaderStage::Fragment));
        assert!("compute".parse::<ShaderStage>().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#shader vertex\nA\n#shader fragment\nB\n").unwrap();

        let source = ShaderSource::from_file(file.path()).unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShaderSource::from_file(dir.path().join("nope.shader")).unwrap_err();
        assert!(matches!(err, ShaderError::Io(_)));
    }
}
