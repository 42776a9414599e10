pub mod buffer;
pub mod shader;

pub use buffer::{IndexBuffer, VertexArray, VertexBuffer, VertexLayout};
pub use shader::{ShaderError, ShaderProgram, ShaderSource, ShaderStage};
