pub mod app;
pub mod config;
pub mod render;
pub mod window;

// Re-export commonly used types
pub use config::{AppConfig, RenderConfig, WindowConfig};
pub use render::buffer::{IndexBuffer, VertexArray, VertexBuffer, VertexLayout};
pub use render::shader::{ShaderError, ShaderProgram, ShaderSource, ShaderStage};
pub use window::WindowContext;
