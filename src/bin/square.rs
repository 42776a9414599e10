//! Step 4: reuse four vertices across two triangles with an index buffer,
//! and load the shader program from a combined `.shader` file instead of
//! embedded strings.

use anyhow::{Context, Result};
use glprimer::{
    app,
    config::WindowConfig,
    render::buffer::{IndexBuffer, VertexArray, VertexBuffer, VertexLayout},
    render::shader::ShaderProgram,
    window::WindowContext,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::ptr;
use winit::event_loop::EventLoopBuilder;

const SHADER_PATH: &str = "assets/shaders/basic.shader";

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let event_loop = EventLoopBuilder::new().build()?;
    let config = WindowConfig {
        title: "Hello Square".to_string(),
        ..WindowConfig::default()
    };
    let ctx = WindowContext::new(&event_loop, &config)?;

    let mut program = ShaderProgram::from_combined_file(SHADER_PATH)
        .with_context(|| format!("Failed to build shader program from {SHADER_PATH}"))?;
    program.set_uniform_4f("uColor", [0.2, 0.5, 0.9, 1.0]);

    let positions: [f32; 8] = [-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5];
    let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];

    let vao = VertexArray::new();
    vao.bind();
    let buffer = VertexBuffer::new(&positions);
    buffer.bind();
    VertexLayout::new().push_f32(2).apply();
    let index_buffer = IndexBuffer::new(&indices);
    index_buffer.bind();

    unsafe {
        gl::ClearColor(0.2, 0.3, 0.3, 1.0);
    }

    app::run(event_loop, ctx, move || {
        program.set_used();
        vao.bind();
        buffer.bind();
        index_buffer.bind();
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::DrawElements(
                gl::TRIANGLES,
                index_buffer.count(),
                gl::UNSIGNED_INT,
                ptr::null(),
            );
        }
    })
}
