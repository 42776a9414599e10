use anyhow::{Context, Result};
use glam::Mat4;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::ptr;
use std::time::Instant;
use winit::event_loop::EventLoopBuilder;

use glprimer::{
    app,
    config::AppConfig,
    render::buffer::{IndexBuffer, VertexArray, VertexBuffer, VertexLayout},
    render::shader::ShaderProgram,
    window::WindowContext,
};

const CONFIG_PATH: &str = "glprimer.toml";
const SHADER_PATH: &str = "assets/shaders/transform.shader";

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
}

const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-0.5, -0.5] },
    Vertex { position: [0.5, -0.5] },
    Vertex { position: [0.5, 0.5] },
    Vertex { position: [-0.5, 0.5] },
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    info!("Initializing application...");

    let config = AppConfig::load(CONFIG_PATH)?;

    let event_loop = EventLoopBuilder::new().build()?;
    let ctx = WindowContext::new(&event_loop, &config.window)?;

    let mut program = ShaderProgram::from_combined_file(SHADER_PATH)
        .with_context(|| format!("Failed to build shader program from {SHADER_PATH}"))?;
    program.set_uniform_1f("uScale", 0.75);

    let vao = VertexArray::new();
    vao.bind();
    let buffer = VertexBuffer::new(&QUAD_VERTICES);
    buffer.bind();
    VertexLayout::new().push_f32(2).apply();
    let index_buffer = IndexBuffer::new(&QUAD_INDICES);
    index_buffer.bind();

    let [r, g, b, a] = config.render.clear_color;
    unsafe {
        gl::ClearColor(r, g, b, a);
    }

    let start = Instant::now();
    app::run(event_loop, ctx, move || {
        let t = start.elapsed().as_secs_f32();

        program.set_used();
        let pulse = t.sin() * 0.5 + 0.5;
        program.set_uniform_4f("uColor", [pulse, 0.3, 1.0 - pulse, 1.0]);
        let transform = Mat4::from_rotation_z(t * 0.8);
        program.set_uniform_mat4("uTransform", &transform.to_cols_array());

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
