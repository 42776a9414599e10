//! Step 3: compile and link a shader program from per-stage sources and draw
//! the triangle through it with a uniform color.

use anyhow::Result;
use glprimer::{
    app,
    config::WindowConfig,
    render::buffer::{VertexBuffer, VertexLayout},
    render::shader::{ShaderProgram, ShaderSource},
    window::WindowContext,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use winit::event_loop::EventLoopBuilder;

const VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec2 aPos;

void main() {
    gl_Position = vec4(aPos, 0.0, 1.0);
}
"#;

const FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 FragColor;

uniform vec4 uColor;

void main() {
    FragColor = uColor;
}
"#;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let event_loop = EventLoopBuilder::new().build()?;
    let config = WindowConfig {
        title: "Hello Shaders".to_string(),
        ..WindowConfig::default()
    };
    let ctx = WindowContext::new(&event_loop, &config)?;

    let source = ShaderSource {
        vertex: VERTEX_SRC.to_string(),
        fragment: FRAGMENT_SRC.to_string(),
    };
    let mut program = ShaderProgram::from_source(&source)?;
    program.set_uniform_4f("uColor", [0.9, 0.3, 0.2, 1.0]);

    let positions: [f32; 6] = [-0.5, -0.5, 0.0, 0.5, 0.5, -0.5];
    let buffer = VertexBuffer::new(&positions);
    let layout = VertexLayout::new().push_f32(2);

    unsafe {
        gl::ClearColor(0.2, 0.3, 0.3, 1.0);
    }

    app::run(event_loop, ctx, move || {
        program.set_used();
        buffer.bind();
        layout.apply();
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
        }
    })
}
