//! Step 2: upload a vertex buffer, point attribute 0 at it, and draw a raw
//! triangle. No shader program yet; the compatibility context routes
//! attribute 0 through the fixed-function vertex array.

use anyhow::Result;
use glprimer::{
    app,
    config::WindowConfig,
    render::buffer::{VertexBuffer, VertexLayout},
    window::WindowContext,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use winit::event_loop::EventLoopBuilder;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let event_loop = EventLoopBuilder::new().build()?;
    let config = WindowConfig {
        title: "Hello Triangle".to_string(),
        ..WindowConfig::default()
    };
    let ctx = WindowContext::new(&event_loop, &config)?;

    // One 2D position per vertex
    let positions: [f32; 6] = [-0.5, -0.5, 0.0, 0.5, 0.5, -0.5];
    let buffer = VertexBuffer::new(&positions);
    let layout = VertexLayout::new().push_f32(2);

    unsafe {
        gl::ClearColor(0.2, 0.3, 0.3, 1.0);
    }

    app::run(event_loop, ctx, move || {
        buffer.bind();
        layout.apply();
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
        }
    })
}
