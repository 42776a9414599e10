//! Step 1: open a window with a GL context and clear it every frame.

use anyhow::Result;
use glprimer::{app, config::WindowConfig, window::WindowContext};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use winit::event_loop::EventLoopBuilder;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let event_loop = EventLoopBuilder::new().build()?;
    let config = WindowConfig {
        title: "Hello Window".to_string(),
        ..WindowConfig::default()
    };
    let ctx = WindowContext::new(&event_loop, &config)?;

    unsafe {
        gl::ClearColor(0.2, 0.3, 0.3, 1.0);
    }

    app::run(event_loop, ctx, || unsafe {
        gl::Clear(gl::COLOR_BUFFER_BIT);
    })
}
