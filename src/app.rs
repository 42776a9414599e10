use anyhow::Result;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
};

use crate::window::WindowContext;

/// Drives the render loop: `frame` is called once per redraw with the
/// context current, then the buffers are swapped.
pub fn run<F>(event_loop: EventLoop<()>, ctx: WindowContext, mut frame: F) -> Result<()>
where
    F: FnMut() + 'static,
{
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => ctx.resize(size),
            WindowEvent::RedrawRequested => {
                frame();
                if let Err(e) = ctx.swap_buffers() {
                    log::error!("{e:#}");
                    elwt.exit();
                }
            }
            _ => (),
        },
        Event::AboutToWait => ctx.window.request_redraw(),
        _ => (),
    })?;

    Ok(())
}
