use stardrift::app::App;
use stardrift::error::SceneError;
use stardrift::scene::SceneConfig;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SceneError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(SceneConfig::default())?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
