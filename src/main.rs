// main.rs
//
// Builds the default transmission, walks a few animation frames through a
// renderer that only logs, and exports both gears as STL.
//
// RUST_LOG=trace shows every draw call.

use geartrain::render::TracingRenderer;
use geartrain::scene::{AnimationClock, Clock, SceneState, SystemClock};
use geartrain::transmission::{Transmission, TransmissionConfig};
use std::error::Error;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const FRAMES: usize = 5;
const FRAME_INTERVAL: Duration = Duration::from_millis(40);

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let transmission = Transmission::build(TransmissionConfig::default())?;
    for (name, gear) in [("drive", &transmission.drive), ("driven", &transmission.driven)] {
        tracing::info!(
            gear = name,
            teeth = gear.spec.tooth_count(),
            parametric_angle = gear.solution.parametric_angle,
            contact_half_angle = gear.solution.contact_half_angle,
            strips = gear.mesh.strip_count(),
            vertices = gear.mesh.vertex_count(),
            bounding_radius = gear.mesh.bounding_radius(),
            "gear ready"
        );
    }

    let mut scene = SceneState::new();
    scene.key('x');
    scene.key('l');
    scene.key('0');

    let clock = AnimationClock::default();
    let wall = SystemClock::new();
    let mut renderer = TracingRenderer::default();
    for _ in 0..FRAMES {
        let time = clock.time(&wall);
        transmission.render(&scene, time, &mut renderer);
        tracing::debug!(ms = wall.elapsed_ms(), time, "frame");
        std::thread::sleep(FRAME_INTERVAL);
    }
    tracing::info!(frames = renderer.frames, "rendered");

    #[cfg(feature = "stl-io")]
    {
        std::fs::create_dir_all("stl")?;
        let drive = transmission.drive.mesh.to_stl_binary("drive_gear")?;
        std::fs::write("stl/drive_gear.stl", drive)?;
        let driven = transmission.driven.mesh.to_stl_binary("driven_gear")?;
        std::fs::write("stl/driven_gear.stl", driven)?;
        tracing::info!("wrote stl/drive_gear.stl and stl/driven_gear.stl");
    }

    Ok(())
}
