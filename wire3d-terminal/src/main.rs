/// wire3d Terminal Viewer - one-shot wireframe snapshot
///
/// Renders a wavefront-style mesh file (or a demo cube when no file is
/// given) through the engine's viewport pipeline and prints the
/// resulting polylines as colored ASCII.
mod renderer;

use nalgebra::Vector3;
use renderer::AsciiRenderer;
use std::{env, error::Error, fs, io::stdout};
use wire3d_core::{Object, World};

fn main() -> Result<(), Box<dyn Error>> {
    let mut world = World::new(220.0, 220.0);
    match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            let object = Object::from_wavefront(world.next_name(), [0.2, 0.9, 0.4], &text)?;
            world.add_object(object)?;
        }
        None => {
            let mut cube = Object::cube("cube", [0.3, 0.8, 1.0], 100.0);
            cube.rotate(Vector3::new(0.4, 0.6, 0.0), None);
            world.add_object(cube)?;
        }
    }

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let width = cols as usize;
    let height = rows.saturating_sub(1).max(1) as usize;
    let mut renderer = AsciiRenderer::new(width, height);

    let snapshot = world.viewport_transform(renderer.width() as f64, renderer.height() as f64);
    renderer.render(&snapshot);
    renderer.draw(&mut stdout())?;
    Ok(())
}
