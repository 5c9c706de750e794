use sdl2::keyboard::Keycode;
use softpipe::prelude::*;
use softpipe::window::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Procedural checkerboard used when no texture file is given.
fn checkerboard() -> Texture {
    const SIZE: u32 = 64;
    const SQUARE: u32 = 8;
    let pixels = (0..SIZE * SIZE)
        .map(|i| {
            let (x, y) = (i % SIZE, i / SIZE);
            if ((x / SQUARE) + (y / SQUARE)) % 2 == 0 {
                0xFFB0B0B0
            } else {
                0xFF404040
            }
        })
        .collect();
    Texture::from_pixels(SIZE, SIZE, pixels)
}

fn handle_key(engine: &mut Engine, key: Keycode) {
    let config = engine.config_mut();
    match key {
        Keycode::Num1 => config.render_mode = RenderMode::WireframeVertices,
        Keycode::Num2 => config.render_mode = RenderMode::Wireframe,
        Keycode::Num3 => config.render_mode = RenderMode::Solid,
        Keycode::Num4 => config.render_mode = RenderMode::SolidWireframe,
        Keycode::Num5 => config.render_mode = RenderMode::Textured,
        Keycode::Num6 => config.render_mode = RenderMode::TexturedWireframe,
        Keycode::C => config.cull_mode = CullMode::Back,
        Keycode::D => config.cull_mode = CullMode::None,
        Keycode::G => config.draw_grid = !config.draw_grid,
        _ => {}
    }
}

fn main() -> Result<(), String> {
    let mut window = Window::new("softpipe", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    // Optional: softpipe <mesh.obj> [texture.png]
    let args: Vec<String> = std::env::args().collect();
    let mut mesh = match args.get(1) {
        Some(path) => Mesh::from_obj(path).map_err(|e| e.to_string())?,
        None => Mesh::cube(),
    };
    match args.get(2) {
        Some(path) => mesh.set_texture(Texture::from_file(path).map_err(|e| e.to_string())?),
        None => mesh.set_texture(checkerboard()),
    }
    mesh.transform_mut().set_position_xyz(0.0, 0.0, 3.5);
    engine.set_mesh(mesh);

    let mut limiter = FrameLimiter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                engine.resize(w, h);
                window.resize(w, h)?;
            }
            WindowEvent::KeyDown(key) => handle_key(&mut engine, key),
            WindowEvent::None => {}
        }

        limiter.wait_and_get_delta(&window);

        engine.mesh_mut().transform_mut().rotate_y(0.005);
        engine.update();
        engine.render();

        window.present(engine.frame_buffer_bytes())?;
    }

    Ok(())
}
