//! Orbiting bodies drawn entirely with pooled gizmos.
//!
//! A handful of spheres circle the origin on tilted orbits; the orbit paths
//! are rebuilt every frame from line segments, which exercises the line pool
//! well past its default capacity.

use etch::prelude::*;

const ORBIT_SEGMENTS: usize = 64;

struct Body {
    radius: f32,
    orbit_radius: f32,
    speed: f32,
    tilt: f32,
    color: Color,
}

fn orbit_point(body: &Body, angle: f32) -> Vector3<f32> {
    let flat = Vector3::new(
        body.orbit_radius * angle.cos(),
        0.0,
        body.orbit_radius * angle.sin(),
    );
    // Tilt the orbital plane around the x axis.
    Vector3::new(
        flat.x,
        flat.y * body.tilt.cos() - flat.z * body.tilt.sin(),
        flat.y * body.tilt.sin() + flat.z * body.tilt.cos(),
    )
}

fn main() {
    env_logger::init();

    let bodies = vec![
        Body {
            radius: 0.5,
            orbit_radius: 4.0,
            speed: 0.9,
            tilt: 0.1,
            color: Color::CYAN,
        },
        Body {
            radius: 0.8,
            orbit_radius: 7.0,
            speed: 0.5,
            tilt: -0.3,
            color: Color::ORANGE,
        },
        Body {
            radius: 0.3,
            orbit_radius: 9.5,
            speed: 1.4,
            tilt: 0.6,
            color: Color::MAGENTA,
        },
    ];

    let mut app = etch::default();

    app.set_draw(move |gizmos, t| {
        // Sun.
        gizmos.set_color(Color::YELLOW);
        gizmos.sphere(Vector3::zero(), 1.5)?;
        gizmos.wire_sphere(Vector3::zero(), 2.0)?;

        for body in &bodies {
            // Orbit path as a segment loop.
            gizmos.set_color(Color::GRAY);
            let step = std::f32::consts::TAU / ORBIT_SEGMENTS as f32;
            for i in 0..ORBIT_SEGMENTS {
                let from = orbit_point(body, i as f32 * step);
                let to = orbit_point(body, (i + 1) as f32 * step);
                gizmos.line(from, to)?;
            }

            let position = orbit_point(body, t * body.speed);
            gizmos.set_color(body.color);
            gizmos.sphere(position, body.radius)?;
            gizmos.wire_sphere(position, body.radius * 1.6)?;

            // Radius line from the sun.
            gizmos.line(Vector3::zero(), position)?;
        }

        Ok(())
    });

    app.set_ui(|ui, statistics| {
        gizmo_stats_panel(ui, statistics);
    });

    app.run();
}
