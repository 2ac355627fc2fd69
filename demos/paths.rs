//! Waypoint path visualization.
//!
//! A seeded random walk generates a fixed set of waypoints; every frame draws
//! the path as lines, marks each waypoint with a wire cube, and animates a
//! solid sphere walking the path. Geometry is identical frame to frame, so
//! this is the steady-state case: every draw call reuses a pooled handle, and
//! mesh handles redrawn with the same color skip their vertex uploads
//! entirely (lines rewrite their two endpoints in place).

use etch::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn generate_waypoints(count: usize, seed: u64) -> Vec<Vector3<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut waypoints = Vec::with_capacity(count);
    let mut position = Vector3::new(0.0, 0.0, 0.0);

    for _ in 0..count {
        waypoints.push(position);
        position += Vector3::new(
            rng.random_range(-3.0..3.0),
            rng.random_range(-0.8..1.2),
            rng.random_range(-3.0..3.0),
        );
    }

    waypoints
}

/// Position along the polyline at `distance` from its start.
fn point_along(waypoints: &[Vector3<f32>], mut distance: f32) -> Vector3<f32> {
    for pair in waypoints.windows(2) {
        let segment = pair[1] - pair[0];
        let length = segment.magnitude();
        if distance <= length {
            return pair[0] + segment * (distance / length);
        }
        distance -= length;
    }
    *waypoints.last().unwrap()
}

fn path_length(waypoints: &[Vector3<f32>]) -> f32 {
    waypoints
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).magnitude())
        .sum()
}

fn main() {
    env_logger::init();

    let waypoints = generate_waypoints(24, 7);
    let total_length = path_length(&waypoints);

    let mut app = etch::default();

    app.set_draw(move |gizmos, t| {
        gizmos.set_color(Color::GREEN);
        for pair in waypoints.windows(2) {
            gizmos.line(pair[0], pair[1])?;
        }

        gizmos.set_color(Color::WHITE);
        for waypoint in &waypoints {
            gizmos.wire_cube(*waypoint, Vector3::new(0.6, 0.6, 0.6))?;
        }

        // Endpoints stand out.
        gizmos.set_color(Color::BLUE);
        gizmos.cube(waypoints[0], Vector3::new(0.8, 0.8, 0.8))?;
        gizmos.set_color(Color::RED);
        gizmos.cube(*waypoints.last().unwrap(), Vector3::new(0.8, 0.8, 0.8))?;

        // Walker loops along the path.
        let distance = (t * 4.0) % total_length;
        let walker = point_along(&waypoints, distance);
        gizmos.set_color(Color::YELLOW);
        gizmos.sphere(walker, 0.4)?;
        gizmos.wire_sphere(walker, 0.7)?;

        Ok(())
    });

    app.set_ui(|ui, statistics| {
        gizmo_stats_panel(ui, statistics);
    });

    app.run();
}
