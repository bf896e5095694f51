//! Two transforms following a Catmull-Rom loop at 60 Hz.
//!
//! Run with: RUST_LOG=debug cargo run -p rhizome-waypath-tween --example tween_demo

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use rhizome_waypath_tween::path::{Ease, Path, PathConfig, PathwayType};
use rhizome_waypath_tween::{Transform, TweenConfig, TweenerRegistry};

const FRAME: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let waypoints = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(4.0, 1.0, 0.0),
        Vec3::new(8.0, 0.0, 4.0),
        Vec3::new(4.0, -1.0, 8.0),
        Vec3::new(0.0, 0.0, 4.0),
    ];
    let spline = PathConfig::default()
        .with_pathway(PathwayType::CatmullRomSpline)
        .with_subdivisions(16);

    let mut preview = match Path::from_points(waypoints, spline) {
        Ok(path) => path,
        Err(err) => {
            log::error!("could not build path: {err}");
            return;
        }
    };
    match preview.total_subdivided_length() {
        Ok(curve) => log::info!(
            "{} segments, polygon length {:.2}, curve length {curve:.2}",
            preview.segment_count(),
            preview.total_length()
        ),
        Err(err) => log::warn!("could not sample path: {err}"),
    }

    let drone = Rc::new(RefCell::new(Transform::default()));
    let courier = Rc::new(RefCell::new(Transform::default()));
    let mut registry = TweenerRegistry::new();

    let looping = TweenConfig::new(2.5)
        .with_looping(true)
        .with_update_forward(true)
        .with_path(spline);
    let one_shot = TweenConfig::new(3.0)
        .with_update_forward(true)
        .with_path(spline.with_ease(Ease::CubicInOut));

    let registered = registry
        .tween_points(&drone, waypoints, looping)
        .and_then(|_| registry.tween_points(&courier, waypoints, one_shot));
    let courier_id = match registered {
        Ok(id) => id,
        Err(err) => {
            log::error!("could not start tweens: {err}");
            return;
        }
    };
    if let Some(tweener) = registry.get_mut(courier_id) {
        tweener.set_on_complete(|| log::info!("courier arrived"));
    }

    for frame in 0..(5 * 60) {
        registry.tick(FRAME);
        if frame % 30 == 0 {
            let drone = drone.borrow();
            let courier = courier.borrow();
            log::info!(
                "t={:.2}s drone {:?} facing {:?}, courier {:?}",
                frame as f32 * FRAME,
                drone.position,
                drone.forward,
                courier.position
            );
        }
    }

    log::info!("{} tween(s) still running", registry.len());
    registry.remove_all();
}
