use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use traffic_light_sim::constants::{FRAME_SIZE, VEHICLE_STEP};
use traffic_light_sim::core::collider::same_entity;
use traffic_light_sim::core::{ColliderExt, ColliderRef, Collision, Positionable};
use traffic_light_sim::direction::Direction;
use traffic_light_sim::geometry::ProportionalBoundingBox;
use traffic_light_sim::scene::Intersection;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // optional vehicle active area, "x_start,x_end,y_start,y_end"
    let active_area = match env::args().nth(1) {
        Some(arg) => arg.parse::<ProportionalBoundingBox>()?,
        None => ProportionalBoundingBox::full(),
    };

    let intersection = Intersection::new();
    let approach = Direction::North;
    let vehicle = intersection.spawn_vehicle(approach, active_area);
    let vehicle_ref: ColliderRef = vehicle.clone();
    info!(vehicle = ?vehicle, %active_area, "spawned vehicle");

    let collisions: Vec<Collision> = intersection
        .frame
        .colliders()
        .iter()
        .filter(|candidate| !same_entity(&vehicle_ref, candidate))
        .map(|candidate| vehicle_ref.collision_with(candidate))
        .collect();
    for collision in &collisions {
        collision.subscribe()?;
    }

    let heading = approach.opposite();
    let mut step = 0;
    while vehicle.position().y + vehicle.size().height < FRAME_SIZE {
        vehicle.move_in_direction(&heading, VEHICLE_STEP);
        step += 1;

        for collision in collisions.iter().filter(|collision| collision.has_overlap()) {
            if let Some(other) = collision.other() {
                let area = collision.geometry()?;
                info!(step, with = ?other, ?area, "overlap");
            }
        }

        let touching = vehicle_ref.colliding_objects(None);
        let size = vehicle.size();
        let center = vehicle.position().offset(size.width / 2.0, size.height / 2.0);
        info!(
            step,
            position = ?vehicle.position(),
            touching = touching.len(),
            in_junction = intersection.is_point_in_junction(center),
            "vehicle moved"
        );
    }

    let mut complete = 0;
    let total = collisions.len();
    for collision in collisions {
        if collision.teardown().is_complete() {
            complete += 1;
        }
    }
    info!(steps = step, complete, total, "drive finished; subscriptions removed");

    Ok(())
}
