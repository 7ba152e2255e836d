use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use traffic_light_sim::core::collider::same_entity;
use traffic_light_sim::core::{ColliderExt, ColliderRef, Positionable};
use traffic_light_sim::direction::Direction;
use traffic_light_sim::geometry::{IntervalMath, Position, ProportionalBoundingBox, Size, Span};
use traffic_light_sim::scene::{Frame, Intersection, Widget, WidgetKind};
use traffic_light_sim::CollisionError;

fn attached(frame: &Rc<Frame>, name: &str, x: f64, y: f64, width: f64, height: f64) -> Rc<Widget> {
    let widget = Widget::new(name, WidgetKind::Vehicle, Position::new(x, y), Size::new(width, height));
    Frame::attach(frame, &widget);
    widget
}

fn names(colliders: &[ColliderRef]) -> Vec<String> {
    colliders.iter().map(|collider| format!("{collider:?}")).collect()
}

#[test]
fn collisions_default_to_siblings_in_insertion_order() {
    let frame = Frame::new("frame", Size::new(100.0, 100.0), 0.0);
    let a = attached(&frame, "a", 0.0, 0.0, 10.0, 10.0);
    let far = attached(&frame, "far", 50.0, 50.0, 10.0, 10.0);
    let c = attached(&frame, "c", 5.0, 5.0, 10.0, 10.0);
    let d = attached(&frame, "d", 0.0, 0.0, 3.0, 3.0);

    let a_ref: ColliderRef = a;
    let collisions = a_ref.collisions(None);
    assert_eq!(collisions.len(), 2);

    let others: Vec<ColliderRef> = collisions.iter().filter_map(|collision| collision.other()).collect();
    let (c_ref, d_ref, far_ref): (ColliderRef, ColliderRef, ColliderRef) = (c, d, far);
    assert!(same_entity(&others[0], &c_ref));
    assert!(same_entity(&others[1], &d_ref));
    assert!(!others.iter().any(|other| same_entity(other, &far_ref)));
    assert!(!others.iter().any(|other| same_entity(other, &a_ref)));

    let objects = a_ref.colliding_objects(None);
    assert_eq!(names(&objects), names(&others));
}

#[test]
fn explicit_candidates_skip_self_and_keep_order() {
    let a: ColliderRef = Widget::new("a", WidgetKind::Vehicle, Position::new(0.0, 0.0), Size::new(10.0, 10.0));
    let b: ColliderRef = Widget::new("b", WidgetKind::Road, Position::new(8.0, 0.0), Size::new(10.0, 10.0));
    let c: ColliderRef = Widget::new("c", WidgetKind::Road, Position::new(0.0, 8.0), Size::new(10.0, 10.0));

    let candidates = vec![c.clone(), a.clone(), b.clone()];
    let objects = a.colliding_objects(Some(candidates.as_slice()));
    assert_eq!(objects.len(), 2);
    assert!(same_entity(&objects[0], &c));
    assert!(same_entity(&objects[1], &b));
}

#[test]
fn no_candidates_yield_no_collisions() {
    let loner: ColliderRef = Widget::new("loner", WidgetKind::Vehicle, Position::default(), Size::new(5.0, 5.0));
    assert!(loner.collisions(None).is_empty());
    assert!(loner.colliding_objects(Some(Vec::new().as_slice())).is_empty());
}

#[test]
fn non_collider_entities_are_rejected() {
    let frame = Frame::new("frame", Size::new(100.0, 100.0), 0.0);
    let a: ColliderRef = attached(&frame, "a", 0.0, 0.0, 10.0, 10.0);
    let b = attached(&frame, "b", 5.0, 5.0, 10.0, 10.0);

    let host: Rc<dyn Positionable> = frame.clone();
    assert!(matches!(a.try_collision_with(host), Err(CollisionError::Type(_))));

    let widget: Rc<dyn Positionable> = b;
    let collision = a.try_collision_with(widget).unwrap();
    assert!(collision.has_overlap());
}

#[test]
fn frames_only_offer_collider_children_as_siblings() {
    let outer = Frame::new("outer", Size::new(100.0, 100.0), 0.0);
    let inner = Frame::new("inner", Size::new(50.0, 50.0), 0.0);
    outer.add_child(inner);
    let a = attached(&outer, "a", 0.0, 0.0, 10.0, 10.0);

    assert_eq!(outer.children().len(), 2);
    assert_eq!(outer.colliders().len(), 1);
    assert!(same_entity(&outer.colliders()[0], &(a as ColliderRef)));
}

#[test]
fn positions_are_reported_inside_the_parent_border() {
    let frame = Frame::new("frame", Size::new(100.0, 100.0), 2.0);
    let widget = attached(&frame, "w", 12.0, 7.0, 10.0, 10.0);

    assert_eq!(widget.position(), Position::new(10.0, 5.0));
    assert_eq!(widget.offset(), Position::new(12.0, 7.0));
    assert_eq!(
        widget.corners(),
        (Position::new(10.0, 5.0), Position::new(20.0, 15.0))
    );
}

#[test]
fn intersection_layout_places_roads_lights_and_vehicle() {
    let intersection = Intersection::new();
    assert_eq!(intersection.lights.len(), 4);
    assert!(intersection.light(Direction::East).is_some());

    let vertical: ColliderRef = intersection.vertical_road.clone();
    let horizontal: ColliderRef = intersection.horizontal_road.clone();
    let junction: ColliderRef = intersection.junction.clone();

    let vehicle = intersection.spawn_vehicle(Direction::North, ProportionalBoundingBox::full());
    assert_eq!(vehicle.parent().map(|frame| frame.name().to_string()), Some("primary".to_string()));
    let vehicle_ref: ColliderRef = vehicle.clone();

    // the north light stands in the top cell of the vertical road
    let north_light: ColliderRef = intersection.light(Direction::North).unwrap().clone();
    let touching = vehicle_ref.colliding_objects(None);
    assert_eq!(touching.len(), 2);
    assert!(same_entity(&touching[0], &vertical));
    assert!(same_entity(&touching[1], &north_light));

    let live = vehicle_ref.collision_with(&junction);
    assert!(live.is_partial());
    live.subscribe().unwrap();
    assert!(!live.has_overlap());

    while !live.has_overlap() {
        vehicle.move_in_direction(&Direction::South, 10.0);
    }
    let objects = vehicle_ref.colliding_objects(None);
    assert!(objects.iter().any(|object| same_entity(object, &junction)));
    assert!(objects.iter().any(|object| same_entity(object, &horizontal)));

    let center = intersection.junction.position().offset(10.0, 10.0);
    assert!(intersection.is_point_in_junction(center));
    assert!(!intersection.is_point_in_junction(Position::new(0.0, 0.0)));
}

fn reversed(span: Span<i32>) -> Span<i32> {
    Span::new(span.stop, span.start)
}

#[test]
fn overlap_is_symmetric_and_order_invariant() {
    let mut rng = StdRng::seed_from_u64(0x7aff1c);

    for _ in 0..1000 {
        let a = Span::new(rng.gen_range(-50..50), rng.gen_range(-50..50));
        let b = Span::new(rng.gen_range(-50..50), rng.gen_range(-50..50));

        let forward = IntervalMath::overlap(a, b);
        assert_eq!(forward, IntervalMath::overlap(b, a), "{a:?} {b:?}");
        assert_eq!(forward, IntervalMath::overlap(reversed(a), b), "{a:?} {b:?}");
        assert_eq!(forward, IntervalMath::overlap(a, reversed(b)), "{a:?} {b:?}");

        if let Some(shared) = forward {
            assert!(shared.start <= shared.stop);
            let a = a.normalized();
            let b = b.normalized();
            assert!(shared.start >= a.start && shared.stop <= a.stop);
            assert!(shared.start >= b.start && shared.stop <= b.stop);
        }
    }
}
