use std::rc::Rc;

use crate::constants::*;
use crate::core::Positionable;
use crate::direction::Direction;
use crate::geometry::{Position, ProportionalBoundingBox, Size};
use crate::scene::frame::Frame;
use crate::scene::widget::{Widget, WidgetKind};

/// A four-way intersection laid out on a 3x3 grid inside one frame: a
/// vertical road down the middle column, a horizontal road across the
/// middle row, a junction in the center cell and one traffic light per arm.
pub struct Intersection {
    pub frame: Rc<Frame>,
    pub vertical_road: Rc<Widget>,
    pub horizontal_road: Rc<Widget>,
    pub junction: Rc<Widget>,
    pub lights: Vec<(Direction, Rc<Widget>)>,
}

impl Intersection {
    pub fn new() -> Self {
        let frame = Frame::new("primary", Size::new(FRAME_SIZE, FRAME_SIZE), FRAME_BORDER_WIDTH);

        let vertical_road = Widget::new(
            "vertical road",
            WidgetKind::Road,
            Self::cell_origin(0, 1),
            Size::new(ROAD_WIDTH, FRAME_SIZE),
        );
        let horizontal_road = Widget::new(
            "horizontal road",
            WidgetKind::Road,
            Self::cell_origin(1, 0),
            Size::new(FRAME_SIZE, ROAD_WIDTH),
        );
        // full active area, so a vehicle's own active area decides the overlap
        let junction = Widget::with_active_area(
            "junction",
            WidgetKind::Junction,
            Self::cell_origin(1, 1),
            Size::new(CELL_SIZE, CELL_SIZE),
            ProportionalBoundingBox::full(),
        );

        for widget in [&vertical_road, &horizontal_road, &junction] {
            Frame::attach(&frame, widget);
        }

        let lights = Direction::ALL
            .iter()
            .map(|direction| {
                let (row, column) = direction.grid_cell();
                let cell = Self::cell_origin(row, column);
                let light = Widget::new(
                    format!("{direction} light"),
                    WidgetKind::TrafficLight,
                    cell.offset(
                        (CELL_SIZE - TRAFFIC_LIGHT_WIDTH) / 2.0,
                        (CELL_SIZE - TRAFFIC_LIGHT_HEIGHT) / 2.0,
                    ),
                    Size::new(TRAFFIC_LIGHT_WIDTH, TRAFFIC_LIGHT_HEIGHT),
                );
                Frame::attach(&frame, &light);
                (*direction, light)
            })
            .collect();

        Intersection {
            frame,
            vertical_road,
            horizontal_road,
            junction,
            lights,
        }
    }

    pub fn light(&self, direction: Direction) -> Option<&Rc<Widget>> {
        self.lights
            .iter()
            .find(|(light_direction, _)| *light_direction == direction)
            .map(|(_, light)| light)
    }

    /// Places a vehicle at the outer end of the `approach` arm, centered in
    /// the road, and adds it to the frame.
    pub fn spawn_vehicle(&self, approach: Direction, active_area: ProportionalBoundingBox) -> Rc<Widget> {
        let lane = (ROAD_WIDTH - VEHICLE_SIZE) / 2.0;
        let far_edge = FRAME_SIZE - VEHICLE_SIZE;
        let inner = match approach {
            Direction::North => Position::new(CELL_SIZE + lane, 0.0),
            Direction::South => Position::new(CELL_SIZE + lane, far_edge),
            Direction::West => Position::new(0.0, CELL_SIZE + lane),
            Direction::East => Position::new(far_edge, CELL_SIZE + lane),
        };

        let vehicle = Widget::with_active_area(
            format!("vehicle from {approach}"),
            WidgetKind::Vehicle,
            inner.offset(FRAME_BORDER_WIDTH, FRAME_BORDER_WIDTH),
            Size::new(VEHICLE_SIZE, VEHICLE_SIZE),
            active_area,
        );
        Frame::attach(&self.frame, &vehicle);
        vehicle
    }

    /// Whether a point in frame coordinates lies strictly inside the junction.
    pub fn is_point_in_junction(&self, point: Position) -> bool {
        let (top_left, bottom_right) = self.junction.corners();
        point.x > top_left.x && point.x < bottom_right.x && point.y > top_left.y && point.y < bottom_right.y
    }

    // outer-edge offset of a grid cell's top-left corner
    fn cell_origin(row: usize, column: usize) -> Position {
        Position::new(
            FRAME_BORDER_WIDTH + column as f64 * CELL_SIZE,
            FRAME_BORDER_WIDTH + row as f64 * CELL_SIZE,
        )
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::new()
    }
}
