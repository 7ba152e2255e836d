// Proportional bounds covering an owner's whole area.
pub const DEFAULT_ACTIVE_START: f64 = 0.0;
pub const DEFAULT_ACTIVE_END: f64 = 1.0;

pub const FRAME_SIZE: f64 = 400.0;
pub const FRAME_BORDER_WIDTH: f64 = 2.0;
// one grid cell of the 3x3 intersection layout
pub const CELL_SIZE: f64 = FRAME_SIZE / 3.0;
pub const ROAD_WIDTH: f64 = CELL_SIZE;
pub const LAMP_SIZE: f64 = 25.0;
pub const TRAFFIC_LIGHT_WIDTH: f64 = LAMP_SIZE + 3.0;
pub const TRAFFIC_LIGHT_HEIGHT: f64 = (LAMP_SIZE + 3.0) * 3.0;

pub const VEHICLE_SIZE: f64 = 50.0;
pub const VEHICLE_STEP: f64 = 10.0;
