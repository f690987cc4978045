mod controls;
mod keyboard;

pub use controls::{wire_vehicle_buttons, ControlPanel};
pub use keyboard::wire_drive_keys;
