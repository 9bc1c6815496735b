pub mod controls;
pub mod legend;
pub mod supply_map;
