mod component;
mod projection;
mod render;
mod scene;
mod state;
mod tiles;

pub use component::SupplyMap;
