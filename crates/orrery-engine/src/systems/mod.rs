pub mod orbit;
pub mod picking;
pub mod render;
