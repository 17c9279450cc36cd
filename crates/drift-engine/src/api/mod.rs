pub mod display;
pub mod scene;
