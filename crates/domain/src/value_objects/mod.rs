//! Value objects - immutable data carried by turns and model replies

pub mod scene_image;
pub mod turn_result;

pub use scene_image::SceneImage;
pub use turn_result::TurnResult;
