pub mod animation;
pub mod assets;
pub mod camera;
pub mod constants;
pub mod error;
pub mod experience;
pub mod geometry;
pub mod gesture;
pub mod hand;
pub mod interaction;
pub mod intro;
pub mod layer;
pub mod pointer;
pub mod scene;
pub mod tree;

pub use animation::*;
pub use assets::*;
pub use camera::*;
pub use constants::*;
pub use error::{Error, Result};
pub use experience::*;
pub use geometry::*;
pub use gesture::*;
pub use hand::*;
pub use interaction::*;
pub use intro::*;
pub use layer::*;
pub use pointer::*;
pub use scene::*;
pub use tree::*;
