// MODEL: scene state and simple kinematics
pub mod camera;
pub mod orbit;
pub mod actors;
pub mod map;

pub use camera::Camera;
pub use orbit::OrbitBody;
pub use actors::{Car, Player};
pub use map::MapModel;
