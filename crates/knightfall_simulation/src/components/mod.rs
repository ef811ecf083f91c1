pub mod actor;
pub mod kinematics;

pub use actor::*;
pub use kinematics::*;
