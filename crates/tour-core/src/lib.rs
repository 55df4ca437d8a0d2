pub mod camera;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod interest;
pub mod look;
pub mod motion;
pub mod navigation;
pub mod path;
pub mod persistence;
pub mod stops;
pub mod transition;

pub use camera::*;
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use interest::*;
pub use look::*;
pub use motion::*;
pub use navigation::*;
pub use path::*;
pub use persistence::*;
pub use stops::*;
pub use transition::*;
