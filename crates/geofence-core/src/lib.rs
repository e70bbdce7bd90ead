pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod geo;
pub mod projection;
pub mod region;
pub mod selector;

pub use config::*;
pub use constants::*;
pub use drag::*;
pub use error::*;
pub use geo::*;
pub use projection::*;
pub use region::*;
pub use selector::*;
