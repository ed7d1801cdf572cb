pub mod build;
pub mod decrypt;
pub mod encrypt;
pub mod info;
pub mod menu;

pub use build::*;
pub use decrypt::*;
pub use encrypt::*;
pub use info::*;
pub use menu::*;
