mod config;
mod document;
mod status;
mod target;
mod tree;

pub use self::config::*;
pub use self::document::*;
pub use self::status::*;
pub use self::target::*;
pub use self::tree::*;
