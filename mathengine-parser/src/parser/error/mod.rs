pub mod kind;

pub use mathengine_error::Error;
