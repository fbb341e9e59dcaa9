pub mod definition;
pub mod error;
pub mod loader;
pub mod prelude;
pub mod template;
