pub mod character;
pub mod loader;
pub mod roster;
#[doc(hidden)]
pub mod synthetic;
pub mod validate;
