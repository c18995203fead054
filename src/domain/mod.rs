pub mod food;
pub mod order;
pub mod user;

pub use food::*;
pub use order::*;
pub use user::*;
