pub mod cart;
pub mod class;
pub mod course;
pub mod user;

pub use cart::*;
pub use class::*;
pub use course::*;
pub use user::*;
