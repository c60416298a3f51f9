pub mod item;
pub mod cart;

pub use item::*;
pub use cart::*;
