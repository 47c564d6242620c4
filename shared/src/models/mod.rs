//! Domain models for the Mang Iyan inventory and point-of-sale system

mod ingredient;
mod product;
mod production;
mod sales;
mod user;

pub use ingredient::*;
pub use product::*;
pub use production::*;
pub use sales::*;
pub use user::*;
