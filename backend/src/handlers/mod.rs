//! HTTP handlers for the Mang Iyan backend

pub mod auth;
pub mod health;
pub mod ingredient;
pub mod ledger;
pub mod product;
pub mod production;
pub mod recipe;
pub mod reporting;
pub mod sales;
pub mod settings;
pub mod user;

pub use auth::*;
pub use health::*;
pub use ingredient::*;
pub use ledger::*;
pub use product::*;
pub use production::*;
pub use recipe::*;
pub use reporting::*;
pub use sales::*;
pub use settings::*;
pub use user::*;
