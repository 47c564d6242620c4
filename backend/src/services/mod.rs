//! Business logic services for the Mang Iyan backend

pub mod auth;
pub mod ingredient;
pub mod ledger;
pub mod product;
pub mod production;
pub mod recipe;
pub mod reporting;
pub mod sales;
pub mod settings;
pub mod user;

pub use auth::AuthService;
pub use ingredient::IngredientService;
pub use ledger::LedgerService;
pub use product::ProductService;
pub use production::ProductionService;
pub use recipe::RecipeService;
pub use reporting::ReportingService;
pub use sales::SalesService;
pub use settings::SettingsService;
pub use user::UserService;
