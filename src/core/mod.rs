pub mod config;
pub mod errors;
pub mod http;
pub mod models;

pub use config::ApiConfig;
pub use errors::{
    ApiError,
    ShakeItError,
};
pub use models::{
    Drink,
    IngredientRow,
    Instructions,
};
