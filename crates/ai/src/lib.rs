//! `expiry-ai`
//!
//! **Responsibility:** recipe suggestion boundary (remote language model).
//!
//! This crate is intentionally **not** part of the domain model:
//! - It only sees a list of product names, never the pantry itself.
//! - It must not mutate inventory state.
//! - Each call is a single attempt; callers substitute [`RECIPE_FALLBACK`]
//!   on any failure via [`suggest_or_fallback`].

pub mod chat;
pub mod error;
pub mod items;
pub mod proxy;
pub mod suggester;

pub use chat::{ChatCompletionClient, ChatConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::RecipeError;
pub use items::RecipeItems;
pub use proxy::RecipeProxyClient;
pub use suggester::{RECIPE_FALLBACK, RecipeSuggester, recipe_prompt, suggest_or_fallback};
