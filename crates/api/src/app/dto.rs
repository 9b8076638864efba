use serde::{Deserialize, Serialize};

use expiry_ai::RecipeItems;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub items: Option<RecipeItems>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RecipeReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct PantryRecipes {
    pub items: Vec<String>,
    pub reply: String,
}
