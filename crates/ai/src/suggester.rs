use async_trait::async_trait;

use crate::error::RecipeError;

/// Shown to the user whenever the recipe service cannot be reached or answers garbage.
pub const RECIPE_FALLBACK: &str = "⚠️ AI service not available.";

/// Something that turns a list of item names into free-text recipe ideas.
#[async_trait]
pub trait RecipeSuggester: Send + Sync {
    async fn suggest(&self, items: &[String]) -> Result<String, RecipeError>;
}

pub fn recipe_prompt(items: &[String]) -> String {
    format!("Suggest recipes using these items: {}", items.join(", "))
}

/// One attempt; any failure is logged and replaced by [`RECIPE_FALLBACK`].
pub async fn suggest_or_fallback<S>(suggester: &S, items: &[String]) -> String
where
    S: RecipeSuggester + ?Sized,
{
    match suggester.suggest(items).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(error = %err, items = items.len(), "recipe suggestion failed; using fallback");
            RECIPE_FALLBACK.to_string()
        }
    }
}
