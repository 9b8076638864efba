use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("no items to suggest recipes for")]
    EmptyItems,

    #[error("missing API key for recipe service")]
    MissingApiKey,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("recipe service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}
