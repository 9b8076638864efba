use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use expiry_ai::{ChatCompletionClient, ChatConfig, RecipeProxyClient, RecipeSuggester};
use expiry_infra::{PantrySession, ProductStore, SqliteKeyValueStore};

use crate::config::ApiConfig;

pub type Session = PantrySession<SqliteKeyValueStore>;

/// Everything the handlers need, shared behind an `Arc`.
pub struct AppServices {
    /// Single logical writer: every pantry handler goes through this lock.
    session: Mutex<Session>,
    /// Upstream model used by the `/api/ai` proxy (absent without an API key).
    chat: Option<ChatCompletionClient>,
    /// What `/products/recipes` asks (proxy client or the upstream model).
    recipes: Option<Arc<dyn RecipeSuggester>>,
}

pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let kv = SqliteKeyValueStore::connect(&config.database_url).await?;
    let session = PantrySession::open(ProductStore::new(kv), today()).await;

    let chat = match &config.groq_api_key {
        Some(key) => Some(ChatCompletionClient::new(
            ChatConfig::new(key.clone())
                .with_base_url(config.groq_base_url.clone())
                .with_model(config.groq_model.clone()),
        )?),
        None => None,
    };

    let recipes: Option<Arc<dyn RecipeSuggester>> = match (&config.recipe_proxy_url, &chat) {
        (Some(url), _) => {
            tracing::info!(url = %url, "pantry recipes via proxy");
            Some(Arc::new(RecipeProxyClient::new(url.clone())?))
        }
        (None, Some(chat)) => {
            tracing::info!(model = chat.model(), "pantry recipes via chat completion");
            Some(Arc::new(chat.clone()))
        }
        (None, None) => None,
    };

    Ok(AppServices {
        session: Mutex::new(session),
        chat,
        recipes,
    })
}

impl AppServices {
    pub fn session(&self) -> &Mutex<Session> {
        &self.session
    }

    pub fn chat(&self) -> Option<&ChatCompletionClient> {
        self.chat.as_ref()
    }

    pub fn recipes(&self) -> Option<Arc<dyn RecipeSuggester>> {
        self.recipes.clone()
    }
}

/// The local calendar date, sampled once per request.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
