use crate::config::Config;
use crate::server::AppState;
use crate::utils::current_year;
use askama_axum::Template;
use axum::extract::State;
use std::sync::Arc;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub config: Config,
    pub year: i32,
    /// UI settings handed to the client-side layer via a data attribute
    pub ui_settings_json: String,
}

impl IndexTemplate {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let ui_settings_json = serde_json::to_string(&config.ui).unwrap_or_else(|e| {
            tracing::error!("Failed to serialise UI settings: {e}");
            "{}".to_string()
        });
        Self {
            config,
            year: current_year(),
            ui_settings_json,
        }
    }
}

pub async fn generate_index(State(state): State<Arc<AppState>>) -> IndexTemplate {
    tracing::debug!("Generating index template");
    let template = IndexTemplate::new(state.config.clone());

    tracing::info!(
        "Index template generated with {} projects",
        template.config.projects.len()
    );
    template
}
