use std::sync::Arc;

use reqwest::Client;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::{
    config::config::{AppConfig, CONFIG},
    dataset::{client::DatasetClient, models::Dataset},
    quiz::{generator::QuizGenerator, store::SessionStore},
    server::error::ServerError,
};

pub struct AppState {
    pool: Pool<Postgres>,
    dataset: Dataset,
    sessions: SessionStore,
}

impl AppState {
    /// Connects, migrates and fetches the dataset. Fails if any step fails,
    /// there is no partial startup.
    pub async fn from_config(config: &AppConfig) -> Result<Arc<Self>, ServerError> {
        let pool = Pool::<Postgres>::connect(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrated");

        let client = Client::new();
        let dataset = DatasetClient::new(
            config.dataset.source,
            &config.dataset.user_agent,
            &config.dataset.disfavored_method,
        )
        .fetch(&client)
        .await?;

        Ok(Self::new(pool, dataset))
    }

    pub fn new(pool: Pool<Postgres>, dataset: Dataset) -> Arc<Self> {
        Arc::new(Self {
            pool,
            dataset,
            sessions: SessionStore::new(),
        })
    }

    pub fn get_pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub fn get_dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn get_sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn quiz_generator(&self) -> QuizGenerator<'_> {
        QuizGenerator::new(&self.dataset, CONFIG.quiz.max_draws)
    }
}
