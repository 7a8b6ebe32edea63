//! Building the engine's collaborators from configuration.

use crate::config::{Config, EmbeddingProvider};
use crate::error::Result;
use chrono::NaiveDate;
use std::time::Duration;
use trendscope_domain::traits::SearchInterestProvider;
use trendscope_embed::{
    CachedEmbeddingModel, EmbeddingModel, HashingEmbeddingModel, OllamaEmbeddingModel,
};
use trendscope_interest::{
    HttpInterestProvider, HttpInterestSettings, InterestError, StaticInterestProvider,
};

/// Embedding model chosen at runtime
pub type DynEmbedder = Box<dyn EmbeddingModel>;

/// Search-interest provider chosen at runtime
pub enum InterestBackend {
    /// Remote time-series service
    Http(HttpInterestProvider),
    /// Fixed neutral answer, used when no service is configured
    Static(StaticInterestProvider),
}

impl SearchInterestProvider for InterestBackend {
    type Error = InterestError;

    fn mean_interest(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::result::Result<f64, Self::Error> {
        match self {
            InterestBackend::Http(provider) => provider.mean_interest(keywords, start, end),
            InterestBackend::Static(provider) => provider.mean_interest(keywords, start, end),
        }
    }
}

/// Build the configured embedding model.
pub fn build_embedder(config: &Config) -> Result<DynEmbedder> {
    let settings = &config.embedding;
    if settings.dimension == 0 {
        return Err(crate::CliError::Config(
            "embedding.dimension must be greater than 0".to_string(),
        ));
    }

    let model: DynEmbedder = match settings.provider {
        EmbeddingProvider::Hashing => Box::new(HashingEmbeddingModel::new(settings.dimension)),
        EmbeddingProvider::Ollama => Box::new(OllamaEmbeddingModel::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            settings.dimension,
        )?),
    };

    tracing::debug!(
        provider = ?settings.provider,
        dimension = settings.dimension,
        cache = settings.cache,
        "Embedding model ready"
    );

    if settings.cache {
        Ok(Box::new(CachedEmbeddingModel::new(model)))
    } else {
        Ok(model)
    }
}

/// Build the configured search-interest provider.
pub fn build_interest(config: &Config) -> Result<InterestBackend> {
    let settings = &config.interest;
    let Some(endpoint) = &settings.endpoint else {
        tracing::info!("No search-interest endpoint configured, using neutral interest");
        return Ok(InterestBackend::Static(StaticInterestProvider::neutral()));
    };

    let provider = HttpInterestProvider::new(HttpInterestSettings {
        endpoint: endpoint.clone(),
        geo: settings.geo.clone(),
        property: settings.property.clone(),
        connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
        timeout: Duration::from_secs(settings.timeout_secs),
        max_retries: settings.max_retries.max(1),
    })?;
    Ok(InterestBackend::Http(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_embedder_is_hashing() {
        let embedder = build_embedder(&Config::default()).unwrap();
        assert_eq!(embedder.dimension(), 512);
        assert_eq!(embedder.embed("Storm").unwrap().len(), 512);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut config = Config::default();
        config.embedding.dimension = 0;
        assert!(build_embedder(&config).is_err());
    }

    #[test]
    fn test_no_endpoint_gives_static() {
        let backend = build_interest(&Config::default()).unwrap();
        assert!(matches!(backend, InterestBackend::Static(_)));

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let value = backend.mean_interest(&["storm".to_string()], day, day).unwrap();
        assert_eq!(value, 50.0);
    }

    #[test]
    fn test_endpoint_gives_http() {
        let mut config = Config::default();
        config.interest.endpoint = Some("http://localhost:8700/interest".to_string());
        let backend = build_interest(&config).unwrap();
        assert!(matches!(backend, InterestBackend::Http(_)));
    }
}
