use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use domain_cluster::service::MetricsQueryService;
use serde::Deserialize;
use tracing::trace;
use typed_builder::TypedBuilder;
use url::Url;

/// Instant queries against the Prometheus http api.
#[derive(TypedBuilder)]
pub struct PrometheusMetricsService {
    http_client: reqwest::Client,
    #[builder(setter(transform = |url: Url| with_trailing_slash(url)))]
    base_url: Url,
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[derive(Deserialize, Debug)]
struct QueryResponse {
    status: String,
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct QueryData {
    #[serde(default)]
    result: Vec<Sample>,
}

#[derive(Deserialize, Debug)]
struct Sample {
    /// `[unix seconds, "value"]`
    value: (f64, String),
}

fn first_sample(response: QueryResponse) -> anyhow::Result<Option<f64>> {
    if response.status != "success" {
        bail!(
            "prometheus query failed: {}",
            response.error.unwrap_or(response.status)
        );
    }
    let Some(sample) = response.data.and_then(|data| data.result.into_iter().next()) else {
        return Ok(None);
    };
    let value = sample
        .value
        .1
        .parse::<f64>()
        .with_context(|| format!("malformed sample value {}", sample.value.1))?;
    Ok(value.is_finite().then_some(value))
}

#[async_trait]
impl MetricsQueryService for PrometheusMetricsService {
    async fn query(&self, query: &str) -> anyhow::Result<Option<f64>> {
        let url = self.base_url.join("api/v1/query")?;
        trace!(%query, "Querying prometheus");
        let response = self
            .http_client
            .get(url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| anyhow!("prometheus is unreachable: {e}"))?
            .json::<QueryResponse>()
            .await?;
        first_sample(response)
    }
}
