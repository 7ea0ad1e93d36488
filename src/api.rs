use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Result, TourneyError};

/// Fetch a URL and parse the response body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
) -> Result<T> {
    let body = get_text(client, url, token).await?;
    parse_json(&body, url)
}

/// Fetch a JSON array, dropping elements that do not decode as `T`.
pub(crate) async fn get_json_records<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
) -> Result<Vec<T>> {
    let body = get_text(client, url, token).await?;
    parse_records(&body, url)
}

async fn get_text(client: &reqwest::Client, url: &str, token: Option<&str>) -> Result<String> {
    debug!(url, "fetching resource");

    let mut request = client.get(url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| TourneyError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TourneyError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| TourneyError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| TourneyError::Json {
        context: context.to_owned(),
        source: e,
    })
}

pub(crate) fn parse_records<T: DeserializeOwned>(body: &str, context: &str) -> Result<Vec<T>> {
    let values: Vec<serde_json::Value> = parse_json(body, context)?;
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(context, index = idx, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect())
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
