use std::time::Duration;

use anyhow::{Context, Result};
use image::DynamicImage;

/// Some image hosts reject requests with a default library User-Agent.
const USER_AGENT: &str = "pipelens/0.1";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a remote image and decodes it.
///
/// Failures (unreachable URL, non-success status, body that is not a
/// decodable image) come back as errors with context; the interactive
/// client reports them as a single top-level message and keeps running.
pub async fn fetch_image(url: &str) -> Result<DynamicImage> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch image from {url}"))?
        .error_for_status()
        .with_context(|| format!("image host returned an error status for {url}"))?;

    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("failed to read image bytes from {url}"))?;

    image::load_from_memory(&bytes).with_context(|| format!("failed to decode image from {url}"))
}
