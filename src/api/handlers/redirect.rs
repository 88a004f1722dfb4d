//! Handler for short link redirects.

use anyhow::{Context, anyhow, bail};
use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{HeaderValue, Method, Request, StatusCode},
    response::Redirect,
};
use tower::ServiceExt;
use tracing::{debug, warn};
use url::Url;

use crate::api::dto::lookup::LookupTarget;
use crate::state::RedirectState;

/// Base used to build the internal lookup URI with proper percent-encoding.
const LOOKUP_BASE: &str = "http://lookup.internal/api/get-url/";

/// Upper bound on a lookup response body.
const MAX_LOOKUP_BODY: usize = 64 * 1024;

/// Redirects a short path to its destination.
///
/// # Endpoint
///
/// `GET /r/{*path}`; the last path segment is taken as the slug.
///
/// # Request Flow
///
/// 1. Extract the trailing segment
/// 2. Call `GET /api/get-url/{slug}` in-process
/// 3. **200**: 307 redirect to the stored URL
/// 4. **404**: 307 redirect to the public origin
/// 5. Anything else: logged, then 307 redirect to the public origin
///
/// The handler never reads the store directly.
pub async fn redirect_handler(
    Path(path): Path<String>,
    State(state): State<RedirectState>,
) -> Redirect {
    let slug = path.rsplit('/').next().unwrap_or_default();

    match lookup_url(&state.lookup, slug).await {
        Ok(Some(url)) => {
            debug!(slug, url = %url, "Redirecting");
            Redirect::temporary(&url)
        }
        Ok(None) => {
            debug!(slug, "Unknown slug, redirecting to origin");
            Redirect::temporary(&state.public_origin)
        }
        Err(e) => {
            warn!(slug, "Lookup failed, redirecting to origin: {:#}", e);
            Redirect::temporary(&state.public_origin)
        }
    }
}

/// Resolves a slug through the lookup router.
///
/// Returns `Ok(None)` when the lookup answers 404.
async fn lookup_url(lookup: &Router, slug: &str) -> anyhow::Result<Option<String>> {
    let mut target = Url::parse(LOOKUP_BASE)?;
    target
        .path_segments_mut()
        .map_err(|_| anyhow!("lookup base cannot hold path segments"))?
        .pop_if_empty()
        .push(slug);

    let request = Request::builder()
        .method(Method::GET)
        .uri(target.path())
        .body(Body::empty())?;

    let response = lookup.clone().oneshot(request).await?;

    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => {
            let body = to_bytes(response.into_body(), MAX_LOOKUP_BODY)
                .await
                .context("failed to read lookup body")?;
            let target: LookupTarget =
                serde_json::from_slice(&body).context("malformed lookup body")?;
            let location = location_for(target.url)?;

            HeaderValue::from_str(&location).context("stored URL is not a valid header")?;

            Ok(Some(location))
        }
        status => bail!("lookup answered {}", status),
    }
}

/// Percent-encodes non-ASCII characters (and punycodes the host) so the
/// `Location` header is plain ASCII. ASCII URLs are passed through as stored.
fn location_for(url: String) -> anyhow::Result<String> {
    if url.is_ascii() {
        return Ok(url);
    }

    let parsed = Url::parse(&url).context("stored URL does not parse")?;
    Ok(parsed.into())
}
