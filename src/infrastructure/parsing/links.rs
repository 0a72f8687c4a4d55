//! Relative link resolution against the site's base URL

use tracing::debug;
use url::Url;

/// Resolve `href` against `base`. Empty or unresolvable hrefs give `None`.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!("Could not resolve link '{}' against {}: {}", href, base, e);
            None
        }
    }
}
