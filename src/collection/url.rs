use super::{UrlField, UrlParts};

/// Resolves the polymorphic URL field into a request URL string.
///
/// Total and pure: an absent or unresolvable field yields an empty
/// string, never an error. A structured URL prefers its non-empty `raw`
/// form verbatim; otherwise the URL is synthesized from its parts.
#[must_use]
pub fn resolve_url(url: Option<&UrlField>) -> String {
    match url {
        None => String::new(),
        Some(UrlField::Plain(plain)) => plain.clone(),
        Some(UrlField::Structured(parts)) => {
            if let Some(raw) = parts.raw.as_deref() {
                if !raw.is_empty() {
                    return raw.to_owned();
                }
            }
            build_url(parts)
        }
    }
}

// Query pairs are parsed into the model but never re-appended here; a
// fully-formed URL is expected to arrive through `raw`.
fn build_url(parts: &UrlParts) -> String {
    let mut url = String::new();

    if let Some(protocol) = parts.protocol.as_deref() {
        url.push_str(protocol);
        url.push_str("://");
    }

    url.push_str(&parts.host.join("."));

    if let Some(port) = parts.port.as_deref() {
        if !port.is_empty() {
            url.push(':');
            url.push_str(port);
        }
    }

    for segment in &parts.path {
        url.push('/');
        url.push_str(segment);
    }

    url
}
