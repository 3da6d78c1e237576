/// Extract the canonical video id from whatever the user pasted into a slot.
///
/// Accepts a short link (`https://youtu.be/<id>`), a full link
/// (`https://www.youtube.com/watch?v=<id>`, `/embed/<id>`, `/live/<id>`),
/// or a bare 11-character token. Returns an empty string when nothing
/// matches — the slot then renders as an editable placeholder.
pub fn parse_stream_id(input: &str) -> String {
    let trimmed = input.trim();

    if let Some(url) = SplitUrl::parse(trimmed) {
        if url.host.contains("youtu.be") {
            return url.path.trim_start_matches('/').to_string();
        }
        if url.host.contains("youtube.com") {
            if let Some(v) = url.query_param("v") {
                return v.to_string();
            }
            // No ?v= — take the last path segment (covers /embed/<id>, /live/<id>)
            return url
                .path
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
        }
    }

    if is_bare_token(trimmed) {
        return trimmed.to_string();
    }
    String::new()
}

/// Video ids are exactly 11 characters from `[A-Za-z0-9_-]`.
fn is_bare_token(s: &str) -> bool {
    s.len() == 11
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Minimal split of an absolute URL into host / path / query.
/// Enough for hostname matching and query-parameter lookup; anything
/// without a `scheme://` prefix is rejected.
struct SplitUrl<'a> {
    host: &'a str,
    path: &'a str,
    query: &'a str,
}

impl<'a> SplitUrl<'a> {
    fn parse(input: &'a str) -> Option<Self> {
        let (scheme, rest) = input.split_once("://")?;
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
            return None;
        }
        // Fragment never participates in id extraction
        let rest = rest.split('#').next().unwrap_or(rest);
        let (rest, query) = match rest.split_once('?') {
            Some((r, q)) => (r, q),
            None => (rest, ""),
        };
        let (host, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        if host.is_empty() {
            return None;
        }
        Some(SplitUrl { host, path, query })
    }

    fn query_param(&self, name: &str) -> Option<&'a str> {
        self.query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == name).then_some(v)
        })
    }
}
