use cvcheck_types::{AnalysisId, Route};

/// Outcome of resolving a requested path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub route: Route,
    pub redirected: bool,
}

/// Parse a path such as `/results?id=abc` into a route, without redirects.
/// Unknown paths map to the landing page.
pub fn parse(path: &str) -> Route {
    let (path, query) = path.split_once('?').unwrap_or((path, ""));

    match path {
        "/" | "" => Route::Landing,
        "/upload" => Route::Upload,
        "/results" => Route::Results {
            id: query_param(query, "id").map(AnalysisId::new),
        },
        _ => Route::Landing,
    }
}

/// Parse then apply redirect rules: unknown paths and `/results` without
/// an id both land on `/`.
pub fn resolve(requested: &str) -> Navigation {
    let parsed = parse(requested);

    let route = match &parsed {
        Route::Results { id: None } => Route::Landing,
        other => other.clone(),
    };

    let redirected = route != parsed || !is_known_path(requested);
    if redirected {
        tracing::debug!("Redirecting {requested} -> {route}");
    }

    Navigation {
        requested: requested.to_string(),
        route,
        redirected,
    }
}

fn is_known_path(requested: &str) -> bool {
    let path = requested.split_once('?').map_or(requested, |(path, _)| path);
    matches!(path, "/" | "" | "/upload" | "/results")
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.replace('+', " "))
        .and_then(|value| urlencoding::decode(&value).ok().map(|v| v.into_owned()))
        .filter(|value| !value.is_empty())
}
