//! Route path patterns (`/download/:version`).

use crate::model::navigation::RouteMatch;
use crate::router::RouteError;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Compiled route path pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    exact: bool,
    param_names: Vec<String>,
    regex: Regex,
}

impl RoutePattern {
    /// Compiles `pattern`. `exact` patterns must cover the whole pathname;
    /// others also match any deeper path.
    ///
    /// # Errors
    /// - Pattern does not start with `/`.
    /// - A `:param` segment has an empty, non-identifier or duplicate name.
    pub fn parse(pattern: &str, exact: bool) -> Result<Self, RouteError> {
        let source = pattern.trim();
        if !source.starts_with('/') {
            return Err(invalid(source, "pattern must start with `/`"));
        }

        let mut expr = String::from("^");
        let mut param_names = Vec::new();
        let mut seen = BTreeSet::new();
        for segment in source.split('/').skip(1).filter(|s| !s.is_empty()) {
            expr.push('/');
            match segment.strip_prefix(':') {
                Some(name) => {
                    if !is_param_name(name) {
                        return Err(invalid(source, &format!("invalid param name `{name}`")));
                    }
                    if !seen.insert(name.to_string()) {
                        return Err(invalid(source, &format!("duplicate param `{name}`")));
                    }
                    expr.push_str(&format!("(?P<{name}>[^/]+)"));
                    param_names.push(name.to_string());
                }
                None => expr.push_str(&regex::escape(segment)),
            }
        }
        if exact {
            expr.push_str("/?$");
        } else {
            expr.push_str("(?:/|$)");
        }

        let regex = Regex::new(&expr).map_err(|err| invalid(source, &err.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            exact,
            param_names,
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Matches `pathname`, extracting params.
    pub fn matches(&self, pathname: &str) -> Option<RouteMatch> {
        let captures = self.regex.captures(pathname)?;
        let whole = captures.get(0)?.as_str();
        let url = match whole.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };

        let mut params = BTreeMap::new();
        for name in &self.param_names {
            if let Some(value) = captures.name(name) {
                params.insert(name.clone(), value.as_str().to_string());
            }
        }

        let is_exact = url == pathname.trim_end_matches('/') || (url == "/" && pathname == "/");
        Some(RouteMatch {
            params,
            is_exact,
            path: self.source.clone(),
            url,
        })
    }
}

fn invalid(pattern: &str, reason: &str) -> RouteError {
    RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

fn is_param_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
