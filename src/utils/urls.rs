/// Build an absolute URL from a base URL and a path. An empty base keeps the
/// path relative, which is what the console serves by default.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if base_url.is_empty() {
        return path.to_string();
    }
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return base_url.to_string();
    }
    format!("{}/{}", base_url, trimmed)
}

/// Extract the hostname from a URL string
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    if s.is_empty() {
        return "".into();
    }
    let s = if let Some(idx) = s.find("://") { &s[idx + 3..] } else { s };
    s.split('/').next().unwrap_or(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_joins_base_and_path() {
        assert_eq!(absolute_url("http://localhost:8080", "/create"), "http://localhost:8080/create");
    }

    #[test]
    fn absolute_url_keeps_relative_with_empty_base() {
        assert_eq!(absolute_url("", "/servers"), "/servers");
    }

    #[test]
    fn hostname_strips_scheme_and_path() {
        assert_eq!(hostname_from_url("https://cloud.example.org/api"), "cloud.example.org");
        assert_eq!(hostname_from_url(""), "");
    }
}
