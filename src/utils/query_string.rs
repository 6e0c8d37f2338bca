use urlencoding::encode;

/// Build a query string from key-value pairs
pub fn build_query_string(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (k, v) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&encode(k));
        out.push('=');
        out.push_str(&encode(v));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::build_query_string;

    #[test]
    fn encodes_keys_and_values() {
        let pairs = vec![
            ("service_id".to_string(), "3".to_string()),
            ("azone_id".to_string(), "zone a".to_string()),
        ];
        assert_eq!(build_query_string(&pairs), "service_id=3&azone_id=zone%20a");
    }

    #[test]
    fn empty_pairs_give_empty_string() {
        assert_eq!(build_query_string(&[]), "");
    }
}
