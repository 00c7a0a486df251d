//! Content path helpers

const JCR_CONTENT: &str = "/jcr:content";

/// Part of `raw` after `/jcr:content`, empty when the marker is missing.
pub fn after_jcr_content(raw: &str) -> &str {
    raw.split_once(JCR_CONTENT)
        .map(|(_, rest)| rest)
        .unwrap_or_default()
}

/// Canonical form of a component path used for lookups.
///
/// Accepts full resource paths as well as paths relative to `jcr:content`:
/// `/content/site/en/jcr:content/par/text/` and `par//text` both become `/par/text`.
pub fn normalize(path: &str) -> String {
    let relative = match path.split_once("jcr:content") {
        Some((_, rest)) => rest,
        None => path,
    };
    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return String::new();
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_after_marker() {
        assert_eq!(
            after_jcr_content("/content/site/en/jcr:content/par/text"),
            "/par/text"
        );
        assert_eq!(after_jcr_content("/content/site/en"), "");
        assert_eq!(after_jcr_content(""), "");
    }

    #[test]
    fn normalize_variants() {
        let cases = [
            ("/par/text", "/par/text"),
            ("par/text", "/par/text"),
            ("/par//text/", "/par/text"),
            ("/content/site/en/jcr:content/par/text", "/par/text"),
            ("jcr:content/par", "/par"),
            ("/", ""),
            ("", ""),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize(raw), expected, "normalize({raw:?})");
        }
    }
}
