//! Profile image links stored in the sheets.
//!
//! Cells hold Google Drive sharing links, sometimes combined with a display name as
//! `"<url>,<name>"`. Sharing links do not serve image bytes, so each link is turned
//! into an ordered list of thumbnail/view URLs that are tried until one loads.

use crate::consts::cli_consts::network;
use reqwest::Client;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use std::sync::OnceLock;

#[cfg(test)]
use mockall::automock;

/// Extracts the Drive file id from `/file/d/<id>`, `id=<id>` or `/d/<id>`.
///
/// The leftmost occurrence of any of the three shapes wins; at the same position
/// the shapes are tried in that order.
pub fn extract_file_id(url: &str) -> Option<&str> {
    static FILE_ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = FILE_ID_RE.get_or_init(|| {
        Regex::new(r"/file/d/([^/]+)|id=([^&]+)|/d/([^/]+)").expect("file id regex compiles")
    });
    let caps = re.captures(url)?;
    (1..=3)
        .find_map(|group| caps.get(group))
        .map(|m| m.as_str())
}

/// Ordered URLs to try for an image link.
///
/// Blank input yields nothing; a link without a recognizable file id is returned
/// as-is.
pub fn candidate_urls(url: &str) -> Vec<String> {
    if url.trim().is_empty() {
        return Vec::new();
    }
    let Some(id) = extract_file_id(url) else {
        return vec![url.to_string()];
    };
    vec![
        format!("https://drive.google.com/thumbnail?id={}&sz=w400", id),
        format!("https://lh3.googleusercontent.com/d/{}=w400", id),
        format!("https://drive.google.com/uc?export=view&id={}", id),
        url.to_string(),
    ]
}

/// Turns a raw image cell into the first URL worth trying.
///
/// Quoted values are unquoted; `"<url>,<name>"` keeps the url part; anything else
/// must start with `http`. The `Link` header placeholder is ignored.
pub fn process_image_url(raw: &str) -> Option<String> {
    let unquoted = raw.strip_prefix('"').unwrap_or(raw);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    let cleaned = unquoted.trim();

    let image_url = if cleaned.contains(',') {
        split_employee(cleaned).image_url
    } else if cleaned.starts_with("http") {
        cleaned.to_string()
    } else {
        return None;
    };

    if image_url.is_empty() || image_url == "Link" {
        return None;
    }
    candidate_urls(&image_url).into_iter().next()
}

/// An employee cell split into its image link and display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRef {
    pub image_url: String,
    pub name: String,
}

/// Splits `"<url>,<name>"` at the first comma that has text after it.
///
/// A bare `http…` value is all image; any other value is all name.
pub fn split_employee(raw: &str) -> EmployeeRef {
    if raw.contains(',') {
        let first_comma = raw.find(',').filter(|&i| i + 1 < raw.len());
        let (image, name) = match first_comma {
            Some(i) => (&raw[..i], &raw[i + 1..]),
            None => (raw, ""),
        };
        EmployeeRef {
            image_url: image.trim().to_string(),
            name: name.trim().to_string(),
        }
    } else if raw.starts_with("http") {
        EmployeeRef {
            image_url: raw.trim().to_string(),
            name: String::new(),
        }
    } else {
        EmployeeRef {
            image_url: String::new(),
            name: raw.trim().to_string(),
        }
    }
}

/// Initials badge text: first letters of the first two words, or `?`.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split(' ')
        .take(2)
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// What to show for a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// The first candidate URL that loaded.
    Image(String),
    /// Every candidate failed, or there was no link.
    Initials(String),
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ImageProbe: Send + Sync {
    /// Whether `url` serves an image.
    async fn loads(&self, url: &str) -> bool;
}

/// Probes candidates with a GET and accepts `image/*` responses.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: Client,
}

impl HttpImageProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ImageProbe for HttpImageProbe {
    async fn loads(&self, url: &str) -> bool {
        let response = match self
            .client
            .get(url)
            .timeout(network::image_probe_timeout())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Image candidate {} failed: {}", url, e);
                return false;
            }
        };
        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("image/"));
        response.status().is_success() && is_image
    }
}

/// Tries each candidate of `src` in order and falls back to the initials of `name`.
pub async fn resolve_avatar(probe: &dyn ImageProbe, src: Option<&str>, name: &str) -> Avatar {
    let src = src.unwrap_or_default();
    for candidate in candidate_urls(src) {
        if probe.loads(&candidate).await {
            return Avatar::Image(candidate);
        }
        log::debug!("Image candidate did not load: {}", candidate);
    }
    Avatar::Initials(initials(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_file_link_yields_thumbnail_with_id() {
        let urls = candidate_urls("https://drive.google.com/file/d/ABC123/view?usp=sharing");
        assert_eq!(urls.len(), 4);
        assert!(urls[0].contains("id=ABC123"));
        assert_eq!(urls[0], "https://drive.google.com/thumbnail?id=ABC123&sz=w400");
        assert_eq!(urls[1], "https://lh3.googleusercontent.com/d/ABC123=w400");
        assert_eq!(urls[2], "https://drive.google.com/uc?export=view&id=ABC123");
        assert_eq!(urls[3], "https://drive.google.com/file/d/ABC123/view?usp=sharing");
    }

    #[test]
    fn test_extract_file_id_shapes() {
        assert_eq!(
            extract_file_id("https://drive.google.com/open?id=XYZ&authuser=0"),
            Some("XYZ")
        );
        assert_eq!(
            extract_file_id("https://docs.google.com/d/QQQ/edit"),
            Some("QQQ")
        );
        assert_eq!(extract_file_id("https://example.com/avatar.png"), None);
        assert_eq!(extract_file_id("https://x.com/file/d//view"), None);
    }

    #[test]
    fn test_extract_file_id_prefers_leftmost_match() {
        assert_eq!(
            extract_file_id("https://x.com/d/FIRST/?id=SECOND"),
            Some("FIRST")
        );
        assert_eq!(
            extract_file_id("https://x.com/uc?id=FIRST&next=/d/SECOND"),
            Some("FIRST")
        );
    }

    #[test]
    fn test_candidate_urls_edge_cases() {
        assert!(candidate_urls("").is_empty());
        assert!(candidate_urls("   ").is_empty());
        assert_eq!(
            candidate_urls("https://example.com/a.png"),
            vec!["https://example.com/a.png"]
        );
    }

    #[test]
    fn test_process_image_url() {
        assert_eq!(
            process_image_url("\"https://drive.google.com/file/d/F1/view,Asha Rao\"").as_deref(),
            Some("https://drive.google.com/thumbnail?id=F1&sz=w400")
        );
        assert_eq!(
            process_image_url("https://example.com/me.jpg").as_deref(),
            Some("https://example.com/me.jpg")
        );
        assert_eq!(process_image_url("Link"), None);
        assert_eq!(process_image_url("Link,Someone"), None);
        assert_eq!(process_image_url("just a name"), None);
        assert_eq!(process_image_url(""), None);
    }

    #[test]
    fn test_split_employee() {
        assert_eq!(
            split_employee("https://img/x , Asha, Rao"),
            EmployeeRef {
                image_url: "https://img/x".to_string(),
                name: "Asha, Rao".to_string(),
            }
        );
        assert_eq!(
            split_employee("https://img/x"),
            EmployeeRef {
                image_url: "https://img/x".to_string(),
                name: String::new(),
            }
        );
        assert_eq!(
            split_employee("  Ravi "),
            EmployeeRef {
                image_url: String::new(),
                name: "Ravi".to_string(),
            }
        );
        assert_eq!(split_employee("https://img/x,").image_url, "https://img/x,");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("asha rao kumar"), "AR");
        assert_eq!(initials("Ravi"), "R");
        assert_eq!(initials(""), "?");
    }

    #[tokio::test]
    async fn test_resolve_avatar_uses_first_loading_candidate() {
        let mut probe = MockImageProbe::new();
        probe
            .expect_loads()
            .with(eq("https://drive.google.com/thumbnail?id=F1&sz=w400"))
            .times(1)
            .returning(|_| false);
        probe
            .expect_loads()
            .with(eq("https://lh3.googleusercontent.com/d/F1=w400"))
            .times(1)
            .returning(|_| true);

        let avatar = resolve_avatar(
            &probe,
            Some("https://drive.google.com/file/d/F1/view"),
            "Asha Rao",
        )
        .await;
        assert_eq!(
            avatar,
            Avatar::Image("https://lh3.googleusercontent.com/d/F1=w400".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_avatar_falls_back_to_initials() {
        let mut probe = MockImageProbe::new();
        probe.expect_loads().times(4).returning(|_| false);

        let avatar = resolve_avatar(
            &probe,
            Some("https://drive.google.com/file/d/F1/view"),
            "asha rao",
        )
        .await;
        assert_eq!(avatar, Avatar::Initials("AR".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_avatar_without_link_never_probes() {
        let mut probe = MockImageProbe::new();
        probe.expect_loads().never();
        assert_eq!(
            resolve_avatar(&probe, None, "").await,
            Avatar::Initials("?".to_string())
        );
    }
}
