// robots.txt evaluation: literal `Disallow` prefixes, no User-agent scoping, no wildcards
use crate::utils::{decoded_request_path, request_path};
use tracing::{debug, warn};
use url::Url;

const DISALLOW: &str = "Disallow";
const SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsPolicy {
    disallowed: Vec<String>,
}

impl RobotsPolicy {
    /// Collects the value of every line starting with `Disallow`.
    ///
    /// The value is everything after the first `": "`. Lines missing the
    /// separator are skipped with a warning.
    pub fn parse(policy_text: &str) -> Self {
        let mut disallowed = Vec::new();

        for (idx, line) in policy_text.lines().enumerate() {
            if !line.starts_with(DISALLOW) {
                continue;
            }
            match line.split_once(SEPARATOR) {
                Some((_, value)) => disallowed.push(value.to_string()),
                None => warn!("Skipping malformed robots.txt line {}: {:?}", idx + 1, line),
            }
        }

        Self { disallowed }
    }

    pub fn disallowed(&self) -> &[String] {
        &self.disallowed
    }

    pub fn allows(&self, path: &str) -> bool {
        !self
            .disallowed
            .iter()
            .any(|entry| entry == "/" || path.starts_with(entry.as_str()))
    }
}

/// Entries are matched against the path both as encoded by the URL parser and
/// decoded, so literal non-ASCII and percent-escaped entries both apply.
pub fn is_allowed(url: &Url, policy_text: &str) -> bool {
    let policy = RobotsPolicy::parse(policy_text);
    debug!("robots.txt has {} Disallow entries", policy.disallowed().len());
    policy.allows(request_path(url)) && policy.allows(&decoded_request_path(url))
}
