// Utility functions
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use url::Url;

/// Returns `{scheme}://{host[:port]}/robots.txt` for the site hosting `url`.
pub fn robots_url(url: &Url) -> Result<Url, url::ParseError> {
    url.join("/robots.txt")
}

/// Path component used for Disallow matching. Query and fragment are ignored.
pub fn request_path(url: &Url) -> &str {
    url.path()
}

/// `request_path` with percent-escapes decoded, i.e. as the URL was typed.
pub fn decoded_request_path(url: &Url) -> Cow<'_, str> {
    percent_decode_str(url.path()).decode_utf8_lossy()
}

/// File-name friendly form of the URL host, used for debug dumps.
pub fn host_slug(url: &Url) -> String {
    url.host_str().unwrap_or("unknown").replace(['.', ':'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robots_url_drops_path_and_query() {
        let url = Url::parse("https://www.tourism.jp/tourism-database/stats/inbound/?y=2024#t").unwrap();
        assert_eq!(robots_url(&url).unwrap().as_str(), "https://www.tourism.jp/robots.txt");
    }

    #[test]
    fn robots_url_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/a/b").unwrap();
        assert_eq!(robots_url(&url).unwrap().as_str(), "http://127.0.0.1:8080/robots.txt");
    }

    #[test]
    fn request_path_is_path_only() {
        let url = Url::parse("https://example.com/stats/inbound/?q=1").unwrap();
        assert_eq!(request_path(&url), "/stats/inbound/");
        assert_eq!(host_slug(&url), "example_com");
    }

    #[test]
    fn decoded_path_restores_non_ascii() {
        let url = Url::parse("https://example.com/統計/訪日/").unwrap();
        assert_eq!(request_path(&url), "/%E7%B5%B1%E8%A8%88/%E8%A8%AA%E6%97%A5/");
        assert_eq!(decoded_request_path(&url), "/統計/訪日/");
    }
}
