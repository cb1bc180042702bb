//! URL helpers

use url::Url;

/// Extracts the host part of a URL
///
/// # Arguments
/// * `input` - The URL to inspect
///
/// # Returns
/// * The host, or `None` if the URL does not parse or has no host
///
/// # Examples
/// ```
/// use subfetch::utils::url::url_host;
///
/// assert_eq!(url_host("https://sub.example.com:8443/a?b=c").as_deref(), Some("sub.example.com"));
/// assert_eq!(url_host("not a url"), None);
/// ```
pub fn url_host(input: &str) -> Option<String> {
    Url::parse(input)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Checks if a string looks like a remote link
pub fn is_link(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Builds the raw-content URL of a file committed to a GitHub repository
///
/// # Arguments
/// * `repository` - `owner/name`
/// * `branch` - Branch holding the file
/// * `path` - `/`-separated path inside the repository
///
/// # Examples
/// ```
/// use subfetch::utils::url::raw_file_url;
///
/// assert_eq!(
///     raw_file_url("octo/nodes", "main", "output/clash.yml"),
///     "https://raw.githubusercontent.com/octo/nodes/main/output/clash.yml"
/// );
/// ```
pub fn raw_file_url(repository: &str, branch: &str, path: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}",
        repository.trim_matches('/'),
        branch,
        path.trim_start_matches("./").trim_start_matches('/')
    )
}
