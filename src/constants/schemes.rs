/// URI prefixes that mark decoded text as a proxy list.
pub const PROXY_SCHEMES: [&str; 7] = [
    "vmess://",
    "vless://",
    "ss://",
    "ssr://",
    "trojan://",
    "http://",
    "https://",
];

/// Returns true if `text` mentions at least one known proxy scheme.
pub fn contains_proxy_scheme(text: &str) -> bool {
    PROXY_SCHEMES.iter().any(|scheme| text.contains(scheme))
}
