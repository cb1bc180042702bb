//! Classified subscription payloads

use serde::Serialize;
use serde_yaml::Mapping;

/// Detected format of a subscription payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Clash,
    Base64,
    Raw,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Clash => "clash",
            ContentKind::Base64 => "base64",
            ContentKind::Raw => "raw",
        }
    }

    /// File extension used for per-source output files.
    pub fn extension(&self) -> &'static str {
        match self {
            ContentKind::Clash => "yaml",
            ContentKind::Base64 | ContentKind::Raw => "txt",
        }
    }
}

/// One interpretation of a fetched payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedContent {
    /// Text used verbatim, whether or not it contains known schemes.
    RawProxyList(String),
    /// Base64 text together with its decoded form.
    Base64ProxyList { encoded: String, decoded: String },
    /// A parsed Clash-style document carrying `proxies` or `proxy-groups`.
    ClashBundle(Mapping),
}

impl ClassifiedContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            ClassifiedContent::RawProxyList(_) => ContentKind::Raw,
            ClassifiedContent::Base64ProxyList { .. } => ContentKind::Base64,
            ClassifiedContent::ClashBundle(_) => ContentKind::Clash,
        }
    }

    /// Text to feed into the plain-list merge, if this is a textual variant.
    pub fn text(&self) -> Option<&str> {
        match self {
            ClassifiedContent::RawProxyList(text) => Some(text),
            ClassifiedContent::Base64ProxyList { decoded, .. } => Some(decoded),
            ClassifiedContent::ClashBundle(_) => None,
        }
    }
}

/// Result of classifying one payload: zero or one bundle plus zero or one
/// textual list. Both may be present at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub bundle: Option<ClassifiedContent>,
    pub text: Option<ClassifiedContent>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.bundle.is_none() && self.text.is_none()
    }

    pub fn kinds(&self) -> Vec<ContentKind> {
        self.iter().map(ClassifiedContent::kind).collect()
    }

    /// Bundle first, then the textual payload.
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedContent> {
        self.bundle.iter().chain(self.text.iter())
    }

    pub fn bundle_mapping(&self) -> Option<&Mapping> {
        match &self.bundle {
            Some(ClassifiedContent::ClashBundle(map)) => Some(map),
            _ => None,
        }
    }

    pub fn text_payload(&self) -> Option<&str> {
        self.text.as_ref().and_then(ClassifiedContent::text)
    }
}
