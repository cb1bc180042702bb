//! Content-type sniffing for fetched subscription bodies
//!
//! A [`Classifier`] runs an ordered chain of [`ContentDetector`]s. Each
//! detector fills one slot of a [`Classification`]; a slot keeps the first
//! result it receives. When no detector matches, the body is kept verbatim as
//! a raw list. Detection never fails: malformed input just skips a detector.

use log::debug;
use serde_yaml::Value;

use crate::constants::contains_proxy_scheme;
use crate::models::{Classification, ClassifiedContent};
use crate::utils::base64::decode_subscription;

/// Which part of a [`Classification`] a detector produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorSlot {
    /// A parsed configuration document.
    Structured,
    /// A text list feeding the plain-list merge.
    Textual,
}

pub trait ContentDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn slot(&self) -> DetectorSlot;
    fn detect(&self, body: &str) -> Option<ClassifiedContent>;
}

/// YAML mapping carrying `proxies` or `proxy-groups`.
pub struct ClashBundleDetector;

impl ContentDetector for ClashBundleDetector {
    fn name(&self) -> &'static str {
        "clash"
    }

    fn slot(&self) -> DetectorSlot {
        DetectorSlot::Structured
    }

    fn detect(&self, body: &str) -> Option<ClassifiedContent> {
        let value: Value = match serde_yaml::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                debug!("not YAML: {}", e);
                return None;
            }
        };
        match value {
            Value::Mapping(map)
                if map.contains_key("proxies") || map.contains_key("proxy-groups") =>
            {
                Some(ClassifiedContent::ClashBundle(map))
            }
            _ => None,
        }
    }
}

/// Whole-body Base64 whose decoded text mentions a proxy scheme.
pub struct Base64ListDetector;

impl ContentDetector for Base64ListDetector {
    fn name(&self) -> &'static str {
        "base64"
    }

    fn slot(&self) -> DetectorSlot {
        DetectorSlot::Textual
    }

    fn detect(&self, body: &str) -> Option<ClassifiedContent> {
        let encoded = body.trim();
        let decoded = decode_subscription(encoded)?;
        if !contains_proxy_scheme(&decoded) {
            debug!("Base64 body decodes without any proxy scheme");
            return None;
        }
        Some(ClassifiedContent::Base64ProxyList {
            encoded: encoded.to_string(),
            decoded,
        })
    }
}

pub struct Classifier {
    detectors: Vec<Box<dyn ContentDetector>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(vec![
            Box::new(ClashBundleDetector),
            Box::new(Base64ListDetector),
        ])
    }
}

impl Classifier {
    pub fn new(detectors: Vec<Box<dyn ContentDetector>>) -> Self {
        Classifier { detectors }
    }

    /// Append a detector at the end of the chain.
    pub fn with_detector(mut self, detector: Box<dyn ContentDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    pub fn classify(&self, body: &str) -> Classification {
        let mut classification = Classification::default();

        for detector in &self.detectors {
            let slot = match detector.slot() {
                DetectorSlot::Structured => &mut classification.bundle,
                DetectorSlot::Textual => &mut classification.text,
            };
            if slot.is_some() {
                continue;
            }
            if let Some(content) = detector.detect(body) {
                debug!("detector '{}' matched", detector.name());
                *slot = Some(content);
            }
        }

        if classification.is_empty() {
            classification.text = Some(ClassifiedContent::RawProxyList(body.to_string()));
        }
        classification
    }
}

/// Classify with the default detector chain.
pub fn classify(body: &str) -> Classification {
    Classifier::default().classify(body)
}
