//! Container image reference splitting.
//!
//! Both a registry port and an image tag are introduced by a colon. The last
//! colon is taken as the tag separator unless a `/` follows it, in which case
//! it belonged to `registry-host:port` and the reference carries no tag.

/// Split `reference` into `(base_image, tag)`. The tag is empty when absent.
pub fn split_image(reference: &str) -> (&str, &str) {
    match reference.rfind(':') {
        Some(pos) if !reference[pos + 1..].contains('/') => {
            (&reference[..pos], &reference[pos + 1..])
        }
        _ => (reference, ""),
    }
}

/// Owned form of a split image reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageReference {
    pub name: String,
    pub tag: String,
}

impl ImageReference {
    pub fn parse(reference: &str) -> Self {
        let (name, tag) = split_image(reference);
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn has_tag(&self) -> bool {
        !self.tag.is_empty()
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_tag() {
            write!(f, "{}:{}", self.name, self.tag)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_tag() {
        assert_eq!(split_image("bla"), ("bla", ""));
        assert_eq!(split_image(""), ("", ""));
    }

    #[test]
    fn test_split_simple_tags() {
        assert_eq!(split_image("foo:latest"), ("foo", "latest"));
        assert_eq!(split_image("foo/bar:latest"), ("foo/bar", "latest"));
        assert_eq!(
            split_image("my.registry.host/some/image:1.3.4"),
            ("my.registry.host/some/image", "1.3.4")
        );
    }

    #[test]
    fn test_split_registry_port() {
        assert_eq!(
            split_image("my.registry.host:443/path/to/image:3.1.4"),
            ("my.registry.host:443/path/to/image", "3.1.4")
        );
        assert_eq!(
            split_image("my.registry.host:443/path/to/image"),
            ("my.registry.host:443/path/to/image", "")
        );
    }

    #[test]
    fn test_trailing_colon_yields_empty_tag() {
        assert_eq!(split_image("foo:"), ("foo", ""));
    }

    #[test]
    fn test_image_reference_roundtrips_display() {
        let tagged = ImageReference::parse("registry:5000/app:2.0");
        assert_eq!(tagged.name, "registry:5000/app");
        assert_eq!(tagged.tag, "2.0");
        assert!(tagged.has_tag());
        assert_eq!(tagged.to_string(), "registry:5000/app:2.0");

        let untagged = ImageReference::parse("registry:5000/app");
        assert!(!untagged.has_tag());
        assert_eq!(untagged.to_string(), "registry:5000/app");
    }
}
