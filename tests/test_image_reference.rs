use rask_log_enricher::parser::{ImageReference, split_image};

#[test]
fn test_split_image_reference_table() {
    let cases = [
        ("bla", "bla", ""),
        ("foo:latest", "foo", "latest"),
        ("foo/bar:latest", "foo/bar", "latest"),
        (
            "my.registry.host/some/image:1.3.4",
            "my.registry.host/some/image",
            "1.3.4",
        ),
        (
            "my.registry.host:443/path/to/image:3.1.4",
            "my.registry.host:443/path/to/image",
            "3.1.4",
        ),
        (
            "my.registry.host:443/path/to/image",
            "my.registry.host:443/path/to/image",
            "",
        ),
    ];

    for (reference, image, tag) in cases {
        assert_eq!(
            split_image(reference),
            (image, tag),
            "reference: {reference}"
        );
    }
}

#[test]
fn test_references_without_colon_are_untouched() {
    for reference in ["", "nginx", "library/nginx", "my.registry.host/a/b/c"] {
        assert_eq!(split_image(reference), (reference, ""));
    }
}

#[test]
fn test_base_and_tag_recombine() {
    for (base, tag) in [
        ("alpine", "3.19"),
        ("ghcr.io/org/app", "v1.2.3-rc.1"),
        ("localhost:5000/team/app", "sha-1f2e3d"),
    ] {
        let reference = format!("{base}:{tag}");
        assert_eq!(split_image(&reference), (base, tag));
    }
}

#[test]
fn test_registry_port_is_never_a_tag() {
    let image = ImageReference::parse("my.registry.host:443/path/to/image");
    assert_eq!(image.name, "my.registry.host:443/path/to/image");
    assert!(!image.has_tag());
}
