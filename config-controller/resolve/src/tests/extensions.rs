use super::*;

fn mk_extension(name: &str) -> EnvoyExtension {
    EnvoyExtension {
        name: name.to_string(),
        required: true,
        arguments: obj(json!({ "arg1": "val1" })),
    }
}

#[test]
fn inherits_extensions() {
    let defaults = ServiceConfigDefaults {
        envoy_extensions: vec![mk_extension("ext1")],
        ..Default::default()
    };

    let resolved = merge(&defaults, &mk_instance());
    assert_eq!(resolved.proxy.envoy_extensions, vec![mk_extension("ext1")]);
}

/// Central extensions replace the local list in its entirety; the two lists
/// are never unioned.
#[test]
fn replaces_existing_extensions() {
    let defaults = ServiceConfigDefaults {
        envoy_extensions: vec![mk_extension("ext1")],
        ..Default::default()
    };
    let mut instance = mk_instance();
    instance.proxy.envoy_extensions = vec![mk_extension("existing-ext")];

    let resolved = merge(&defaults, &instance);
    assert_eq!(resolved.proxy.envoy_extensions, vec![mk_extension("ext1")]);
}

#[test]
fn keeps_local_extensions_when_central_has_none() {
    let mut instance = mk_instance();
    instance.proxy.envoy_extensions = vec![mk_extension("existing-ext")];

    let resolved = merge(&ServiceConfigDefaults::default(), &instance);
    assert_eq!(
        resolved.proxy.envoy_extensions,
        vec![mk_extension("existing-ext")]
    );
}
