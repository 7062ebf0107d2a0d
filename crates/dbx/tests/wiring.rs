use dbx::domain::config::{
    AnnotationSection, ApplicationSection, ConsumerSection, DubboxProperties, ModuleSection,
    ProtocolSection, ProviderSection, RegistrySection,
};
use dbx::domain::registry::ComponentRole;
use dbx::kernel::registry::{BeanRegistry, ComponentRegistry, ComponentRegistryExt};
use dbx::rpc::{
    AnnotationScanner, Application, ApplicationInner, Consumer, Protocol, Provider, Registry,
};
use dbx::{Outcome, SkipReason, WiringError};
use serde_json::json;

fn full() -> DubboxProperties {
    DubboxProperties {
        annotation: AnnotationSection { package: Some("com.acme.billing".to_owned()) },
        application: ApplicationSection {
            name: Some("svc-a".to_owned()),
            version: Some("1.0.0".to_owned()),
            ..ApplicationSection::default()
        },
        module: ModuleSection::default(),
        registry: RegistrySection {
            address: Some("zookeeper://127.0.0.1:2181".to_owned()),
            ..RegistrySection::default()
        },
        protocol: ProtocolSection {
            name: Some("dubbox".to_owned()),
            port: Some(20880),
            ..ProtocolSection::default()
        },
        provider: ProviderSection { timeout: Some(3000), ..ProviderSection::default() },
        consumer: ConsumerSection { check: Some(false), ..ConsumerSection::default() },
    }
}

#[test]
fn full_configuration_wires_every_triggered_role() {
    let mut registry = BeanRegistry::new();
    let report = dbx::wire(&full(), &mut registry).unwrap();

    assert_eq!(
        registry.roles(),
        [
            ComponentRole::AnnotationScanner,
            ComponentRole::Application,
            ComponentRole::Registry,
            ComponentRole::Protocol,
            ComponentRole::Provider,
            ComponentRole::Consumer,
        ]
    );
    assert_eq!(
        report.outcome(ComponentRole::Module),
        Some(&Outcome::Skipped { reason: SkipReason::NotConfigured })
    );

    assert_eq!(registry.try_get::<AnnotationScanner>().unwrap().package, "com.acme.billing");
    assert_eq!(registry.try_get::<Application>().unwrap().name, "svc-a");
    assert_eq!(registry.try_get::<Registry>().unwrap().address, "zookeeper://127.0.0.1:2181");
    assert!(!registry.try_get::<Consumer>().unwrap().check());

    let protocol = registry.try_get::<Protocol>().unwrap();
    let provider = registry.try_get::<Provider>().unwrap();
    assert!(provider.protocol.ptr_eq(protocol));
    assert_eq!(provider.settings.timeout, Some(3000));
}

#[test]
fn report_lists_roles_in_wiring_order() {
    let mut registry = BeanRegistry::new();
    let report = dbx::wire(&full(), &mut registry).unwrap();

    let roles: Vec<_> = report.entries().iter().map(|entry| entry.role).collect();
    assert_eq!(
        roles,
        [
            ComponentRole::AnnotationScanner,
            ComponentRole::Application,
            ComponentRole::Module,
            ComponentRole::Registry,
            ComponentRole::Protocol,
            ComponentRole::Provider,
            ComponentRole::Consumer,
        ]
    );
    assert_eq!(report.registered().count(), 6);
    assert_eq!(
        report.outcome(ComponentRole::Application),
        Some(&Outcome::Registered { key: Some("svc-a".to_owned()) })
    );
}

#[test]
fn host_components_are_never_replaced() {
    let host = Application::new(ApplicationInner {
        name: "host-app".to_owned(),
        settings: ApplicationSection::default(),
    });
    let mut registry = BeanRegistry::new().with(host.clone()).unwrap();

    let report = dbx::wire(&full(), &mut registry).unwrap();

    assert!(registry.try_get::<Application>().unwrap().ptr_eq(&host));
    assert_eq!(
        report.outcome(ComponentRole::Application),
        Some(&Outcome::Skipped { reason: SkipReason::AlreadyRegistered })
    );
}

#[test]
fn preregistered_host_component_skips_validation() {
    let host = Application::new(ApplicationInner {
        name: "host-app".to_owned(),
        settings: ApplicationSection::default(),
    });
    let mut props = full();
    props.application.name = Some(String::new());
    let mut registry = BeanRegistry::new().with(host).unwrap();

    assert!(dbx::wire(&props, &mut registry).is_ok());
}

#[test]
fn provider_links_to_a_host_protocol() {
    let host = Protocol::from_section(&ProtocolSection {
        name: Some("rest".to_owned()),
        ..ProtocolSection::default()
    })
    .unwrap();
    let mut props = full();
    props.protocol = ProtocolSection::default();
    let mut registry = BeanRegistry::new().with(host.clone()).unwrap();

    let report = dbx::wire(&props, &mut registry).unwrap();

    assert!(report.is_registered(ComponentRole::Provider));
    assert!(registry.try_get::<Provider>().unwrap().protocol.ptr_eq(&host));
}

#[test]
fn provider_without_protocol_is_skipped() {
    let mut props = full();
    props.protocol = ProtocolSection { port: Some(20880), ..ProtocolSection::default() };
    let mut registry = BeanRegistry::new();

    let report = dbx::wire(&props, &mut registry).unwrap();

    assert!(!registry.contains(ComponentRole::Protocol));
    assert!(!registry.contains(ComponentRole::Provider));
    assert_eq!(
        report.outcome(ComponentRole::Provider),
        Some(&Outcome::Skipped { reason: SkipReason::MissingDependency(ComponentRole::Protocol) })
    );
}

#[test]
fn missing_registry_address_aborts_startup() {
    let mut props = full();
    props.registry = RegistrySection::default();
    let mut registry = BeanRegistry::new();

    let err = dbx::wire(&props, &mut registry).unwrap_err();

    assert!(matches!(err, WiringError::Component { .. }));
    assert_eq!(
        err.to_string(),
        "Failed to construct component (registryConfig): Required field 'registry.address' must not be empty"
    );
    assert!(registry.is_empty());
}

#[test]
fn supplied_but_empty_name_fails_instead_of_skipping() {
    let mut props = full();
    props.module = ModuleSection { name: Some(String::new()), ..ModuleSection::default() };
    let mut registry = BeanRegistry::new();

    let err = dbx::wire(&props, &mut registry).unwrap_err();

    assert!(err.to_string().contains("module.name"), "unexpected message: {err}");
    assert!(registry.is_empty());
}

#[test]
fn second_run_changes_nothing() {
    let props = full();
    let mut registry = BeanRegistry::new();
    dbx::wire(&props, &mut registry).unwrap();
    let protocol = registry.try_get::<Protocol>().unwrap().clone();

    let report = dbx::wire(&props, &mut registry).unwrap();

    assert_eq!(report.registered().count(), 0);
    assert_eq!(registry.len(), 6);
    assert!(registry.try_get::<Protocol>().unwrap().ptr_eq(&protocol));
}

#[test]
fn report_serializes_for_tooling() {
    let mut props = full();
    props.protocol = ProtocolSection::default();
    let mut registry = BeanRegistry::new();

    let report = dbx::wire(&props, &mut registry).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value["entries"][1],
        json!({ "role": "applicationConfig", "outcome": "registered", "key": "svc-a" })
    );
    assert_eq!(
        value["entries"][2],
        json!({ "role": "moduleConfig", "outcome": "skipped", "reason": "not_configured" })
    );
    assert_eq!(
        value["entries"][5],
        json!({
            "role": "providerConfig",
            "outcome": "skipped",
            "reason": { "missing_dependency": "protocolConfig" }
        })
    );
}
