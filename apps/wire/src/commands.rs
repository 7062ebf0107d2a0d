use crate::args::RunArgs;
use anyhow::{Context, Result, bail};
use dbx::domain::config::{
    AnnotationSection, ApplicationSection, ConsumerSection, DubboxProperties, ModuleSection,
    ProtocolSection, ProviderSection, RegistrySection, Section,
};
use dbx::domain::registry::ComponentRole;
use dbx::kernel::config::PropertiesLoader;
use dbx::kernel::registry::BeanRegistry;
use dbx::{Outcome, SkipReason, WiringReport};
use std::fmt::{self, Write};
use strum::IntoEnumIterator;
use tracing::info;

type Tiers = &'static [(&'static str, &'static [&'static str])];

/// Builds the properties from the file, environment and override layers in `args`.
///
/// # Errors
/// Fails on malformed overrides, missing required files, or values that do not bind.
pub fn load_properties(args: &RunArgs) -> Result<DubboxProperties> {
    let mut loader = PropertiesLoader::new();
    for path in &args.configs {
        loader = loader.file(path);
    }
    for path in &args.optional_configs {
        loader = loader.optional_file(path);
    }
    if args.no_env {
        loader = loader.without_env();
    }
    for pair in &args.overrides {
        loader = loader.set_pair(pair)?;
    }
    loader.load().context("Configuration is malformed")
}

/// Loads configuration, wires a fresh registry and renders the report.
///
/// # Errors
/// Fails when configuration cannot be loaded or a configured component is invalid.
pub fn run(args: &RunArgs) -> Result<String> {
    let properties = load_properties(args)?;
    let mut registry = BeanRegistry::new();
    let report = dbx::wire(&properties, &mut registry).context("Component wiring failed")?;

    info!("Registry holds {} component(s)", registry.len());

    if args.json { Ok(serde_json::to_string_pretty(&report)?) } else { Ok(render_report(&report)?) }
}

/// One line per role: bean name, outcome and key or skip reason.
///
/// # Errors
/// Propagates formatter errors.
pub fn render_report(report: &WiringReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for entry in report.entries() {
        let detail = match &entry.outcome {
            Outcome::Registered { key: Some(key) } => format!("registered ({key})"),
            Outcome::Registered { .. } => "registered".to_owned(),
            Outcome::Skipped { reason: SkipReason::AlreadyRegistered } => "skipped: already registered".to_owned(),
            Outcome::Skipped { reason: SkipReason::NotConfigured } => "skipped: not configured".to_owned(),
            Outcome::Skipped { reason: SkipReason::MissingDependency(role) } => {
                format!("skipped: requires {role}")
            },
        };
        writeln!(out, "{:<16} {detail}", entry.role.bean_name())?;
    }
    Ok(out)
}

/// Lists the keys of `section`, or of every section.
///
/// # Errors
/// Fails when `section` names no known section.
pub fn schema(section: Option<&str>) -> Result<String> {
    let roles: Vec<ComponentRole> = match section {
        Some(name) => {
            let Some(role) = ComponentRole::iter().find(|role| role.section() == name) else {
                let known: Vec<_> = ComponentRole::iter().map(ComponentRole::section).collect();
                bail!("Unknown section '{name}', expected one of: {}", known.join(", "));
            };
            vec![role]
        },
        None => ComponentRole::iter().collect(),
    };

    let mut out = String::new();
    for role in roles {
        for (tier, keys) in tiers(role) {
            writeln!(out, "[{}] {tier}", role.section())?;
            for key in *keys {
                writeln!(out, "  {}", qualified(role, key))?;
            }
        }
    }
    Ok(out)
}

const fn tiers(role: ComponentRole) -> Tiers {
    match role {
        ComponentRole::AnnotationScanner => AnnotationSection::TIERS,
        ComponentRole::Application => ApplicationSection::TIERS,
        ComponentRole::Module => ModuleSection::TIERS,
        ComponentRole::Registry => RegistrySection::TIERS,
        ComponentRole::Protocol => ProtocolSection::TIERS,
        ComponentRole::Provider => ProviderSection::TIERS,
        ComponentRole::Consumer => ConsumerSection::TIERS,
    }
}

fn qualified(role: ComponentRole, key: &str) -> String {
    match role {
        ComponentRole::AnnotationScanner => AnnotationSection::key(key),
        ComponentRole::Application => ApplicationSection::key(key),
        ComponentRole::Module => ModuleSection::key(key),
        ComponentRole::Registry => RegistrySection::key(key),
        ComponentRole::Protocol => ProtocolSection::key(key),
        ComponentRole::Provider => ProviderSection::key(key),
        ComponentRole::Consumer => ConsumerSection::key(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(overrides: &[&str]) -> RunArgs {
        RunArgs {
            overrides: overrides.iter().map(|s| (*s).to_owned()).collect(),
            no_env: true,
            ..RunArgs::default()
        }
    }

    #[test]
    fn run_renders_one_line_per_role() {
        let out = run(&args(&["registry.address=N/A", "protocol.name=dubbox"])).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("annotationBean"));
        assert!(lines[3].ends_with("registered (N/A)"));
        assert!(lines[5].ends_with("skipped: not configured"));
    }

    #[test]
    fn report_lines_show_keys_and_skip_reasons() {
        let report: WiringReport = [
            (ComponentRole::AnnotationScanner, Outcome::Registered { key: None }),
            (ComponentRole::Application, Outcome::Registered { key: Some("svc-a".to_owned()) }),
            (
                ComponentRole::Provider,
                Outcome::Skipped { reason: SkipReason::MissingDependency(ComponentRole::Protocol) },
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            render_report(&report).unwrap(),
            "annotationBean   registered\n\
             applicationConfig registered (svc-a)\n\
             providerConfig   skipped: requires protocolConfig\n"
        );
    }

    #[test]
    fn malformed_override_is_reported() {
        let err = run(&args(&["registry.address"])).unwrap_err();
        assert!(format!("{err:#}").contains("expected key=value"));
    }

    #[test]
    fn schema_lists_provider_tiers() {
        let out = schema(Some("provider")).unwrap();
        assert!(out.contains("[provider] service"));
        assert!(out.contains("  spring.dubbo.provider.executes"));
        assert!(out.contains("  spring.dubbo.provider.async"));
    }

    #[test]
    fn schema_rejects_unknown_section() {
        let err = schema(Some("monitor")).unwrap_err();
        assert!(err.to_string().contains("Unknown section 'monitor'"));
    }
}
