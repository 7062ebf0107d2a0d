use dbx_kernel::config::{ConfigError, PropertiesLoader};
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const BASE: &str = r#"
[spring.dubbo.application]
name = "svc-a"
owner = "platform"
isDefault = true

[spring.dubbo.registry]
address = "zookeeper://127.0.0.1:2181"
timeout = 5000

[spring.dubbo.protocol]
name = "dubbox"
port = 20880

[spring.dubbo.provider]
timeout = 3000
"#;

fn write_config(name: &str, body: &str) -> Result<(TempDir, PathBuf), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join(name);
    fs::write(&path, body)?;
    Ok((dir, path))
}

#[test]
fn toml_file_binds_sections() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_config("dubbox.toml", BASE)?;

    let props = PropertiesLoader::new().file(&path).without_env().load()?;

    assert_eq!(props.application.name.as_deref(), Some("svc-a"));
    assert_eq!(props.application.owner.as_deref(), Some("platform"));
    assert_eq!(props.application.is_default, Some(true));
    assert_eq!(props.registry.timeout, Some(5000));
    assert_eq!(props.protocol.port, Some(20880));
    assert_eq!(props.provider.timeout, Some(3000));
    assert!(props.module.name.is_none());
    assert!(props.consumer.check.is_none());
    Ok(())
}

#[test]
fn yaml_file_binds_sections() -> Result<(), Box<dyn std::error::Error>> {
    let body = "spring:\n  dubbo:\n    module:\n      name: billing\n    consumer:\n      retries: 0\n";
    let (_dir, path) = write_config("dubbox.yaml", body)?;

    let props = PropertiesLoader::new().file(&path).without_env().load()?;

    assert_eq!(props.module.name.as_deref(), Some("billing"));
    assert_eq!(props.consumer.retries, Some(0));
    Ok(())
}

#[test]
fn environment_overrides_file_and_coerces_scalars() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_config("dubbox.toml", BASE)?;

    let props = PropertiesLoader::new()
        .file(&path)
        .env_vars([
            ("SPRING__DUBBO__PROTOCOL__PORT", "20881"),
            ("SPRING__DUBBO__REGISTRY__CHECK", "false"),
            ("SPRING__DUBBO__CONSUMER__ISDEFAULT", "true"),
            ("UNRELATED__PROTOCOL__PORT", "1"),
        ])
        .load()?;

    assert_eq!(props.protocol.port, Some(20881));
    assert_eq!(props.registry.check, Some(false));
    assert_eq!(props.consumer.is_default, Some(true));
    assert_eq!(props.protocol.name.as_deref(), Some("dubbox"));
    Ok(())
}

#[test]
fn overrides_win_over_environment() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_config("dubbox.toml", BASE)?;

    let props = PropertiesLoader::new()
        .file(&path)
        .env_vars([("SPRING__DUBBO__PROTOCOL__PORT", "20881")])
        .set("protocol.port", "20882")
        .set_pair("spring.dubbo.provider.delay=-1")?
        .load()?;

    assert_eq!(props.protocol.port, Some(20882));
    assert_eq!(props.provider.delay, Some(-1));
    Ok(())
}

#[test]
fn later_files_override_earlier_ones() -> Result<(), Box<dyn std::error::Error>> {
    let (_base_dir, base) = write_config("base.toml", BASE)?;
    let (_local_dir, local) =
        write_config("local.toml", "[spring.dubbo.application]\nname = \"svc-b\"\n")?;

    let props = PropertiesLoader::new().file(&base).optional_file(&local).without_env().load()?;

    assert_eq!(props.application.name.as_deref(), Some("svc-b"));
    assert_eq!(props.application.owner.as_deref(), Some("platform"));
    Ok(())
}

#[test]
fn missing_optional_file_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let props = PropertiesLoader::new()
        .optional_file(dir.path().join("absent.toml"))
        .without_env()
        .set("registry.address", "N/A")
        .load()?;

    assert_eq!(props.registry.address.as_deref(), Some("N/A"));
    Ok(())
}

#[test]
fn missing_required_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let err = PropertiesLoader::new()
        .file(dir.path().join("absent.toml"))
        .without_env()
        .load()
        .expect_err("required file must exist");

    assert!(matches!(err, ConfigError::Config { .. }));
    Ok(())
}

#[test]
fn malformed_scalar_is_an_error() {
    let err = PropertiesLoader::new()
        .without_env()
        .set("protocol.port", "not-a-port")
        .load()
        .expect_err("port must be an integer");

    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("spring.dubbo"), "unexpected message: {err}");
}

const CAMEL_CASE: &str = r#"
[spring.dubbo.consumer]
isDefault = true

[spring.dubbo.protocol]
name = "dubbox"
keepAlive = true
isDefault = true
"#;

#[test]
fn environment_overrides_camel_case_file_keys() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_config("dubbox.toml", CAMEL_CASE)?;

    let props = PropertiesLoader::new()
        .file(&path)
        .env_vars([
            ("SPRING__DUBBO__CONSUMER__ISDEFAULT", "false"),
            ("SPRING__DUBBO__PROTOCOL__KEEPALIVE", "false"),
        ])
        .load()?;

    assert_eq!(props.consumer.is_default, Some(false));
    assert_eq!(props.protocol.keep_alive, Some(false));
    assert_eq!(props.protocol.is_default, Some(true));
    Ok(())
}

#[test]
fn overrides_in_any_spelling_replace_file_keys() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_config("dubbox.toml", CAMEL_CASE)?;

    let props = PropertiesLoader::new()
        .file(&path)
        .without_env()
        .set("protocol.isdefault", "false")
        .set_pair("spring.dubbo.protocol.keep_alive=false")?
        .load()?;

    assert_eq!(props.protocol.is_default, Some(false));
    assert_eq!(props.protocol.keep_alive, Some(false));
    assert_eq!(props.consumer.is_default, Some(true));
    Ok(())
}

#[test]
fn lowercase_file_keys_bind_to_camel_case_fields() -> Result<(), Box<dyn std::error::Error>> {
    let (_base_dir, base) = write_config("base.toml", CAMEL_CASE)?;
    let (_local_dir, local) = write_config(
        "local.yaml",
        "spring:\n  dubbo:\n    registry:\n      isdefault: true\n    protocol:\n      keepalive: false\n",
    )?;

    let props = PropertiesLoader::new().file(&base).file(&local).without_env().load()?;

    assert_eq!(props.registry.is_default, Some(true));
    assert_eq!(props.protocol.keep_alive, Some(false));
    Ok(())
}

#[test]
fn keys_outside_the_namespace_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) =
        write_config("app.toml", "[server]\nport = 8080\n\n[spring.dubbo.application]\nname = \"svc-a\"\n")?;

    let props = PropertiesLoader::new()
        .file(&path)
        .env_vars([("SPRING__PROFILES__ACTIVE", "dev")])
        .load()?;

    assert_eq!(props.application.name.as_deref(), Some("svc-a"));
    Ok(())
}
