//! Settings sections bound from the `spring.dubbo` configuration namespace.
//!
//! Every field is optional: `None` means the operator did not specify the key, which
//! is distinct from specifying a zero value. Provider and Consumer aggregate shared
//! tiers (interface, service, reference) into one flat struct each, so a key like
//! `spring.dubbo.provider.timeout` binds directly without nested tables.

use crate::constants::ROOT_PREFIX;
use serde::Deserialize;

/// Static schema of a configuration section.
pub trait Section {
    /// Section name directly below [`ROOT_PREFIX`].
    const NAME: &'static str;

    /// Every configuration key the section accepts, tier by tier.
    const FIELDS: &'static [&'static str];

    /// Keys grouped by the tier that declares them, most specific tier first.
    const TIERS: &'static [(&'static str, &'static [&'static str])];

    /// Returns `true` when none of the section's keys was supplied.
    fn is_empty(&self) -> bool;

    /// Fully qualified key for `field`, e.g. `spring.dubbo.protocol.port`.
    #[must_use]
    fn key(field: &str) -> String {
        format!("{ROOT_PREFIX}.{}.{field}", Self::NAME)
    }
}

macro_rules! section {
    (
        $(#[$meta:meta])*
        $name:ident => $section:tt;
        $( [$tier:tt] {
            $( $(#[$fmeta:meta])* $field:ident: $ty:ty => $key:tt ),* $(,)?
        } )+
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $($(
                $(#[$fmeta])*
                #[serde(rename = $key)]
                pub $field: Option<$ty>,
            )*)+
        }

        impl Section for $name {
            const NAME: &'static str = $section;
            const FIELDS: &'static [&'static str] = &[$($($key,)*)+];
            const TIERS: &'static [(&'static str, &'static [&'static str])] =
                &[$(($tier, &[$($key),*])),+];

            fn is_empty(&self) -> bool {
                [$($(self.$field.is_none(),)*)+].into_iter().all(|unset| unset)
            }
        }
    };
}

/// Appends the interface tier shared by providers and consumers.
macro_rules! interface_tier {
    ($($head:tt)*) => {
        section! {
            $($head)*
            ["interface"] {
                /// Remote call timeout in milliseconds.
                timeout: i32 => "timeout",
                /// Retries after the first failed attempt.
                retries: i32 => "retries",
                /// Maximum concurrent calls per method.
                actives: i32 => "actives",
                loadbalance: String => "loadbalance",
                is_async: bool => "async",
                /// Wait for the message to be sent before returning.
                sent: bool => "sent",
                mock: String => "mock",
                merger: String => "merger",
                cache: String => "cache",
                validation: String => "validation",
                local: String => "local",
                stub: String => "stub",
                proxy: String => "proxy",
                cluster: String => "cluster",
                filter: String => "filter",
                listener: String => "listener",
                owner: String => "owner",
                /// Connections per remote address.
                connections: i32 => "connections",
                layer: String => "layer",
                callbacks: i32 => "callbacks",
                scope: String => "scope",
            }
        }
    };
}

/// Appends the service tier, then the interface tier.
macro_rules! service_tier {
    ($($head:tt)*) => {
        interface_tier! {
            $($head)*
            ["service"] {
                version: String => "version",
                group: String => "group",
                deprecated: bool => "deprecated",
                /// Export delay in milliseconds.
                delay: i32 => "delay",
                export: bool => "export",
                weight: i32 => "weight",
                document: String => "document",
                /// Register as a dynamic (vs. static) service.
                dynamic: bool => "dynamic",
                token: String => "token",
                accesslog: String => "accesslog",
                /// Maximum concurrent executions per method.
                executes: i32 => "executes",
                register: bool => "register",
            }
        }
    };
}

/// Appends the reference tier, then the interface tier.
macro_rules! reference_tier {
    ($($head:tt)*) => {
        interface_tier! {
            $($head)*
            ["reference"] {
                /// Fail at startup when no provider is available.
                check: bool => "check",
                init: bool => "init",
                generic: String => "generic",
                /// Deprecated; accepted and forwarded only.
                injvm: bool => "injvm",
                lazy: bool => "lazy",
                reconnect: String => "reconnect",
                sticky: bool => "sticky",
                stubevent: bool => "stubevent",
                version: String => "version",
                group: String => "group",
            }
        }
    };
}

section! {
    /// Annotation scanning settings.
    AnnotationSection => "annotation";
    ["annotation"] {
        /// Comma-separated list of packages to scan.
        package: String => "package",
    }
}

section! {
    /// Application identity.
    ApplicationSection => "application";
    ["application"] {
        name: String => "name",
        version: String => "version",
        owner: String => "owner",
        organization: String => "organization",
        architecture: String => "architecture",
        /// Deployment environment, e.g. `dev`, `test`, `run`.
        environment: String => "environment",
        compiler: String => "compiler",
        logger: String => "logger",
        is_default: bool => "isDefault",
    }
}

section! {
    /// Module identity within an application.
    ModuleSection => "module";
    ["module"] {
        name: String => "name",
        version: String => "version",
        owner: String => "owner",
        organization: String => "organization",
        is_default: bool => "isDefault",
    }
}

section! {
    /// Registry connection settings.
    RegistrySection => "registry";
    ["registry"] {
        /// Registry location, e.g. `zookeeper://127.0.0.1:2181`. Presence is checked, syntax is not.
        address: String => "address",
        username: String => "username",
        password: String => "password",
        port: i32 => "port",
        protocol: String => "protocol",
        transporter: String => "transporter",
        server: String => "server",
        client: String => "client",
        cluster: String => "cluster",
        group: String => "group",
        version: String => "version",
        timeout: i32 => "timeout",
        session: i32 => "session",
        /// File caching the dynamic registry list.
        file: String => "file",
        /// Deprecated; accepted and forwarded only.
        wait: i32 => "wait",
        check: bool => "check",
        dynamic: bool => "dynamic",
        register: bool => "register",
        subscribe: bool => "subscribe",
        is_default: bool => "isDefault",
    }
}

section! {
    /// Wire protocol settings.
    ProtocolSection => "protocol";
    ["protocol"] {
        name: String => "name",
        host: String => "host",
        port: i32 => "port",
        contextpath: String => "contextpath",
        threadpool: String => "threadpool",
        threads: i32 => "threads",
        iothreads: i32 => "iothreads",
        queues: i32 => "queues",
        accepts: i32 => "accepts",
        codec: String => "codec",
        serialization: String => "serialization",
        charset: String => "charset",
        /// Maximum request payload in bytes.
        payload: i32 => "payload",
        buffer: i32 => "buffer",
        heartbeat: i32 => "heartbeat",
        accesslog: String => "accesslog",
        transporter: String => "transporter",
        exchanger: String => "exchanger",
        dispatcher: String => "dispatcher",
        networker: String => "networker",
        server: String => "server",
        client: String => "client",
        telnet: String => "telnet",
        prompt: String => "prompt",
        status: String => "status",
        register: bool => "register",
        keep_alive: bool => "keepAlive",
        optimizer: String => "optimizer",
        extension: String => "extension",
        is_default: bool => "isDefault",
    }
}

service_tier! {
    /// Defaults applied to every exported service.
    ProviderSection => "provider";
    ["provider"] {
        host: String => "host",
        port: i32 => "port",
        contextpath: String => "contextpath",
        threadpool: String => "threadpool",
        threads: i32 => "threads",
        iothreads: i32 => "iothreads",
        queues: i32 => "queues",
        accepts: i32 => "accepts",
        codec: String => "codec",
        serialization: String => "serialization",
        charset: String => "charset",
        payload: i32 => "payload",
        buffer: i32 => "buffer",
        transporter: String => "transporter",
        exchanger: String => "exchanger",
        dispatcher: String => "dispatcher",
        networker: String => "networker",
        server: String => "server",
        client: String => "client",
        telnet: String => "telnet",
        prompt: String => "prompt",
        status: String => "status",
        /// Graceful shutdown wait in milliseconds.
        wait: i32 => "wait",
    }
}

reference_tier! {
    /// Defaults applied to every service reference.
    ConsumerSection => "consumer";
    ["consumer"] {
        is_default: bool => "isDefault",
    }
}

/// The whole `spring.dubbo` tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DubboxProperties {
    pub annotation: AnnotationSection,
    pub application: ApplicationSection,
    pub module: ModuleSection,
    pub registry: RegistrySection,
    pub protocol: ProtocolSection,
    pub provider: ProviderSection,
    pub consumer: ConsumerSection,
}

impl DubboxProperties {
    /// Every section name with the keys it accepts, in wiring order.
    pub const SECTIONS: &'static [(&'static str, &'static [&'static str])] = &[
        (AnnotationSection::NAME, AnnotationSection::FIELDS),
        (ApplicationSection::NAME, ApplicationSection::FIELDS),
        (ModuleSection::NAME, ModuleSection::FIELDS),
        (RegistrySection::NAME, RegistrySection::FIELDS),
        (ProtocolSection::NAME, ProtocolSection::FIELDS),
        (ProviderSection::NAME, ProviderSection::FIELDS),
        (ConsumerSection::NAME, ConsumerSection::FIELDS),
    ];

    /// Canonical spelling of `section.field`.
    ///
    /// Matching ignores ASCII case, `_` and `-`, so `CONSUMER`/`IS_DEFAULT` and
    /// `protocol`/`keepalive` resolve to `consumer`/`isDefault` and `protocol`/`keepAlive`.
    /// Returns `None` for keys no section declares.
    #[must_use]
    pub fn canonical_field(section: &str, field: &str) -> Option<(&'static str, &'static str)> {
        let (name, fields) = Self::SECTIONS.iter().find(|(name, _)| loosely_eq(name, section))?;
        let field = fields.iter().find(|key| loosely_eq(key, field))?;
        Some((*name, *field))
    }
}

fn loosely_eq(canonical: &str, candidate: &str) -> bool {
    let mut candidate = candidate.chars().filter(|c| !matches!(c, '_' | '-'));
    canonical.chars().all(|c| candidate.next().is_some_and(|other| c.eq_ignore_ascii_case(&other)))
        && candidate.next().is_none()
}
