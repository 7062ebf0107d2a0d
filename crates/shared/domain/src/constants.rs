/// Root prefix of every configuration key.
pub const ROOT_PREFIX: &str = "spring.dubbo";

/// Environment variable prefix; `SPRING__DUBBO__PROTOCOL__PORT` maps to `spring.dubbo.protocol.port`.
pub const ENV_PREFIX: &str = "SPRING";

/// Separator between key segments in environment variable names.
pub const ENV_SEPARATOR: &str = "__";
