//! Environment-derived server configuration.

use std::env;

use fieldset_admin::FieldAdminConfig;
use fieldset_db::DbConfig;

fn env_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

/// Full configuration for the fieldset server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    pub db: DbConfig,
    pub admin: FieldAdminConfig,
}

impl ServerConfig {
    /// Assemble the configuration from `FIELDSET_*` environment
    /// variables, falling back to development defaults.
    pub fn from_env() -> Self {
        let db_defaults = DbConfig::default();
        let admin_defaults = FieldAdminConfig::default();

        Self {
            listen_addr: env_str("FIELDSET_LISTEN_ADDR", "127.0.0.1:5000"),
            db: DbConfig {
                url: env_str("FIELDSET_DB_URL", &db_defaults.url),
                namespace: env_str("FIELDSET_DB_NAMESPACE", &db_defaults.namespace),
                database: env_str("FIELDSET_DB_DATABASE", &db_defaults.database),
                username: env_str("FIELDSET_DB_USERNAME", &db_defaults.username),
                password: env_str("FIELDSET_DB_PASSWORD", &db_defaults.password),
            },
            admin: FieldAdminConfig {
                default_org_id: env_i64("FIELDSET_DEFAULT_ORG_ID", admin_defaults.default_org_id),
                custom_field_limit: env_u32(
                    "FIELDSET_CUSTOM_FIELD_LIMIT",
                    admin_defaults.custom_field_limit,
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(env_str("FIELDSET_TEST_UNSET_STR", "fallback"), "fallback");
        assert_eq!(env_i64("FIELDSET_TEST_UNSET_I64", 7), 7);
        assert_eq!(env_u32("FIELDSET_TEST_UNSET_U32", 11), 11);
    }
}
