use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Domain suffix appended to logins when deriving corporate mailboxes.
    pub corporate_email_domain: String,
    /// Default country calling code applied when normalizing phone numbers.
    pub phone_country_code: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/staffpoint".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let corporate_email_domain =
            env::var("CORPORATE_EMAIL_DOMAIN").unwrap_or_else(|_| "staffpoint.team".to_string());

        let phone_country_code =
            env::var("PHONE_COUNTRY_CODE").unwrap_or_else(|_| "7".to_string());

        Ok(Config {
            database_url,
            bind_addr,
            corporate_email_domain,
            phone_country_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        let config = Config::load().expect("load config");
        assert!(!config.corporate_email_domain.is_empty());
        assert!(!config.phone_country_code.is_empty());
        assert!(config.bind_addr.contains(':'));
    }
}
