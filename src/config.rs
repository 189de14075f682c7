use serde::Deserialize;

/// SMTP relay settings for the contact-form mailer. When the credentials
/// are absent the mailer is constructed disabled and every dispatch fails.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub recipient: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// When set, POST /reviews runs behind the access-token gate;
    /// otherwise anonymous submissions are accepted.
    pub reviews_require_auth: bool,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/yogajuristen".into());
        let reviews_require_auth = std::env::var("REVIEWS_REQUIRE_AUTH")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASS").ok(),
            recipient: std::env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| "yogajuristen@gmail.com".into()),
        };
        Ok(Self {
            database_url,
            reviews_require_auth,
            smtp,
        })
    }
}
