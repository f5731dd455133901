use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
    pub gateway: GatewayConfig,
    pub media: MediaConfig,
    pub smtp: SmtpConfig,
}

/// Payment-gateway credentials and the redirect endpoints baked into every
/// checkout session.
#[derive(Clone)]
pub struct GatewayConfig {
    pub secret_key: String,
    pub base_url: String,
    pub client_url: String,
}

#[derive(Clone)]
pub struct MediaConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "debug".into());
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000);

        let gateway = GatewayConfig {
            secret_key: env::var("GATEWAY_SECRET_KEY")
                .expect("GATEWAY_SECRET_KEY should be provided"),
            base_url: env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".into()),
            client_url: env::var("CLIENT_URL").expect("CLIENT_URL should be provided"),
        };

        let media = MediaConfig {
            base_url: env::var("MEDIA_BASE_URL").expect("MEDIA_BASE_URL should be provided"),
            api_key: env::var("MEDIA_API_KEY").expect("MEDIA_API_KEY should be provided"),
        };

        let smtp = SmtpConfig {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            username: env::var("EMAIL").expect("EMAIL should be provided"),
            password: env::var("EMAIL_PASSWORD").expect("EMAIL_PASSWORD should be provided"),
        };

        Ok(Self {
            database_url,
            rust_log,
            port,
            gateway,
            media,
            smtp,
        })
    }
}
