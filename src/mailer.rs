use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    transport::smtp::authentication::Credentials,
};

use crate::config::SmtpConfig;
use crate::error::{AppError, AppResult};

/// SMTP relay used for one thing only: password-reset OTP mail.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.username.clone(),
        })
    }

    pub async fn send_otp(&self, to: &str, otp: &str) -> AppResult<()> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|_| AppError::Internal("invalid sender address".into()))?,
            )
            .to(to
                .parse()
                .map_err(|_| AppError::Internal("invalid recipient address".into()))?)
            .subject("Password Reset OTP")
            .body(format!("Your OTP is {otp}. It will expire in 5 minutes."))
            .map_err(|e| AppError::Internal(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(AppError::Mail)?;

        Ok(())
    }
}
