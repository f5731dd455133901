use reqwest;
use serde::Deserialize;

use crate::config::GatewayConfig;

/// Thin client over the hosted-checkout payment gateway. One customer and
/// one checkout session are created per booking attempt; the session's
/// redirect URL is handed straight back to the frontend.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Debug, Deserialize)]
pub struct Customer {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Line item and metadata for one checkout session. Unit price is in major
/// units; the gateway wants minor units, converted at the wire boundary.
pub struct CheckoutRequest {
    pub product_name: String,
    pub product_description: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub platform_fee: f64,
    pub final_amount: f64,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn create_customer(&self, email: &str) -> Result<Customer, reqwest::Error> {
        let params = [
            ("name", email),
            ("address[line1]", "India"),
            ("address[postal_code]", "585101"),
            ("address[city]", "Kalaburagi"),
            ("address[state]", "KA"),
            ("address[country]", "US"),
        ];

        self.http
            .post(format!("{}/v1/customers", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Customer>()
            .await
    }

    pub async fn create_checkout_session(
        &self,
        customer: &Customer,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, reqwest::Error> {
        let unit_amount = (request.unit_price * 100.0) as i64;
        let params = [
            ("payment_method_types[0]", "card".to_string()),
            ("mode", "payment".to_string()),
            ("line_items[0][price_data][currency]", "inr".to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                request.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                request.product_description.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                unit_amount.to_string(),
            ),
            ("line_items[0][quantity]", request.quantity.to_string()),
            (
                "metadata[platformFee]",
                format!("{:.2}", request.platform_fee),
            ),
            (
                "metadata[finalAmount]",
                format!("{:.2}", request.final_amount),
            ),
            (
                "success_url",
                format!(
                    "{}/payment/success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.config.client_url
                ),
            ),
            (
                "cancel_url",
                format!("{}/payment/cancel", self.config.client_url),
            ),
            ("customer", customer.id.clone()),
        ];

        self.http
            .post(format!("{}/v1/checkout/sessions", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<CheckoutSession>()
            .await
    }
}
