use super::types::{Invoice, InvoiceStatus};
use crate::config::ServiceConfig;
use crate::error::PaymentError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Payment provider seam: create an invoice, poll its status.
pub trait PaymentGateway: Send + Sync {
    fn create_invoice(
        &self,
        amount_usd: f64,
        description: &str,
        payload: &str,
    ) -> Result<Invoice, PaymentError>;

    /// `None` when the provider does not know the invoice.
    fn invoice_status(&self, invoice_id: u64) -> Result<Option<InvoiceStatus>, PaymentError>;
}

/// Crypto Pay API client.
#[derive(Debug, Clone)]
pub struct CryptoPayClient {
    api_url: String,
    token: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiInvoice {
    invoice_id: u64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "bot_invoice_url")]
    pay_url: Option<String>,
    #[serde(default)]
    mini_app_invoice_url: Option<String>,
}

#[derive(Deserialize)]
struct ApiInvoiceList {
    #[serde(default)]
    items: Vec<ApiInvoice>,
}

impl CryptoPayClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Option<Self> {
        config.crypto_pay_token.as_ref().map(|token| {
            Self::new(
                config.crypto_pay_api_url.clone(),
                token.clone(),
                config.http_timeout,
            )
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<T, PaymentError> {
        let url = format!("{}/{}", self.api_url, method);
        let mut request = ureq::get(&url)
            .timeout(self.timeout)
            .set("Crypto-Pay-API-Token", &self.token);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response: ApiResponse<T> = request
            .call()
            .map_err(|e| PaymentError::Transport(e.to_string()))?
            .into_json()
            .map_err(|e| PaymentError::Malformed(e.to_string()))?;
        unwrap_response(response)
    }
}

fn unwrap_response<T>(response: ApiResponse<T>) -> Result<T, PaymentError> {
    if !response.ok {
        let reason = response
            .error
            .map_or_else(|| "unknown error".to_string(), |e| e.to_string());
        return Err(PaymentError::Rejected(reason));
    }
    response
        .result
        .ok_or_else(|| PaymentError::Malformed("missing result".to_string()))
}

fn parse_status(status: &str) -> Result<InvoiceStatus, PaymentError> {
    match status {
        "active" => Ok(InvoiceStatus::Active),
        "paid" => Ok(InvoiceStatus::Paid),
        "expired" => Ok(InvoiceStatus::Expired),
        other => Err(PaymentError::Malformed(format!("invoice status '{other}'"))),
    }
}

impl PaymentGateway for CryptoPayClient {
    fn create_invoice(
        &self,
        amount_usd: f64,
        description: &str,
        payload: &str,
    ) -> Result<Invoice, PaymentError> {
        let amount = amount_usd.to_string();
        let invoice: ApiInvoice = self.call(
            "createInvoice",
            &[
                ("currency_type", "fiat"),
                ("fiat", "USD"),
                ("amount", &amount),
                ("description", description),
                ("payload", payload),
            ],
        )?;
        let pay_url = invoice
            .pay_url
            .or(invoice.mini_app_invoice_url)
            .unwrap_or_default();
        Ok(Invoice {
            invoice_id: invoice.invoice_id,
            pay_url,
        })
    }

    fn invoice_status(&self, invoice_id: u64) -> Result<Option<InvoiceStatus>, PaymentError> {
        let id = invoice_id.to_string();
        let list: ApiInvoiceList = self.call("getInvoices", &[("invoice_ids", &id)])?;
        list.items
            .into_iter()
            .find(|item| item.invoice_id == invoice_id)
            .map(|item| parse_status(item.status.as_deref().unwrap_or_default()))
            .transpose()
    }
}
