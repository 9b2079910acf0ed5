// 💳 Donations - order creation + hosted checkout options
//
// Two-call handshake:
// 1. Server creates an order at the gateway (amount in paise)
// 2. Client opens the hosted checkout widget with the returned order id

use crate::config::{http_client, DEFAULT_HTTP_TIMEOUT};
use crate::error::{NamvedaError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest accepted donation, in whole rupees
pub const MIN_DONATION_RUPEES: u64 = 10;
pub const DONATION_CURRENCY: &str = "INR";
pub const MERCHANT_NAME: &str = "Namveda";
pub const THEME_COLOR: &str = "#a855f7";

pub const DEFAULT_RAZORPAY_URL: &str = "https://api.razorpay.com/v1";

// ============================================================================
// REQUEST / ORDER TYPES
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    /// Whole rupees
    pub amount: u64,

    #[serde(default)]
    pub donor_name: Option<String>,

    #[serde(default)]
    pub donor_email: Option<String>,
}

impl DonationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.amount < MIN_DONATION_RUPEES {
            return Err(NamvedaError::validation(format!(
                "Please enter an amount of at least ₹{}.",
                MIN_DONATION_RUPEES
            )));
        }
        Ok(())
    }

    /// Amount in the currency's smallest unit (paise)
    pub fn amount_minor(&self) -> Result<u64> {
        self.amount
            .checked_mul(100)
            .ok_or_else(|| NamvedaError::validation("donation amount is too large"))
    }
}

/// What we ask the gateway to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Paise
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

impl OrderRequest {
    pub fn for_donation(donation: &DonationRequest) -> Result<Self> {
        donation.validate()?;
        Ok(OrderRequest {
            amount: donation.amount_minor()?,
            currency: DONATION_CURRENCY.to_string(),
            receipt: new_receipt_id(),
        })
    }
}

/// `receipt_order_` plus a short random suffix
pub fn new_receipt_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("receipt_order_{}", &suffix[..8])
}

/// Order as echoed by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: u64,
    pub currency: String,

    #[serde(default)]
    pub receipt: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// CHECKOUT OPTIONS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPrefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTheme {
    pub color: String,
}

/// Options handed to the hosted checkout widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Public key id (never the secret)
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: CheckoutPrefill,
    pub theme: CheckoutTheme,
}

impl CheckoutOptions {
    pub fn new(public_key: &str, order: &Order, donation: &DonationRequest) -> Self {
        CheckoutOptions {
            key: public_key.to_string(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_string(),
            description: "Donation".to_string(),
            order_id: order.id.clone(),
            prefill: CheckoutPrefill {
                name: donation.donor_name.clone().filter(|n| !n.trim().is_empty()),
                email: donation.donor_email.clone().filter(|e| !e.trim().is_empty()),
            },
            theme: CheckoutTheme {
                color: THEME_COLOR.to_string(),
            },
        }
    }
}

// ============================================================================
// GATEWAY
// ============================================================================

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order>;
}

pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::with_timeout(base_url, key_id, key_secret, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(RazorpayClient {
            http: http_client(timeout)?,
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        })
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order> {
        let response = self
            .http
            .post(self.orders_url())
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| NamvedaError::Payment(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NamvedaError::Payment(format!(
                "gateway returned HTTP {}: {}",
                status, body
            )));
        }

        response
            .json::<Order>()
            .await
            .map_err(|e| NamvedaError::Payment(format!("unreadable order: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationOrder {
    pub order: Order,
    pub checkout: CheckoutOptions,
}

/// Validate, create the order, and build checkout options for the widget
pub async fn create_donation_order(
    gateway: &dyn PaymentGateway,
    public_key: &str,
    donation: &DonationRequest,
) -> Result<DonationOrder> {
    let request = OrderRequest::for_donation(donation)?;
    tracing::info!(amount = request.amount, receipt = %request.receipt, "creating donation order");

    let order = gateway.create_order(&request).await.map_err(|e| {
        tracing::error!(error = %e, "error creating donation order");
        e
    })?;

    if order.id.is_empty() {
        return Err(NamvedaError::Payment("gateway returned an order without id".to_string()));
    }

    let checkout = CheckoutOptions::new(public_key, &order, donation);
    Ok(DonationOrder { order, checkout })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Gateway that echoes the request back as an order
    pub(crate) struct EchoGateway {
        pub fail: bool,
        pub requests: Mutex<Vec<OrderRequest>>,
    }

    impl EchoGateway {
        pub(crate) fn new(fail: bool) -> Self {
            EchoGateway {
                fail,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for EchoGateway {
        async fn create_order(&self, request: &OrderRequest) -> Result<Order> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(NamvedaError::Payment("gateway down".to_string()));
            }
            Ok(Order {
                id: "order_test123".to_string(),
                amount: request.amount,
                currency: request.currency.clone(),
                receipt: Some(request.receipt.clone()),
                status: Some("created".to_string()),
            })
        }
    }

    #[test]
    fn test_minimum_donation() {
        let low = DonationRequest {
            amount: 9,
            ..Default::default()
        };
        assert!(low.validate().is_err());

        let ok = DonationRequest {
            amount: 10,
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_order_request_in_paise() {
        let donation = DonationRequest {
            amount: 500,
            ..Default::default()
        };
        let request = OrderRequest::for_donation(&donation).unwrap();

        assert_eq!(request.amount, 50_000);
        assert_eq!(request.currency, "INR");
        assert!(request.receipt.starts_with("receipt_order_"));
        assert_eq!(request.receipt.len(), "receipt_order_".len() + 8);
    }

    #[test]
    fn test_amount_overflow_rejected() {
        let donation = DonationRequest {
            amount: u64::MAX,
            ..Default::default()
        };
        assert!(donation.amount_minor().is_err());
    }

    #[test]
    fn test_orders_url() {
        let client = RazorpayClient::new("https://api.example.com/v1/", "id", "secret").unwrap();
        assert_eq!(client.orders_url(), "https://api.example.com/v1/orders");
    }

    #[tokio::test]
    async fn test_stalled_gateway_times_out() {
        let url = crate::generator::tests::silent_endpoint().await;
        let client =
            RazorpayClient::with_timeout(url, "id", "secret", Duration::from_millis(200)).unwrap();
        let request = OrderRequest::for_donation(&DonationRequest {
            amount: 100,
            ..Default::default()
        })
        .unwrap();

        let err = client.create_order(&request).await.unwrap_err();
        assert!(matches!(err, NamvedaError::Payment(_)));
    }

    #[tokio::test]
    async fn test_create_donation_order() {
        let gateway = EchoGateway::new(false);
        let donation = DonationRequest {
            amount: 100,
            donor_name: Some("Asha".to_string()),
            donor_email: Some(" ".to_string()),
        };

        let result = create_donation_order(&gateway, "rzp_test_public", &donation)
            .await
            .unwrap();

        assert_eq!(result.order.id, "order_test123");
        assert_eq!(result.checkout.key, "rzp_test_public");
        assert_eq!(result.checkout.amount, 10_000);
        assert_eq!(result.checkout.order_id, "order_test123");
        assert_eq!(result.checkout.name, "Namveda");
        assert_eq!(result.checkout.prefill.name.as_deref(), Some("Asha"));
        assert_eq!(result.checkout.prefill.email, None);
        assert_eq!(gateway.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let gateway = EchoGateway::new(true);
        let donation = DonationRequest {
            amount: 100,
            ..Default::default()
        };

        let err = create_donation_order(&gateway, "key", &donation).await.unwrap_err();
        assert!(matches!(err, NamvedaError::Payment(_)));
    }

    #[tokio::test]
    async fn test_invalid_donation_never_reaches_gateway() {
        let gateway = EchoGateway::new(false);
        let donation = DonationRequest {
            amount: 5,
            ..Default::default()
        };

        assert!(create_donation_order(&gateway, "key", &donation).await.is_err());
        assert!(gateway.requests.lock().unwrap().is_empty());
    }
}
