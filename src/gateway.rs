use std::collections::HashMap;

use async_trait::async_trait;

use crate::amount::{Amount, Currency};
use crate::errors::Result;

/// request to raise a trackable charge intent with the payment processor
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentRequest {
    /// total to charge now, in minor units
    pub amount: Amount,
    pub currency: Currency,
    /// suffix for the donor's card statement line
    pub statement_descriptor_suffix: Option<String>,
    /// opaque reconciliation keys attached to the intent
    pub metadata: HashMap<String, String>,
    /// request capability to charge the same card off-session later;
    /// set for recurring donations
    pub off_session_setup: bool,
}

/// processor-assigned intent
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    /// processor id, recorded as the payment's reference
    pub id: String,
    /// secret the client uses to complete the charge; a missing secret
    /// indicates a misconfigured integration
    pub client_secret: Option<String>,
}

/// abstraction over the external payment processor
#[async_trait]
pub trait PaymentIntentGateway: Send + Sync {
    async fn create_intent(&self, request: PaymentIntentRequest) -> Result<PaymentIntent>;
}

#[async_trait]
impl<T: PaymentIntentGateway + ?Sized> PaymentIntentGateway for std::sync::Arc<T> {
    async fn create_intent(&self, request: PaymentIntentRequest) -> Result<PaymentIntent> {
        self.as_ref().create_intent(request).await
    }
}
