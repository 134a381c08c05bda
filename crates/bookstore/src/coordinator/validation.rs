//! Purchase request validation.

use super::TransactionError;

/// "Buy `quantity` copies of `title` for `client_name`."
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub title: String,
    pub quantity: u32,
    pub client_name: String,
}

impl PurchaseRequest {
    /// Builds a validated request. Surrounding whitespace is trimmed from both names.
    pub fn new(
        title: impl Into<String>,
        quantity: i32,
        client_name: impl Into<String>,
    ) -> Result<Self, TransactionError> {
        let quantity = u32::try_from(quantity).map_err(|_| {
            TransactionError::InvalidRequest(format!("quantity must be positive, got {quantity}"))
        })?;
        let request = Self {
            title: title.into().trim().to_string(),
            quantity,
            client_name: client_name.into().trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.title.trim().is_empty() {
            return Err(TransactionError::InvalidRequest("title is empty".to_string()));
        }
        if self.client_name.trim().is_empty() {
            return Err(TransactionError::InvalidRequest(
                "client name is empty".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(TransactionError::InvalidRequest(
                "quantity must be positive, got 0".to_string(),
            ));
        }
        Ok(())
    }
}
