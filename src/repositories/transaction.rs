//! # Transaction Repository
//!
//! Merchant-scoped transaction records. Every query and mutation carries the
//! owning merchant id in the same predicate as the row id, so a foreign id
//! can never be read or touched.

use crate::error::RepositoryError;
use crate::models::transaction::{
    ActiveModel as TransactionActiveModel, Column, Entity as Transaction, Model as TransactionModel,
    TransactionStatus,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use uuid::Uuid;

/// Request data for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionRequest {
    /// Amount in minor currency units
    pub amount: i64,
    /// ISO-4217 currency code
    pub currency: String,
    /// Initial status
    pub status: TransactionStatus,
    /// Payment method label such as "card"
    pub payment_method: Option<String>,
    /// Customer email for receipts
    pub customer_email: Option<String>,
    /// Free-form metadata
    pub metadata: Option<Value>,
}

/// Repository for Transaction database operations
pub struct TransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionRepository<'a, C> {
    /// Create a new TransactionRepository with the given connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// List a merchant's transactions, newest first
    pub async fn list_for_merchant(
        &self,
        merchant_id: Uuid,
    ) -> Result<Vec<TransactionModel>, RepositoryError> {
        let transactions = Transaction::find()
            .filter(Column::MerchantId.eq(merchant_id))
            .order_by_desc(Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(transactions)
    }

    /// Record a transaction for the merchant
    pub async fn create_transaction(
        &self,
        merchant_id: Uuid,
        request: CreateTransactionRequest,
    ) -> Result<TransactionModel, RepositoryError> {
        let transaction = TransactionActiveModel {
            id: Set(Uuid::new_v4()),
            merchant_id: Set(merchant_id),
            amount: Set(request.amount),
            currency: Set(request.currency),
            status: Set(request.status),
            payment_method: Set(request.payment_method),
            customer_email: Set(request.customer_email),
            metadata: Set(request.metadata),
            created_at: Set(Utc::now().into()),
        };

        let result = transaction.insert(self.db).await?;
        Ok(result)
    }

    /// Update the status of one of the merchant's transactions
    pub async fn update_status(
        &self,
        merchant_id: Uuid,
        transaction_id: Uuid,
        status: TransactionStatus,
    ) -> Result<TransactionModel, RepositoryError> {
        let update = TransactionActiveModel {
            status: Set(status),
            ..Default::default()
        };

        let result = Transaction::update_many()
            .set(update)
            .filter(Column::Id.eq(transaction_id))
            .filter(Column::MerchantId.eq(merchant_id))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("transaction"));
        }

        Transaction::find_by_id(transaction_id)
            .one(self.db)
            .await?
            .ok_or(RepositoryError::NotFound("transaction"))
    }
}
