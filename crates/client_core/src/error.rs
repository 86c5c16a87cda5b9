use std::fmt;

use shared::{
    domain::OrderId,
    error::{ApiError, ErrorCode},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mutation::Create => "create",
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch cocktails: {0}")]
    FetchFailed(String),
    #[error("failed to {action} cocktail: {reason}")]
    MutationFailed { action: Mutation, reason: String },
    #[error("invalid cocktail draft: {0}")]
    InvalidDraft(String),
    #[error("a catalog request is still in progress")]
    Busy,
}

impl CatalogError {
    pub(crate) fn fetch(err: anyhow::Error) -> Self {
        Self::FetchFailed(format!("{err:#}"))
    }

    pub(crate) fn mutation(action: Mutation, err: anyhow::Error) -> Self {
        Self::MutationFailed {
            action,
            reason: format!("{err:#}"),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::FetchFailed(_) => ErrorCode::FetchFailed,
            CatalogError::MutationFailed { .. } => ErrorCode::MutationFailed,
            CatalogError::InvalidDraft(_) => ErrorCode::InvalidDraft,
            CatalogError::Busy => ErrorCode::Busy,
        }
    }
}

impl From<&CatalogError> for ApiError {
    fn from(value: &CatalogError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    UnknownOrder(OrderId),
    #[error("order {order_id} cannot be approved for delivery to {location}")]
    IneligibleLocation { order_id: OrderId, location: String },
}

impl OrderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::UnknownOrder(_) => ErrorCode::UnknownOrder,
            OrderError::IneligibleLocation { .. } => ErrorCode::IneligibleLocation,
        }
    }
}

impl From<&OrderError> for ApiError {
    fn from(value: &OrderError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}
