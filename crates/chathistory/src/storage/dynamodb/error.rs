//! DynamoDB error mapping.
//!
//! Classifies AWS SDK errors into `StoreErrorKind` and wraps them, unchanged,
//! as the source of a `HistoryError::Store`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use chathistory_core::{HistoryError, StoreErrorKind};

/// Classify failures that never reached the service.
fn transport_kind<E, R>(err: &SdkError<E, R>) -> StoreErrorKind {
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => StoreErrorKind::Transport,
        _ => StoreErrorKind::Other,
    }
}

/// Map a GetItem SDK error to HistoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> HistoryError {
    let kind = match err.as_service_error() {
        Some(GetItemError::ResourceNotFoundException(_)) => StoreErrorKind::TableNotFound,
        Some(GetItemError::ProvisionedThroughputExceededException(_))
        | Some(GetItemError::RequestLimitExceeded(_)) => StoreErrorKind::Throttled,
        Some(GetItemError::InternalServerError(_)) => StoreErrorKind::Internal,
        Some(_) => StoreErrorKind::Other,
        None => transport_kind(&err),
    };
    HistoryError::store("GetItem", kind, err)
}

/// Map an UpdateItem SDK error to HistoryError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> HistoryError {
    let kind = match err.as_service_error() {
        Some(UpdateItemError::ResourceNotFoundException(_)) => StoreErrorKind::TableNotFound,
        Some(UpdateItemError::ProvisionedThroughputExceededException(_))
        | Some(UpdateItemError::RequestLimitExceeded(_)) => StoreErrorKind::Throttled,
        Some(UpdateItemError::TransactionConflictException(_)) => StoreErrorKind::Throttled,
        Some(UpdateItemError::InternalServerError(_)) => StoreErrorKind::Internal,
        Some(_) => StoreErrorKind::Other,
        None => transport_kind(&err),
    };
    HistoryError::store("UpdateItem", kind, err)
}

/// Map a DeleteTable SDK error to HistoryError.
pub fn map_delete_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteTableError, R>,
) -> HistoryError {
    let kind = match err.as_service_error() {
        Some(DeleteTableError::ResourceNotFoundException(_)) => StoreErrorKind::TableNotFound,
        Some(DeleteTableError::LimitExceededException(_)) => StoreErrorKind::Throttled,
        Some(DeleteTableError::InternalServerError(_)) => StoreErrorKind::Internal,
        Some(_) => StoreErrorKind::Other,
        None => transport_kind(&err),
    };
    HistoryError::store("DeleteTable", kind, err)
}
