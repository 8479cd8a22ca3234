use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use receipt_repo::catalog_repo::CatalogRepoError;
use receipt_repo::receipt_repo::ReceiptRepoError;
use receipt_repo::report_repo::ReportRepoError;
use receipt_repo::user_repo::UserRepoError;
use thiserror::Error;
use tracing::error;

/// Translates repo failures into HTTP statuses. Anything unclassified is a
/// 500 and gets logged; the body never carries storage details.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Receipt(#[from] ReceiptRepoError),
    #[error(transparent)]
    Catalog(#[from] CatalogRepoError),
    #[error(transparent)]
    Report(#[from] ReportRepoError),
    #[error(transparent)]
    User(#[from] UserRepoError),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::Receipt(ReceiptRepoError::ReceiptNotFound(_)) => StatusCode::NOT_FOUND,
            HandlerError::Receipt(ReceiptRepoError::MissingReference(_)) => StatusCode::BAD_REQUEST,
            HandlerError::Catalog(CatalogRepoError::CategoryNotFound(_))
            | HandlerError::Catalog(CatalogRepoError::VendorNotFound(_))
            | HandlerError::Catalog(CatalogRepoError::PaymentMethodNotFound(_))
            | HandlerError::Catalog(CatalogRepoError::TagNotFound(_)) => StatusCode::NOT_FOUND,
            HandlerError::Catalog(CatalogRepoError::DuplicateCategory(_))
            | HandlerError::Catalog(CatalogRepoError::StillReferenced { .. }) => {
                StatusCode::CONFLICT
            }
            HandlerError::Report(ReportRepoError::InvalidDateRange { .. }) => {
                StatusCode::BAD_REQUEST
            }
            HandlerError::User(UserRepoError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            HandlerError::User(UserRepoError::UsernameTaken(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status_code = self.status_code();
        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            error!(%self, "Request failed");
            return HttpResponse::InternalServerError().finish();
        }
        HttpResponse::build(status_code).json(serde_json::json!({
            "error": format!("{}", self),
        }))
    }
}
