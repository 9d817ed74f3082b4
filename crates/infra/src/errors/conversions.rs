//! Conversions from external infrastructure errors into domain errors.

use axle_domain::AxleError;
use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AxleError);

impl From<InfraError> for AxleError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AxleError> for InfraError {
    fn from(value: AxleError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAxleError {
    fn into_axle(self) -> AxleError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → AxleError */
/* -------------------------------------------------------------------------- */

impl IntoAxleError for SqlError {
    fn into_axle(self) -> AxleError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        AxleError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        AxleError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        AxleError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        AxleError::Database("foreign key constraint violation".into())
                    }
                    _ => AxleError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => AxleError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                AxleError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                AxleError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => AxleError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidParameterName(parameter_name) => {
                AxleError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => {
                AxleError::Database(format!("invalid database path: {}", path.to_string_lossy()))
            }
            RE::InvalidQuery => AxleError::Database("invalid SQL query".into()),
            other => AxleError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_axle())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → AxleError */
/* -------------------------------------------------------------------------- */

impl IntoAxleError for PoolError {
    fn into_axle(self) -> AxleError {
        AxleError::Database(format!("connection pool error: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_axle())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
