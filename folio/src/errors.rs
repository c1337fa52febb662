use crate::utils::logger::log_error;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum RedisError {
    PoolError(deadpool::managed::PoolError<redis::RedisError>),
    RedisError(redis::RedisError),
}

impl fmt::Display for RedisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedisError::PoolError(e) => write!(f, "Pool Error: {}", e),
            RedisError::RedisError(e) => write!(f, "Redis Error: {}", e),
        }
    }
}

impl Error for RedisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RedisError::PoolError(e) => Some(e),
            RedisError::RedisError(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub enum FolioError {
    // 400s
    ValidationError((String, String)),
    NotFound(String),
    // 500
    RedisError(RedisError),
    SerdeError(serde_json::Error),
    ConfigError(String),
    IoError(std::io::Error),
    ClientError(reqwest::Error),
    InternalServerError(String),
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolioError::ValidationError((field, message)) => {
                write!(f, "Validation Error: {}: {}", field, message)
            }
            FolioError::NotFound(e) => write!(f, "Not Found: {}", e),
            FolioError::RedisError(e) => write!(f, "Redis Error: \n{}", e),
            FolioError::SerdeError(e) => write!(f, "Serde Error: \n{}", e),
            FolioError::ConfigError(e) => write!(f, "Config Error: {}", e),
            FolioError::IoError(e) => write!(f, "IO Error: {}", e),
            FolioError::ClientError(e) => write!(f, "Client Error: {}", e),
            FolioError::InternalServerError(e) => write!(f, "InternalServerError: \n{}", e),
        }
    }
}

impl Error for FolioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FolioError::ValidationError(_) => None,
            FolioError::NotFound(_) => None,
            FolioError::RedisError(e) => Some(e),
            FolioError::SerdeError(e) => Some(e),
            FolioError::ConfigError(_) => None,
            FolioError::IoError(e) => Some(e),
            FolioError::ClientError(e) => Some(e),
            FolioError::InternalServerError(_) => None,
        }
    }
}

impl ResponseError for FolioError {
    fn error_response(&self) -> HttpResponse {
        match self {
            FolioError::ValidationError((field, message)) => HttpResponse::BadRequest().json(json!({
                "status": 400,
                "message": {field: message}
            })),
            FolioError::NotFound(e) => HttpResponse::NotFound().json(json!({
                "status": 404,
                "message": e
            })),
            _ => {
                log_error(format!("Internal Server Error: {}", self));

                HttpResponse::InternalServerError().json(json!({
                    "status": 500,
                    "message": "Internal Server Error"
                }))
            }
        }
    }
}

impl From<deadpool::managed::PoolError<redis::RedisError>> for FolioError {
    fn from(e: deadpool::managed::PoolError<redis::RedisError>) -> Self {
        FolioError::RedisError(RedisError::PoolError(e))
    }
}

impl From<redis::RedisError> for FolioError {
    fn from(e: redis::RedisError) -> Self {
        FolioError::RedisError(RedisError::RedisError(e))
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        FolioError::SerdeError(e)
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(e: toml::de::Error) -> Self {
        FolioError::ConfigError(e.to_string())
    }
}

impl From<std::io::Error> for FolioError {
    fn from(e: std::io::Error) -> Self {
        FolioError::IoError(e)
    }
}

impl From<reqwest::Error> for FolioError {
    fn from(e: reqwest::Error) -> Self {
        FolioError::ClientError(e)
    }
}
