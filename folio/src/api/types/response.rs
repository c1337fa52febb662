use actix_web::HttpResponse;

use crate::errors::FolioError;

pub type Response = Result<HttpResponse, FolioError>;
