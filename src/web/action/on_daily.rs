use actix_web::{FutureResponse, HttpRequest, HttpResponse};

use crate::app::RequestKind;
use crate::web::AppState;

pub fn handle(req: &HttpRequest<AppState>) -> FutureResponse<HttpResponse> {
    info!("Received get daily request: {}", req.query_string());

    super::respond_with_forecast(req, RequestKind::Daily)
}
