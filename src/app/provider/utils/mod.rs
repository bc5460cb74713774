use actix_web::client::ClientRequest;
use actix_web::error::PayloadError;
use actix_web::HttpMessage;
use bytes::Bytes;
use futures::Future;
use futures::future::{Either, err as fut_err};
use std::time::Duration;

use crate::app::provider::{DecodeError, ProviderError};

pub const BODY_LIMIT: usize = 1024 * 1024;

/// Sends the request and reads the whole body. Non-2xx responses are dropped unread.
pub fn fetch_body(request: ClientRequest, timeout: Duration) -> Box<dyn Future<Item=Bytes, Error=ProviderError>> {
    Box::new(
        request
            .send()
            .timeout(timeout)
            .map_err(|e| ProviderError::NetworkError { reason: e.to_string() })
            .and_then(|response| {
                let status = response.status();
                if !status.is_success() {
                    return Either::A(fut_err(ProviderError::UpstreamStatus { status: status.as_u16() }));
                }

                Either::B(
                    response
                        .body()
                        .limit(BODY_LIMIT)
                        .map_err(payload_error)
                )
            })
    )
}

/// An oversized body is a bad response, not a transport failure.
fn payload_error(e: PayloadError) -> ProviderError {
    match e {
        PayloadError::Overflow => ProviderError::Decode(DecodeError::BodyTooLarge { limit: BODY_LIMIT }),
        other => ProviderError::NetworkError { reason: other.to_string() },
    }
}
