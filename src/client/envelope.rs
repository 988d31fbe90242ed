use serde::de::DeserializeOwned;

use super::ClientError;
use crate::shared::types::ApiResponse;

/// Unwrap the `data` of a response envelope, mapping failures to `ClientError`
pub(crate) async fn decode_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or(body);
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

    envelope
        .data
        .ok_or_else(|| ClientError::Decode("response envelope carried no data".to_string()))
}
