//! Browser transport for [`ApiRequest`]s.

use crate::api::{ApiRequest, ApiResponse, HttpMethod};
use crate::error::PanelError;
use gloo_net::http::Request;
use web_sys::FormData;

fn form_data(request: &ApiRequest) -> Result<FormData, PanelError> {
    let data = FormData::new().map_err(|e| PanelError::Dom(format!("{:?}", e)))?;
    for (name, value) in &request.fields {
        data.append_with_str(name, value)
            .map_err(|e| PanelError::Dom(format!("{:?}", e)))?;
    }
    Ok(data)
}

/// Send a request and wait for it to complete. Any HTTP status counts as a
/// completed response; only network-level failures are errors.
pub async fn send(request: &ApiRequest) -> Result<ApiResponse, PanelError> {
    let response = match request.method {
        HttpMethod::Get => Request::get(request.path).send().await?,
        HttpMethod::Post => {
            Request::post(request.path)
                .body(form_data(request)?)?
                .send()
                .await?
        }
    };
    let status = response.status();
    let body = response.text().await?;
    log::debug!("{} answered {} ({} bytes)", request.path, status, body.len());
    Ok(ApiResponse { status, body })
}
