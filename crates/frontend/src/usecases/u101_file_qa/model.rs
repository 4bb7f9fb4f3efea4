//! File Q&A - Model (API functions)

use crate::shared::api_utils::api_base;
use contracts::api::{AskRequest, AskResponse, ErrorBody, UploadResponse};

/// Upload a file as multipart form data and return its parsed representation.
pub async fn upload_file(file: &web_sys::File) -> Result<UploadResponse, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

    let form_data = FormData::new().map_err(|e| format!("{e:?}"))?;
    form_data
        .append_with_blob("file", file)
        .map_err(|e| format!("{e:?}"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let url = format!("{}/upload", api_base());
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    if !resp.ok() {
        return Err(failure_message(&resp).await);
    }

    let text = response_text(&resp).await?;
    let data: UploadResponse = serde_json::from_str(&text).map_err(|e| format!("{e}"))?;

    Ok(data)
}

/// Send a question to the backend.
pub async fn ask(request_body: &AskRequest) -> Result<AskResponse, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);

    let json = serde_json::to_string(request_body).map_err(|e| format!("{e}"))?;
    let body = wasm_bindgen::JsValue::from_str(&json);
    opts.set_body(&body);

    let url = format!("{}/ask", api_base());
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    if !resp.ok() {
        return Err(failure_message(&resp).await);
    }

    let text = response_text(&resp).await?;
    let data: AskResponse = serde_json::from_str(&text).map_err(|e| format!("{e}"))?;

    Ok(data)
}

/// Human-readable failure for a non-2xx response: the JSON `detail` field
/// when the body parses, the HTTP status text otherwise.
async fn failure_message(resp: &web_sys::Response) -> String {
    let fallback = resp.status_text();
    match response_text(resp).await {
        Ok(body) => detail_or(&body, &fallback),
        Err(_) => fallback,
    }
}

fn detail_or(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.detail)
        .unwrap_or_else(|| fallback.to_string())
}

async fn response_text(resp: &web_sys::Response) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "bad text".to_string())
}

#[cfg(test)]
mod tests {
    use super::detail_or;

    #[test]
    fn detail_field_wins_when_body_is_json() {
        assert_eq!(
            detail_or("{\"detail\":\"bad format\"}", "Internal Server Error"),
            "bad format"
        );
    }

    #[test]
    fn status_text_covers_missing_or_broken_bodies() {
        assert_eq!(detail_or("{}", "Internal Server Error"), "Internal Server Error");
        assert_eq!(
            detail_or("{\"detail\":null}", "Internal Server Error"),
            "Internal Server Error"
        );
        assert_eq!(detail_or("<html>oops</html>", "Bad Gateway"), "Bad Gateway");
        assert_eq!(detail_or("", "Bad Gateway"), "Bad Gateway");
    }
}
