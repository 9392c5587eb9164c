use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::feedback::{FeedbackAck, FeedbackApi, TransportError};
use crate::models::FeedbackState;

/// Raw outcome of a `fetch` call: status line plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// REST helper shared by the service clients
pub struct ApiClient;

impl ApiClient {
    /// Issue a JSON request and return the reply regardless of HTTP status.
    /// Only network-level failures (CORS, offline, aborted) become `Err`.
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<HttpReply, JsValue> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let mut opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        headers.append("Accept", "application/json")?;
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let text = JsFuture::from(resp.text()?).await?;
        Ok(HttpReply {
            status: resp.status(),
            status_text: resp.status_text(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest<'a> {
    feedback: Option<&'static str>,
    message_id: &'a str,
    conversation_id: &'a str,
}

/// Body sent to the feedback endpoint; `NONE` goes out as `null`.
pub fn feedback_request_body(
    feedback: FeedbackState,
    message_id: &str,
    conversation_id: &str,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&FeedbackRequest {
        feedback: feedback.wire_value(),
        message_id,
        conversation_id,
    })
}

/// Interpret the endpoint's reply.  Non-2xx is a failure; a 2xx body in the
/// `{success, error?}` shape is taken at its word; anything else on 2xx
/// (empty body, plain text, JSON without `success`) counts as accepted.
pub fn ack_from_reply(reply: &HttpReply) -> FeedbackAck {
    if !reply.is_success() {
        return FeedbackAck::rejected(format!("{} {}", reply.status, reply.status_text).trim_end());
    }
    serde_json::from_str::<FeedbackAck>(&reply.body).unwrap_or_else(|_| FeedbackAck::ok())
}

/// `fetch`-backed [`FeedbackApi`].
pub struct HttpFeedbackClient {
    endpoint: Option<String>,
}

impl HttpFeedbackClient {
    pub fn new(endpoint: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.map(str::to_string),
        }
    }
}

#[async_trait(?Send)]
impl FeedbackApi for HttpFeedbackClient {
    async fn send_feedback(
        &self,
        feedback: FeedbackState,
        message_id: &str,
        conversation_id: &str,
    ) -> Result<FeedbackAck, TransportError> {
        let url = self
            .endpoint
            .as_deref()
            .ok_or_else(|| TransportError("feedback endpoint is not configured".to_string()))?;
        let body = feedback_request_body(feedback, message_id, conversation_id)
            .map_err(|e| TransportError(format!("Failed to encode feedback: {}", e)))?;

        let reply = ApiClient::fetch_json(url, "POST", Some(&body))
            .await
            .map_err(|e| TransportError(format!("Feedback request failed: {:?}", e)))?;
        Ok(ack_from_reply(&reply))
    }
}
