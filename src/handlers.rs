use crate::api_types::{
    CallQuery, CallResponse, ContactsPayload, IncomingMessage, LlmRequest, LlmResponse,
    MessageResponse, SmsResponse, TranscriptionBody, TtsRequest, TtsResponse,
};
use crate::consts::{KNOWN_SENDER_DETAIL, MAX_AUDIO_UPLOAD_BYTES, SPAM_DETAIL};
use crate::error::AppError;
use crate::twilio_types::{
    wrap_twiml, MessageAction, Response as TwimlResponse, ResponseAction, TwilioSmsPayload,
};
use crate::types::{AppState, CallOutcome, Contact, ConversationRecord, RoutingResult};
use crate::utils::{b64_encode, read_audio_field};

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, trace, Instrument};
use uuid::Uuid;

pub fn app(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/contacts", post(register_contacts))
        .route("/contacts/:phone", get(get_contact))
        .route("/incoming-message", post(incoming_message))
        .route("/handle-sms", post(handle_sms))
        .route("/handle-sms/", post(handle_sms))
        .route(
            "/handle-call",
            post(handle_call).layer(DefaultBodyLimit::max(MAX_AUDIO_UPLOAD_BYTES)),
        )
        .route("/messages/:phone", get(get_messages))
        .route(
            "/stt",
            post(stt).layer(DefaultBodyLimit::max(MAX_AUDIO_UPLOAD_BYTES)),
        )
        .route("/llm", post(llm))
        .route("/tts", post(tts))
        .route("/twilio/sms", post(twilio_sms))
        .route("/", get(|| async { "Hello, World!" }))
        .layer(axum::middleware::from_fn(trace_request))
        .with_state(app_state)
}

/// Wrap every request in a span carrying a fresh request id.
async fn trace_request<B>(req: Request<B>, next: Next<B>) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path()
    );
    async move {
        let resp = next.run(req).await;
        debug!(status = %resp.status(), "request finished");
        resp
    }
    .instrument(span)
    .await
}

/// Body rejections are reported like every other validation failure.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|e| {
        debug!(error=%e, "rejected json body");
        AppError::validation(e.body_text())
    })
}

pub async fn register_contacts(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ContactsPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Contact>>), AppError> {
    let contacts = json_body(payload)?.into_vec();
    let stored = app_state.router.register_contacts(contacts).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn get_contact(
    State(app_state): State<Arc<AppState>>,
    Path(phone): Path<String>,
) -> Result<Json<Contact>, AppError> {
    Ok(Json(app_state.router.lookup_contact(&phone).await?))
}

pub async fn incoming_message(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<IncomingMessage>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let IncomingMessage { phone, message } = json_body(payload)?;
    let response = match app_state.router.submit_message(&phone, &message).await? {
        RoutingResult::Known => MessageResponse::Known {
            detail: KNOWN_SENDER_DETAIL.to_string(),
        },
        RoutingResult::Spam => MessageResponse::Spam {
            detail: SPAM_DETAIL.to_string(),
        },
        RoutingResult::Conversation { reply } => MessageResponse::Conversation {
            conversation_result: reply,
        },
    };
    Ok(Json(response))
}

/// Same routing as `/incoming-message`, answered in the caller-number shape the manual UI uses.
pub async fn handle_sms(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<IncomingMessage>, JsonRejection>,
) -> Result<Json<SmsResponse>, AppError> {
    let IncomingMessage { phone, message } = json_body(payload)?;
    let result = app_state.router.submit_message(&phone, &message).await?;
    let response = match result {
        RoutingResult::Known => SmsResponse::Known {
            caller_number: phone,
            user_message: message,
            detail: KNOWN_SENDER_DETAIL.to_string(),
        },
        RoutingResult::Spam => SmsResponse::Spam {
            caller_number: phone,
            user_message: message,
            detail: SPAM_DETAIL.to_string(),
        },
        RoutingResult::Conversation { reply } => SmsResponse::Conversation {
            caller_number: phone,
            user_message: message,
            bot_response: reply,
        },
    };
    Ok(Json(response))
}

pub async fn handle_call(
    State(app_state): State<Arc<AppState>>,
    Query(CallQuery { caller_number }): Query<CallQuery>,
    multipart: Multipart,
) -> Result<Json<CallResponse>, AppError> {
    let (audio, filename) = read_audio_field(multipart).await?;
    let outcome = app_state
        .router
        .submit_call_audio(&caller_number, audio, &filename)
        .await?;
    let response = match outcome {
        CallOutcome::Known { message } => CallResponse::Known {
            caller_number,
            detail: message,
        },
        CallOutcome::Conversation {
            transcription,
            reply,
            reply_audio,
        } => CallResponse::Conversation {
            caller_number,
            transcribed_text: transcription,
            bot_response: reply,
            tts_audio: b64_encode(&reply_audio),
        },
    };
    Ok(Json(response))
}

pub async fn get_messages(
    State(app_state): State<Arc<AppState>>,
    Path(phone): Path<String>,
) -> Result<Json<ConversationRecord>, AppError> {
    Ok(Json(app_state.router.get_history(&phone).await?))
}

pub async fn stt(
    State(app_state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<TranscriptionBody>, AppError> {
    let (audio, filename) = read_audio_field(multipart).await?;
    let transcription = app_state.router.transcribe(audio, &filename).await?;
    Ok(Json(TranscriptionBody { transcription }))
}

pub async fn llm(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<LlmRequest>, JsonRejection>,
) -> Result<Json<LlmResponse>, AppError> {
    let LlmRequest { message } = json_body(payload)?;
    let reply = app_state.router.reply_once(&message).await?;
    Ok(Json(LlmResponse { reply }))
}

pub async fn tts(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>, AppError> {
    let TtsRequest { text } = json_body(payload)?;
    let audio = app_state.router.synthesize(&text).await?;
    Ok(Json(TtsResponse {
        audio: b64_encode(&audio),
    }))
}

/// Twilio messaging webhook.  Only a conversation reply is texted back; known and spam senders
/// get an empty TwiML response, as does a message with no text (an image-only MMS).
pub async fn twilio_sms(
    State(app_state): State<Arc<AppState>>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    trace!(body=%body, "sms webhook body");
    let payload = serde_urlencoded::from_str::<TwilioSmsPayload>(&body).map_err(|e| {
        error!(error=%e, "failed to deserialize Twilio sms payload");
        AppError::validation("malformed Twilio sms payload")
    })?;
    debug!(
        message_sid=%payload.message_sid,
        account_sid=%payload.account_sid,
        to=%payload.to,
        from_city=?payload.from_city,
        from_state=?payload.from_state,
        from_country=?payload.from_country,
        "got twilio sms"
    );

    let mut response = TwimlResponse::default();
    if payload.body.trim().is_empty() {
        info!(from=%payload.from, "sms without a text body; not routing");
    } else if let RoutingResult::Conversation { reply } = app_state
        .router
        .submit_message(&payload.from, &payload.body)
        .await?
    {
        response
            .actions
            .push(ResponseAction::Message(MessageAction { body: reply }));
    }
    let twiml = wrap_twiml(xmlserde::xml_serialize(response));
    trace!("twiml: '{}'", twiml);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/xml"),
    );
    Ok((StatusCode::OK, headers, twiml))
}
