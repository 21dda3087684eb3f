use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::chat::{ChatMessage, ChatRole};
use crate::state::AppState;
use crate::tutor::prompts::{
    build_tutor_prompt, conversation_context, TUTOR_SYSTEM, TUTOR_UNAVAILABLE_REPLY,
};

/// Turns fetched from storage before the last `CONTEXT_TURNS` are kept.
const HISTORY_FETCH: i64 = 10;

fn default_session() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_session")]
    pub session_id: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// POST /api/tutor/chat
///
/// Stores the student's turn, asks the LLM with the recent session as context,
/// stores and returns the tutor's turn. An unreachable LLM yields a fixed apology.
pub async fn handle_chat(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let history = state
        .store
        .recent_messages(user.user_id, &req.session_id, HISTORY_FETCH)
        .await?;
    let context = conversation_context(&history);

    let student_turn = ChatMessage::new(
        user.user_id,
        &req.session_id,
        ChatRole::User,
        req.message.clone(),
    );
    state.store.insert_message(&student_turn).await?;

    let prompt = build_tutor_prompt(&context, &req.message, req.language.as_deref());
    let reply = match state.llm.complete(&prompt, TUTOR_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(session_id = %req.session_id, "Tutor LLM call failed: {e}");
            TUTOR_UNAVAILABLE_REPLY.to_string()
        }
    };

    let tutor_turn = ChatMessage::new(
        user.user_id,
        &req.session_id,
        ChatRole::Assistant,
        reply.clone(),
    );
    state.store.insert_message(&tutor_turn).await?;

    Ok(Json(ChatResponse {
        response: reply,
        session_id: req.session_id,
    }))
}

/// GET /api/tutor/history/:session_id
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let messages = state
        .store
        .session_history(user.user_id, &session_id)
        .await?;
    Ok(Json(HistoryResponse { messages }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{ScriptedLlm, TestApp};
    use crate::tutor::prompts::TUTOR_UNAVAILABLE_REPLY;

    #[tokio::test]
    async fn test_chat_round_trip_is_recorded_in_history() {
        let app = TestApp::with_llm(ScriptedLlm::replying("A prime has exactly two divisors."));
        let (_, token) = app.register_student("s@example.com").await;

        let (status, body) = app
            .post(
                "/api/tutor/chat",
                Some(&token),
                json!({"message": "What is a prime?", "session_id": "maths"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "A prime has exactly two divisors.");
        assert_eq!(body["session_id"], "maths");

        let (status, body) = app.get("/api/tutor/history/maths", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "What is a prime?");
        assert_eq!(messages[1]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_second_turn_sends_previous_turns_as_context() {
        let llm = ScriptedLlm::replying("ok");
        let app = TestApp::with_llm(llm.clone());
        let (_, token) = app.register_student("s@example.com").await;

        app.post("/api/tutor/chat", Some(&token), json!({"message": "first question"}))
            .await;
        app.post("/api/tutor/chat", Some(&token), json!({"message": "second question"}))
            .await;

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(!prompts[0].contains("Previous conversation"));
        assert!(prompts[1].contains("Student: first question"));
        assert!(prompts[1].contains("Tutor: ok"));
    }

    #[tokio::test]
    async fn test_llm_failure_still_answers() {
        let app = TestApp::new();
        let (_, token) = app.register_student("s@example.com").await;

        let (status, body) = app
            .post("/api/tutor/chat", Some(&token), json!({"message": "hello"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], TUTOR_UNAVAILABLE_REPLY);
        assert_eq!(body["session_id"], "default");
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_caller() {
        let app = TestApp::with_llm(ScriptedLlm::replying("ok"));
        let (_, alice) = app.register_student("alice@example.com").await;
        let (_, bob) = app.register_student("bob@example.com").await;

        app.post("/api/tutor/chat", Some(&alice), json!({"message": "mine"}))
            .await;

        let (_, body) = app.get("/api/tutor/history/default", Some(&bob)).await;
        assert!(body["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_requires_auth() {
        let app = TestApp::new();
        let (status, _) = app
            .post("/api/tutor/chat", None, json!({"message": "hello"}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
