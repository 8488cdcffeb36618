use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};

use db::{
    get_conn,
    models::{Question, QuestionDetails},
    DbPool,
};
use errors::Error;

use crate::clock::Clock;

pub const LATEST_QUESTION_LIMIT: i64 = 5;
pub const NO_POLLS_MESSAGE: &str = "No polls are available.";

#[derive(Debug, Deserialize, Serialize)]
pub struct IndexResponse {
    pub latest_question_list: Vec<QuestionDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn index(
    pool: Data<DbPool>,
    clock: Data<dyn Clock>,
) -> Result<Json<IndexResponse>, Error> {
    let now = clock.now();

    let questions = block(move || {
        let conn = get_conn(&pool)?;
        Question::find_published(&conn, now, LATEST_QUESTION_LIMIT)
    })
    .await??;

    debug!("Listing {} published questions", questions.len());

    let message = if questions.is_empty() {
        Some(NO_POLLS_MESSAGE.to_string())
    } else {
        None
    };

    Ok(Json(IndexResponse {
        latest_question_list: questions
            .into_iter()
            .map(|question| QuestionDetails::new(question, now))
            .collect(),
        message,
    }))
}
