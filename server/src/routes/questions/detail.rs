use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};

use db::{
    get_conn,
    models::{Question, QuestionDetails},
    DbPool,
};
use errors::Error;

use crate::clock::Clock;

pub async fn detail(
    question_id: Path<i32>,
    pool: Data<DbPool>,
    clock: Data<dyn Clock>,
) -> Result<Json<QuestionDetails>, Error> {
    let question_id = question_id.into_inner();
    let now = clock.now();

    let question = block(move || {
        let conn = get_conn(&pool)?;
        Question::find_published_by_id(&conn, question_id, now)
    })
    .await?
    .map_err(|err| {
        debug!("Question {} is not visible - {}", question_id, err);
        err
    })?;

    Ok(Json(QuestionDetails::new(question, now)))
}
