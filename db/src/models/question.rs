use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use diesel::deserialize::Queryable;
use diesel::result::Error as DBError;
use diesel::sql_types::{Integer, Text, Timestamp};
use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel::{self, Connection, ExpressionMethods, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::schema::questions::{self, table};

pub const QUESTION_TEXT_MAX_LENGTH: usize = 200;
pub const QUESTION_NOT_FOUND: &str = "No Question matches the given query.";

/// A poll question. Visible to users once `pub_date` has passed.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Question {
    pub id: i32,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

// pub_date is stored as a naive UTC timestamp
impl Queryable<(Integer, Text, Timestamp), Sqlite> for Question {
    type Row = (i32, String, NaiveDateTime);

    fn build(row: Self::Row) -> Self {
        Question {
            id: row.0,
            question_text: row.1,
            pub_date: Utc.from_utc_datetime(&row.2),
        }
    }
}

#[derive(Insertable)]
#[table_name = "questions"]
pub struct NewQuestion<'a> {
    pub question_text: &'a str,
    pub pub_date: NaiveDateTime,
}

/// Question as rendered to clients, with recency evaluated against the
/// request's `now`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct QuestionDetails {
    pub id: i32,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub was_published_recently: bool,
}

impl QuestionDetails {
    pub fn new(question: Question, now: DateTime<Utc>) -> Self {
        QuestionDetails {
            was_published_recently: question.was_published_recently(now),
            id: question.id,
            question_text: question.question_text,
            pub_date: question.pub_date,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.question_text)
    }
}

/// True when `pub_date` falls within the 24 hours leading up to and including
/// `now`.
pub fn was_published_recently(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let age = now.signed_duration_since(pub_date);
    age >= Duration::zero() && age < Duration::days(1)
}

/// Published questions, newest first. Ties on `pub_date` go to the higher id.
pub fn list_published(questions: &[Question], now: DateTime<Utc>) -> Vec<Question> {
    let mut published: Vec<Question> = questions
        .iter()
        .filter(|question| question.is_published(now))
        .cloned()
        .collect();

    published.sort_by(|a, b| {
        b.pub_date
            .cmp(&a.pub_date)
            .then_with(|| b.id.cmp(&a.id))
    });

    published
}

/// Unpublished questions are reported exactly like missing ones.
pub fn get_published(
    questions: &[Question],
    question_id: i32,
    now: DateTime<Utc>,
) -> Result<Question, Error> {
    questions
        .iter()
        .find(|question| question.id == question_id && question.is_published(now))
        .cloned()
        .ok_or_else(|| Error::NotFound(QUESTION_NOT_FOUND.into()))
}

fn validate_question_text(question_text: &str) -> Result<(), Error> {
    if question_text.trim().is_empty() {
        return Err(Error::BadRequest("question_text is required".into()));
    }
    if question_text.chars().count() > QUESTION_TEXT_MAX_LENGTH {
        return Err(Error::BadRequest(format!(
            "question_text must be at most {} characters",
            QUESTION_TEXT_MAX_LENGTH
        )));
    }

    Ok(())
}

impl Question {
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        was_published_recently(self.pub_date, now)
    }

    pub fn create(
        conn: &SqliteConnection,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> Result<Question, Error> {
        use crate::schema::questions::dsl::{id, questions as questions_table};

        validate_question_text(question_text)?;

        // sqlite has no RETURNING, so read the row back inside the same transaction
        let question = conn.transaction::<_, DBError, _>(|| {
            diesel::insert_into(table)
                .values(NewQuestion {
                    question_text,
                    pub_date: pub_date.naive_utc(),
                })
                .execute(conn)?;

            questions_table.order(id.desc()).first::<Question>(conn)
        })?;

        Ok(question)
    }

    pub fn get_all(conn: &SqliteConnection) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::{id, pub_date, questions as questions_table};

        let all_questions = questions_table
            .order((pub_date.desc(), id.desc()))
            .load::<Question>(conn)?;

        Ok(all_questions)
    }

    pub fn find_published(
        conn: &SqliteConnection,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::{id, pub_date, questions as questions_table};

        let results = questions_table
            .filter(pub_date.le(now.naive_utc()))
            .order((pub_date.desc(), id.desc()))
            .limit(limit)
            .load::<Question>(conn)?;

        Ok(results)
    }

    pub fn find_published_by_id(
        conn: &SqliteConnection,
        question_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Question, Error> {
        use crate::schema::questions::dsl::{pub_date, questions as questions_table};

        questions_table
            .find(question_id)
            .filter(pub_date.le(now.naive_utc()))
            .first::<Question>(conn)
            .map_err(|err| match err {
                DBError::NotFound => Error::NotFound(QUESTION_NOT_FOUND.into()),
                err => err.into(),
            })
    }
}
