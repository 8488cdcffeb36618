#[macro_use]
extern crate log;

use chrono::{DateTime, Duration, Utc};
use diesel::sqlite::SqliteConnection;
use dotenv::dotenv;

use db::{get_conn, models::Question, new_pool, run_migrations};
use errors::Error;

/// Inserts the sample questions unless the table already has rows. Returns
/// how many were inserted.
fn seed_questions(conn: &SqliteConnection, now: DateTime<Utc>) -> Result<usize, Error> {
    let existing = Question::get_all(conn)?;
    if !existing.is_empty() {
        info!("Skipping seeds, {} questions already exist", existing.len());
        return Ok(0);
    }

    let samples = [
        ("What's new?", Duration::hours(-2)),
        ("What's your favourite colour?", Duration::days(-1)),
        ("Tabs or spaces?", Duration::days(-3)),
        ("Which editor do you use?", Duration::days(-7)),
        ("What should we build next?", Duration::days(2)),
    ];

    for (question_text, offset) in &samples {
        let question = Question::create(conn, question_text, now + *offset)?;
        info!(
            "Created question {} \"{}\" published {}",
            question.id, question, question.pub_date
        );
    }

    Ok(samples.len())
}

fn main() -> Result<(), Error> {
    dotenv().ok();
    env_logger::init();

    let pool = new_pool()?;
    let conn = get_conn(&pool)?;
    run_migrations(&conn)?;

    seed_questions(&conn, Utc::now())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use db::{get_conn, memory_pool, models::Question};

    use super::seed_questions;

    #[test]
    fn test_seeds_run_once() {
        let pool = memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

        assert_eq!(seed_questions(&conn, now).unwrap(), 5);
        assert_eq!(seed_questions(&conn, now).unwrap(), 0);
        assert_eq!(Question::get_all(&conn).unwrap().len(), 5);
    }

    #[test]
    fn test_seeds_include_a_future_question() {
        let pool = memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

        seed_questions(&conn, now).unwrap();

        let published = Question::find_published(&conn, now, 100).unwrap();
        assert_eq!(published.len(), 4);
    }
}
