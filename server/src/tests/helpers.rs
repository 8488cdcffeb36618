#[cfg(test)]
pub mod tests {
    use actix_http::Request;
    use actix_service::Service;
    use actix_web::{dev::ServiceResponse, error::Error, test, web, web::Data, App};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde::de::DeserializeOwned;

    use db::{get_conn, memory_pool, models::Question, DbPool};

    use crate::clock::{clock_data, FixedClock};
    use crate::routes::{not_found, routes};

    /// Instant the test app's clock is pinned to
    pub fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    pub fn get_test_pool() -> DbPool {
        memory_pool().unwrap()
    }

    /// Creates a question published the given number of `days` offset from
    /// `test_now()`. Negative for the past, positive for not yet published.
    pub fn create_question(pool: &DbPool, question_text: &str, days: i64) -> Question {
        create_question_at(pool, question_text, test_now() + Duration::days(days))
    }

    pub fn create_question_at(
        pool: &DbPool,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> Question {
        let conn = get_conn(pool).unwrap();
        Question::create(&conn, question_text, pub_date).unwrap()
    }

    pub async fn get_service(
        pool: DbPool,
    ) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
        test::init_service(
            App::new()
                .app_data(Data::new(pool))
                .app_data(clock_data(FixedClock(test_now())))
                .configure(routes)
                .default_service(web::route().to(not_found)),
        )
        .await
    }

    /// Helper for HTTP GET integration tests that only care about the raw body
    pub async fn test_get_body(pool: &DbPool, route: &str) -> (u16, String) {
        let app = get_service(pool.clone()).await;
        let req = test::TestRequest::get().uri(route);

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let text = String::from_utf8(body.to_vec())
            .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string());

        (status, text)
    }

    /// Helper for HTTP GET integration tests
    pub async fn test_get<R>(pool: &DbPool, route: &str) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let (status, body) = test_get_body(pool, route).await;
        let json_body = serde_json::from_str(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                body, status
            )
        });

        (status, json_body)
    }
}
