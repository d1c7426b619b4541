#[cfg(test)]
mod tests {
    use std::env;

    use dotenv::dotenv;
    use sqlx::{Pool, Postgres};
    use tracing::level_filters::LevelFilter;
    use uuid::Uuid;

    use axum::http::{StatusCode, header::LOCATION};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{
        auth::{
            db::{add_user_score, create_user, get_leaderboard, get_user_by_id},
            models::UserAccount,
        },
        quiz::models::{AnswerResponse, QuestionView, ROUND_SIZE, RoundResult},
        report::db::{create_reported_question, list_reported_questions_by_user},
        server::{app_state::AppState, error::ServerError, router::build_router},
        tests::fixtures::{get, json_body, post_json, sample_dataset, token_for},
    };

    fn setup_logging() {
        let _ = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(LevelFilter::DEBUG)
            .with_test_writer()
            .try_init();
    }

    async fn setup_pool() -> Pool<Postgres> {
        dotenv().ok();
        let connection_string =
            env::var("QUIZ__DATABASE_URL").expect("Failed to obtain connection string");
        let pool = Pool::<Postgres>::connect(&connection_string).await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn new_user(pool: &Pool<Postgres>) -> UserAccount {
        let username = format!("player-{}", Uuid::new_v4());
        create_user(pool, &username, "$argon2id$placeholder").await.unwrap()
    }

    #[tokio::test]
    #[ignore = "requires postgres at QUIZ__DATABASE_URL"]
    async fn duplicate_username_is_rejected() {
        setup_logging();
        let pool = setup_pool().await;
        let user = new_user(&pool).await;

        let result = create_user(&pool, &user.username, "other-hash").await;

        assert!(matches!(result, Err(ServerError::UsernameTaken)));
    }

    #[tokio::test]
    #[ignore = "requires postgres at QUIZ__DATABASE_URL"]
    async fn concurrent_finishers_do_not_lose_updates() {
        setup_logging();
        let pool = setup_pool().await;
        let (first, second) = (new_user(&pool).await, new_user(&pool).await);

        add_user_score(&pool, &first.id, 10).await.unwrap();
        add_user_score(&pool, &second.id, 10).await.unwrap();

        let (a, b) = tokio::join!(
            add_user_score(&pool, &first.id, 3),
            add_user_score(&pool, &second.id, 5)
        );
        a.unwrap();
        b.unwrap();

        let first = get_user_by_id(&pool, &first.id).await.unwrap().unwrap();
        let second = get_user_by_id(&pool, &second.id).await.unwrap().unwrap();
        assert_eq!(first.score, 13);
        assert_eq!(second.score, 15);
    }

    #[tokio::test]
    #[ignore = "requires postgres at QUIZ__DATABASE_URL"]
    async fn many_increments_on_one_user_all_land() {
        setup_logging();
        let pool = setup_pool().await;
        let user = new_user(&pool).await;

        let handles = (0..20).map(|_| add_user_score(&pool, &user.id, 1));
        let results = futures::future::join_all(handles).await;
        assert!(results.iter().all(|r| r.is_ok()));

        let user = get_user_by_id(&pool, &user.id).await.unwrap().unwrap();
        assert_eq!(user.score, 20);
    }

    #[tokio::test]
    #[ignore = "requires postgres at QUIZ__DATABASE_URL"]
    async fn reading_leaderboard_mutates_nothing() {
        setup_logging();
        let pool = setup_pool().await;
        let user = new_user(&pool).await;
        add_user_score(&pool, &user.id, 7).await.unwrap();

        for _ in 0..3 {
            let board = get_leaderboard(&pool, 50).await.unwrap();
            assert!(board.len() <= 50);
            assert!(board.windows(2).all(|w| w[0].score >= w[1].score));
        }

        let user = get_user_by_id(&pool, &user.id).await.unwrap().unwrap();
        assert_eq!(user.score, 7);
    }

    #[tokio::test]
    #[ignore = "requires postgres at QUIZ__DATABASE_URL"]
    async fn reported_question_keeps_prompt_text() {
        setup_logging();
        let pool = setup_pool().await;
        let user = new_user(&pool).await;
        let prompt = "What is the currency of Wakanda?";

        let created = create_reported_question(&pool, &user.id, prompt)
            .await
            .unwrap();
        let listed = list_reported_questions_by_user(&pool, &user.id)
            .await
            .unwrap();

        assert_eq!(created.question, prompt);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].question, prompt);
        assert_eq!(listed[0].user_id, user.id);
    }

    #[tokio::test]
    #[ignore = "requires postgres at QUIZ__DATABASE_URL"]
    async fn finished_round_adds_score_and_keeps_report() {
        setup_logging();
        let pool = setup_pool().await;
        let user = new_user(&pool).await;
        let token = token_for(user.id, &user.username);
        let state = AppState::new(pool.clone(), sample_dataset());
        let app = build_router(state.clone());

        let response = app.clone().oneshot(get("/quiz", Some(&token))).await.unwrap();
        let mut view: QuestionView = json_body(response).await;
        let mut reported = None;

        for i in 0..ROUND_SIZE {
            let body = match i {
                0 => json!({ "answer": "wrong on purpose" }),
                2 => {
                    reported = Some(view.question.clone());
                    json!({ "report": true })
                }
                _ => json!({ "answer": view.correct_answer }),
            };

            let response = app
                .clone()
                .oneshot(post_json("/quiz/answer", &token, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let answered: AnswerResponse = json_body(response).await;
            if let Some(next) = answered.next {
                view = next;
            }
        }

        let response = app
            .clone()
            .oneshot(get("/quiz/result", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let result: RoundResult = json_body(response).await;
        assert_eq!(result.score, 4);

        let stored = get_user_by_id(&pool, &user.id).await.unwrap().unwrap();
        assert_eq!(stored.score, user.score + result.score as i32);

        let reports = list_reported_questions_by_user(&pool, &user.id)
            .await
            .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(Some(reports[0].question.clone()), reported);

        let response = app.oneshot(get("/quiz/result", Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/auth/login");
        assert_eq!(state.get_sessions().len(), 0);

        let stored = get_user_by_id(&pool, &user.id).await.unwrap().unwrap();
        assert_eq!(stored.score, result.score as i32);
    }
}
