#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hkplanner::chat::{ChatTurn, Session, Transcript};
    use hkplanner::core::AppConfig;
    use hkplanner::openai::Role;
    use hkplanner::planner::{BUSY_NOTICE, TIMEOUT_NOTICE, TravelPlanner};

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    /// The planner is called directly by a caller that keeps its own
    /// transcript, mirroring how a UI would drive it.
    #[tokio::test]
    async fn it_plans_a_trip_with_one_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Day 1: Hong Kong Park. Day 2: Star Ferry."))
            .expect(1)
            .create_async()
            .await;

        let config = AppConfig::new(&server.url(), "test-key", "test-model");
        let planner = TravelPlanner::new(&config).unwrap();
        let mut transcript = Transcript::seeded(planner.welcome_turn());

        let messages = planner.build_messages("Plan a 2-day trip", &[]);
        assert_eq!(messages.len(), 2);

        transcript.append(ChatTurn::new(Role::User, "Plan a 2-day trip"));
        let reply = planner.respond("Plan a 2-day trip", &[]).await;
        transcript.append(ChatTurn::new(Role::Assistant, &reply));

        mock.assert_async().await;
        assert_eq!(transcript.len(), 3);
        let roles: Vec<Role> = transcript.all().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(
            transcript.all()[2].content,
            "Day 1: Hong Kong Park. Day 2: Star Ferry."
        );
    }

    /// A long conversation never sends more than the most recent ten
    /// turns of history.
    #[tokio::test]
    async fn it_bounds_history_in_long_conversations() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion_body("Noted"))
            .create_async()
            .await;

        let config = AppConfig::new(&server.url(), "test-key", "test-model");
        let mut session = Session::new(TravelPlanner::new(&config).unwrap());
        for i in 0..7 {
            session.submit(&format!("Question {}", i)).await.unwrap();
        }
        assert_eq!(session.message_count(), 15);

        let history = session.transcript().all();
        let messages = session.planner().build_messages("One more", history);
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[0].role, Role::System);
        // Oldest turns have aged out, including the welcome turn
        assert_eq!(messages[1].content, history[5].content);
        assert_eq!(messages[10].content, "Noted");
        assert_eq!(messages[11].content, "One more");
    }

    /// Errors never escape a submission and the session stays usable.
    #[tokio::test]
    async fn it_recovers_after_failures() {
        let mut server = mockito::Server::new_async().await;
        let busy = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .expect(1)
            .create_async()
            .await;

        let config = AppConfig::new(&server.url(), "test-key", "test-model");
        let mut session = Session::new(TravelPlanner::new(&config).unwrap());

        let reply = session.submit("Hello").await.unwrap();
        assert_eq!(reply.content, BUSY_NOTICE);
        busy.assert_async().await;
        busy.remove_async().await;

        let _ok = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion_body("Welcome back"))
            .create_async()
            .await;

        let reply = session.submit("Hello again").await.unwrap();
        assert_eq!(reply.content, "Welcome back");
        assert_eq!(session.message_count(), 5);
    }

    #[tokio::test]
    async fn it_reports_timeouts_as_a_notice() {
        // Accepts the connection but never answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let config = AppConfig {
            request_timeout: Duration::from_millis(200),
            ..AppConfig::new(&url, "test-key", "test-model")
        };
        let mut session = Session::new(TravelPlanner::new(&config).unwrap());
        let reply = session.submit("Plan a 30-day trip").await.unwrap();

        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, TIMEOUT_NOTICE);
        assert_eq!(session.message_count(), 3);
        drop(listener);
    }
}
