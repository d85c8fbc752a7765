use std::time::Duration;

use egui_kittest::Harness;
use userreg_ui::UserRegApp;
use userreg_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, UserRegApp>,
}

impl<'a> TestCtx<'a> {
    /// App against a mock API that lists [`fixture_users`].
    pub async fn new_app() -> Self {
        let mock_server = start_server().await;
        Self::with_server(mock_server)
    }

    /// App against a server the caller has already mocked.
    pub fn with_server(mock_server: MockServer) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let app = UserRegApp::new(State::test(mock_server.uri()));
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, UserRegApp> {
        &mut self.harness
    }

    pub fn state_mut(&mut self) -> &mut State {
        self.harness.state_mut().state_mut()
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps frames, yielding to the runtime in between, until `done` holds.
    pub async fn step_until(&mut self, mut done: impl FnMut(&mut Harness<'a, UserRegApp>) -> bool) {
        for _ in 0..40 {
            self.harness.step();
            if done(&mut self.harness) {
                // One more frame so newly shown windows finish their sizing pass
                // and become interactable.
                self.harness.step();
                return;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        self.harness.step();
    }

    /// Steps a few frames while giving spawned requests time to finish.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        self.harness.step();
    }
}

pub fn fixture_users() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "id": "u1",
                "title": "ms",
                "firstName": "Ana",
                "lastName": "Diaz",
                "email": "ana@example.com"
            },
            {
                "id": "u2",
                "title": "mr",
                "firstName": "Benito",
                "lastName": "Ruiz",
                "email": "benito@example.com"
            },
            {
                "id": "u3",
                "title": "miss",
                "firstName": "Juana",
                "lastName": "Perez"
            }
        ],
        "total": 3,
        "page": 0,
        "limit": 10
    })
}

/// Mock server answering the first-page user listing.
pub async fn start_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture_users()))
        .mount(&mock_server)
        .await;

    mock_server
}
