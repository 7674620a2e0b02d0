//! Images view state

use eframe::egui;

use crate::destination::DestinationStore;
use crate::fetch::{Fetch, FetchPoll, FetchState};
use crate::providers::photos::describe_error;
use crate::providers::{Photo, PhotoClient};
use crate::state::StateEvent;

/// Images view state
pub struct PhotosState {
    /// Location searched for, edited in place
    pub location: String,
    fetch: Fetch<Vec<Photo>>,
    client: PhotoClient,
}

impl PhotosState {
    /// Mount the view, searching the current destination right away
    pub fn mount(destination: &DestinationStore, client: PhotoClient) -> Self {
        let mut state = Self {
            location: destination.read(),
            fetch: Fetch::new("photos", describe_error),
            client,
        };
        state.request();
        state
    }

    pub fn photos(&self) -> &FetchState<Vec<Photo>> {
        self.fetch.state()
    }

    /// Apply an edit of the location field; the destination follows every keystroke
    pub fn set_location(&mut self, location: String, destination: &DestinationStore) {
        destination.write(location.clone());
        self.location = location;
        self.request();
    }

    fn request(&mut self) {
        if self.location.trim().is_empty() {
            self.fetch.clear();
            return;
        }

        let client = self.client.clone();
        let query = self.location.clone();
        self.fetch
            .trigger(&self.location, async move { client.search(&query).await });
    }

    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        match self.fetch.poll() {
            FetchPoll::Settled => match self.fetch.state() {
                FetchState::Success(photos) => {
                    events.push(StateEvent::StatusMessage(format!(
                        "Found {} photos of {}",
                        photos.len(),
                        self.fetch.query()
                    )));
                }
                FetchState::Error(msg) => events.push(StateEvent::StatusMessage(msg.clone())),
                _ => {}
            },
            FetchPoll::Pending => ctx.request_repaint(),
            FetchPoll::Idle => {}
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::PhotosConfig;
    use crate::providers::credentials::Credentials;
    use crate::providers::mock_server::{MockResponse, MockServer};

    fn photos_json(alt: &str) -> String {
        format!(
            r#"{{"photos":[{{"id":1,"alt":"{}","src":{{"large":"https://img/l.jpg","medium":"https://img/m.jpg"}}}}]}}"#,
            alt
        )
    }

    fn client(server: &MockServer) -> PhotoClient {
        let config = PhotosConfig {
            base_url: server.url(),
            per_page: 12,
        };
        PhotoClient::new(
            reqwest::Client::new(),
            &config,
            Credentials::from_lookup(|_| Some("px".to_string())),
        )
    }

    async fn settle(state: &mut PhotosState, ctx: &egui::Context) {
        for _ in 0..500 {
            state.poll(ctx);
            if !state.photos().is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("photo search did not settle");
    }

    #[tokio::test]
    async fn test_mount_and_edit() {
        let server = MockServer::start(MockResponse::json(&photos_json("Harbor"))).await;
        let destination = DestinationStore::new("Sydney");
        let ctx = egui::Context::default();

        let mut state = PhotosState::mount(&destination, client(&server));
        settle(&mut state, &ctx).await;
        assert_eq!(state.photos().data().unwrap()[0].alt_text, "Harbor");

        server.enqueue(MockResponse::json(&photos_json("Bridge"))).await;
        state.set_location("Sydney Harbour".to_string(), &destination);
        assert_eq!(destination.read(), "Sydney Harbour");
        settle(&mut state, &ctx).await;
        assert_eq!(state.photos().data().unwrap()[0].alt_text, "Bridge");

        let requests = server.requests().await;
        assert!(requests[1].query.contains("query=Sydney+Harbour"));
    }

    #[tokio::test]
    async fn test_slow_earlier_search_is_discarded() {
        let server = MockServer::start(MockResponse::json(&photos_json("Fallback"))).await;
        server
            .enqueue(MockResponse::json(&photos_json("Harbor")).with_delay(150))
            .await;
        server.enqueue(MockResponse::json(&photos_json("Bridge"))).await;

        let destination = DestinationStore::new("Sydney");
        let ctx = egui::Context::default();

        let mut state = PhotosState::mount(&destination, client(&server));
        // Let the first request reach the server before the edit
        tokio::time::sleep(Duration::from_millis(30)).await;
        state.set_location("Sydney Harbour".to_string(), &destination);
        settle(&mut state, &ctx).await;
        assert_eq!(state.photos().data().unwrap()[0].alt_text, "Bridge");

        // The delayed answer for "Sydney" arrives later and is ignored
        tokio::time::sleep(Duration::from_millis(250)).await;
        state.poll(&ctx);
        assert_eq!(state.photos().data().unwrap()[0].alt_text, "Bridge");
    }

    #[tokio::test]
    async fn test_error_message() {
        let server = MockServer::start(MockResponse::error(500, "down")).await;
        let destination = DestinationStore::new("Sydney");
        let ctx = egui::Context::default();

        let mut state = PhotosState::mount(&destination, client(&server));
        settle(&mut state, &ctx).await;
        assert_eq!(
            state.photos().error(),
            Some("Failed to load images. Please try again.")
        );
    }
}
