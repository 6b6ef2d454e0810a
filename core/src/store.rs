//! Injectable posts state container.
//!
//! `PostsStore` owns one [`PostsState`], a [`PostClient`] and the host's
//! [`Transport`]. Each remote method dispatches `Pending`, performs exactly one
//! round-trip, then dispatches `Fulfilled` or `Rejected`. There is no
//! cancellation and no timeout at this layer.

use tracing::debug;

use crate::client::PostClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::state::{reduce, Action, Operation, Outcome, PostsState};
use crate::types::{NewPost, PostPatch};

pub struct PostsStore<T> {
    client: PostClient,
    transport: T,
    state: PostsState,
}

impl<T: Transport> PostsStore<T> {
    pub fn new(client: PostClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: PostsState::default(),
        }
    }

    pub fn state(&self) -> &PostsState {
        &self.state
    }

    pub fn client(&self) -> &PostClient {
        &self.client
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn reset_post_state(&mut self) {
        self.dispatch(Action::ResetPostState);
    }

    pub fn clear_error(&mut self) {
        self.dispatch(Action::ClearError);
    }

    pub fn fetch_posts(&mut self) -> Result<(), ApiError> {
        let request = Ok(self.client.build_list_posts());
        self.run(Operation::FetchPosts, request, |client, response| {
            client.parse_list_posts(response).map(Outcome::PostsFetched)
        })
    }

    pub fn fetch_post(&mut self, id: &str) -> Result<(), ApiError> {
        let request = Ok(self.client.build_get_post(id));
        self.run(Operation::FetchPost, request, |client, response| {
            client.parse_get_post(response).map(Outcome::PostFetched)
        })
    }

    pub fn create_post(&mut self, input: &NewPost) -> Result<(), ApiError> {
        let request = self.client.build_create_post(input);
        self.run(Operation::CreatePost, request, |client, response| {
            client.parse_create_post(response).map(Outcome::PostCreated)
        })
    }

    pub fn update_post(&mut self, id: &str, input: &PostPatch) -> Result<(), ApiError> {
        let request = self.client.build_update_post(id, input);
        self.run(Operation::UpdatePost, request, |client, response| {
            client.parse_update_post(response).map(Outcome::PostUpdated)
        })
    }

    /// The local entry is removed by the requested identifier.
    pub fn delete_post(&mut self, id: &str) -> Result<(), ApiError> {
        let request = Ok(self.client.build_delete_post(id));
        let id = id.to_string();
        self.run(Operation::DeletePost, request, move |client, response| {
            client.parse_delete_post(response).map(|_| Outcome::PostDeleted(id))
        })
    }

    fn run<F>(
        &mut self,
        operation: Operation,
        request: Result<HttpRequest, ApiError>,
        parse: F,
    ) -> Result<(), ApiError>
    where
        F: FnOnce(&PostClient, HttpResponse) -> Result<Outcome, ApiError>,
    {
        self.dispatch(Action::Pending(operation));
        let result = request
            .and_then(|request| self.transport.execute(&request))
            .and_then(|response| parse(&self.client, response));
        match result {
            Ok(outcome) => {
                self.dispatch(Action::Fulfilled(outcome));
                Ok(())
            }
            Err(err) => {
                let message = err
                    .server_message()
                    .unwrap_or_else(|| operation.fallback_message())
                    .to_string();
                self.dispatch(Action::Rejected { operation, message });
                Err(err)
            }
        }
    }
}
