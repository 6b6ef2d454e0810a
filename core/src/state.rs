//! Client-side posts state and the pure reducer that drives it.
//!
//! # Design
//! Every remote operation moves through pending, then fulfilled or rejected.
//! Each phase is an [`Action`]; [`reduce`] is the only place the state
//! changes. The three mutating operations additionally own the `success`
//! flag. Nothing resets the flags automatically: views dispatch
//! [`Action::ResetPostState`] or [`Action::ClearError`] between flows.

use crate::types::Post;

/// The five remote operations a view can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchPosts,
    FetchPost,
    CreatePost,
    UpdatePost,
    DeletePost,
}

impl Operation {
    /// Create, update and delete report `success`; the two reads do not.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Operation::CreatePost | Operation::UpdatePost | Operation::DeletePost
        )
    }

    /// Message used when a rejection carries none from the server.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::FetchPosts => "Failed to fetch posts",
            Operation::FetchPost => "Failed to fetch post",
            Operation::CreatePost => "Failed to create post",
            Operation::UpdatePost => "Failed to update post",
            Operation::DeletePost => "Failed to delete post",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
}

/// Which operation the flags currently describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationStatus {
    pub operation: Operation,
    pub phase: Phase,
}

/// Payload of a fulfilled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PostsFetched(Vec<Post>),
    PostFetched(Post),
    PostCreated(Post),
    PostUpdated(Post),
    /// Identifier of the removed post.
    PostDeleted(String),
}

impl Outcome {
    pub fn operation(&self) -> Operation {
        match self {
            Outcome::PostsFetched(_) => Operation::FetchPosts,
            Outcome::PostFetched(_) => Operation::FetchPost,
            Outcome::PostCreated(_) => Operation::CreatePost,
            Outcome::PostUpdated(_) => Operation::UpdatePost,
            Outcome::PostDeleted(_) => Operation::DeletePost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Pending(Operation),
    Fulfilled(Outcome),
    Rejected { operation: Operation, message: String },
    /// Clears `post`, `error` and `success`.
    ResetPostState,
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsState {
    /// Newest first, in the order the server returned them.
    pub posts: Vec<Post>,
    /// The "current post" slot used by detail and edit views.
    pub post: Option<Post>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
    pub last: Option<OperationStatus>,
}

impl PostsState {
    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }
}

/// Apply one action and return the next state.
pub fn reduce(mut state: PostsState, action: Action) -> PostsState {
    match action {
        Action::Pending(operation) => {
            state.loading = true;
            state.error = None;
            if operation.is_mutation() {
                state.success = false;
            }
            state.last = Some(OperationStatus {
                operation,
                phase: Phase::Pending,
            });
        }
        Action::Fulfilled(outcome) => {
            let operation = outcome.operation();
            state.loading = false;
            state.error = None;
            merge(&mut state, outcome);
            if operation.is_mutation() {
                state.success = true;
            }
            state.last = Some(OperationStatus {
                operation,
                phase: Phase::Fulfilled,
            });
        }
        Action::Rejected { operation, message } => {
            state.loading = false;
            state.error = Some(message);
            if operation.is_mutation() {
                state.success = false;
            }
            state.last = Some(OperationStatus {
                operation,
                phase: Phase::Rejected,
            });
        }
        Action::ResetPostState => {
            state.post = None;
            state.error = None;
            state.success = false;
        }
        Action::ClearError => {
            state.error = None;
        }
    }
    state
}

fn merge(state: &mut PostsState, outcome: Outcome) {
    match outcome {
        Outcome::PostsFetched(posts) => state.posts = posts,
        Outcome::PostFetched(post) => state.post = Some(post),
        Outcome::PostCreated(post) => {
            state.posts.insert(0, post.clone());
            state.post = Some(post);
        }
        Outcome::PostUpdated(post) => {
            for existing in state.posts.iter_mut().filter(|p| p.id == post.id) {
                *existing = post.clone();
            }
            state.post = Some(post);
        }
        Outcome::PostDeleted(id) => state.posts.retain(|p| p.id != id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: "Body".to_string(),
            image_url: "http://x/img.png".to_string(),
            created_at: DateTime::<Utc>::default(),
        }
    }

    fn with_posts(posts: Vec<Post>) -> PostsState {
        reduce(
            PostsState::default(),
            Action::Fulfilled(Outcome::PostsFetched(posts)),
        )
    }

    #[test]
    fn initial_state_is_idle() {
        let state = PostsState::default();
        assert!(state.posts.is_empty());
        assert!(state.post.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(!state.success);
    }

    #[test]
    fn pending_read_keeps_success() {
        let mut state = PostsState::default();
        state.success = true;
        state.error = Some("old".to_string());
        let state = reduce(state, Action::Pending(Operation::FetchPosts));
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.success);
    }

    #[test]
    fn pending_mutation_clears_success() {
        let mut state = PostsState::default();
        state.success = true;
        let state = reduce(state, Action::Pending(Operation::CreatePost));
        assert!(state.loading);
        assert!(!state.success);
        assert_eq!(
            state.last,
            Some(OperationStatus {
                operation: Operation::CreatePost,
                phase: Phase::Pending
            })
        );
    }

    #[test]
    fn fetched_posts_replace_collection() {
        let state = with_posts(vec![post("a", "A")]);
        let state = reduce(
            state,
            Action::Fulfilled(Outcome::PostsFetched(vec![post("b", "B"), post("c", "C")])),
        );
        let ids: Vec<&str> = state.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(!state.loading);
        assert!(!state.success);
    }

    #[test]
    fn fetched_post_fills_current_slot_only() {
        let state = with_posts(vec![post("a", "A")]);
        let state = reduce(state, Action::Fulfilled(Outcome::PostFetched(post("z", "Z"))));
        assert_eq!(state.post.as_ref().map(|p| p.id.as_str()), Some("z"));
        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn created_post_goes_to_front_and_becomes_current() {
        let state = with_posts(vec![post("a", "A")]);
        let state = reduce(state, Action::Pending(Operation::CreatePost));
        let state = reduce(state, Action::Fulfilled(Outcome::PostCreated(post("b", "B"))));
        assert_eq!(state.posts[0].id, "b");
        assert_eq!(state.posts[1].id, "a");
        assert_eq!(state.post.as_ref().map(|p| p.id.as_str()), Some("b"));
        assert!(state.success);
        assert!(!state.loading);
    }

    #[test]
    fn updated_post_replaces_matching_entry() {
        let state = with_posts(vec![post("a", "A"), post("b", "B")]);
        let state = reduce(state, Action::Fulfilled(Outcome::PostUpdated(post("b", "B2"))));
        assert_eq!(state.find("b").map(|p| p.title.as_str()), Some("B2"));
        assert_eq!(state.find("a").map(|p| p.title.as_str()), Some("A"));
        assert_eq!(state.post.as_ref().map(|p| p.title.as_str()), Some("B2"));
        assert!(state.success);
    }

    #[test]
    fn deleted_post_is_removed_and_current_post_untouched() {
        let state = with_posts(vec![post("a", "A"), post("b", "B")]);
        let state = reduce(state, Action::Fulfilled(Outcome::PostFetched(post("a", "A"))));
        let state = reduce(state, Action::Pending(Operation::DeletePost));
        let state = reduce(state, Action::Fulfilled(Outcome::PostDeleted("a".to_string())));
        assert!(state.find("a").is_none());
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.post.as_ref().map(|p| p.id.as_str()), Some("a"));
        assert!(state.success);
        assert!(!state.loading);
    }

    #[test]
    fn rejected_mutation_records_message_and_clears_success() {
        let state = reduce(PostsState::default(), Action::Pending(Operation::UpdatePost));
        let state = reduce(
            state,
            Action::Rejected {
                operation: Operation::UpdatePost,
                message: "Post not found".to_string(),
            },
        );
        assert!(!state.loading);
        assert!(!state.success);
        assert_eq!(state.error.as_deref(), Some("Post not found"));
        assert_eq!(state.last.map(|s| s.phase), Some(Phase::Rejected));
    }

    #[test]
    fn rejected_read_leaves_collection_alone() {
        let state = with_posts(vec![post("a", "A")]);
        let state = reduce(
            state,
            Action::Rejected {
                operation: Operation::FetchPosts,
                message: Operation::FetchPosts.fallback_message().to_string(),
            },
        );
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch posts"));
    }

    #[test]
    fn flags_persist_until_reset() {
        let state = reduce(PostsState::default(), Action::Fulfilled(Outcome::PostCreated(post("a", "A"))));
        let state = reduce(state, Action::Pending(Operation::FetchPosts));
        let state = reduce(state, Action::Fulfilled(Outcome::PostsFetched(vec![post("a", "A")])));
        assert!(state.success);
        assert!(state.post.is_some());

        let state = reduce(state, Action::ResetPostState);
        assert!(!state.success);
        assert!(state.post.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn clear_error_only_touches_error() {
        let mut state = with_posts(vec![post("a", "A")]);
        state.error = Some("boom".to_string());
        state.success = true;
        let state = reduce(state, Action::ClearError);
        assert!(state.error.is_none());
        assert!(state.success);
    }
}
