//! Text views. Everything here reads from `PostsState` only.

use std::io::{self, Write};

use blog_core::{FormErrors, Post, PostsState};

const DATE_FORMAT: &str = "%B %-d, %Y";

pub fn post_list(out: &mut impl Write, state: &PostsState) -> io::Result<()> {
    if state.posts.is_empty() {
        writeln!(out, "No posts yet. Create one with `blog create`.")?;
        return Ok(());
    }
    for post in &state.posts {
        writeln!(
            out,
            "{}  {}  ({})",
            post.id,
            post.title,
            post.created_at.format(DATE_FORMAT)
        )?;
    }
    Ok(())
}

pub fn post_detail(out: &mut impl Write, post: &Post) -> io::Result<()> {
    writeln!(out, "{}", post.title)?;
    writeln!(out, "{}", "=".repeat(post.title.chars().count()))?;
    writeln!(out, "Posted {}", post.created_at.format(DATE_FORMAT))?;
    writeln!(out, "Image: {}", post.image_url)?;
    for paragraph in post.paragraphs() {
        writeln!(out)?;
        writeln!(out, "{paragraph}")?;
    }
    Ok(())
}

/// The current post, or a hint when the slot is empty.
pub fn current_post(out: &mut impl Write, state: &PostsState) -> io::Result<()> {
    match &state.post {
        Some(post) => post_detail(out, post),
        None => writeln!(out, "Post not found"),
    }
}

pub fn error(out: &mut impl Write, state: &PostsState) -> io::Result<()> {
    if let Some(message) = &state.error {
        writeln!(out, "error: {message}")?;
    }
    Ok(())
}

pub fn form_errors(out: &mut impl Write, errors: &FormErrors) -> io::Result<()> {
    for message in errors.messages() {
        writeln!(out, "error: {message}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{reduce, Action, Outcome};

    fn post() -> Post {
        serde_json::from_str(
            r#"{"_id":"65f1c0a2b3c4d5e6f7a8b9c0","title":"Hello","content":"One\n\nTwo","imageUrl":"http://x/img.png","createdAt":"2024-03-13T10:00:00.000Z"}"#,
        )
        .unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_list_shows_hint() {
        let text = render(|out| post_list(out, &PostsState::default()));
        assert!(text.starts_with("No posts yet"));
    }

    #[test]
    fn list_shows_id_title_and_date() {
        let state = reduce(
            PostsState::default(),
            Action::Fulfilled(Outcome::PostsFetched(vec![post()])),
        );
        let text = render(|out| post_list(out, &state));
        assert_eq!(text, "65f1c0a2b3c4d5e6f7a8b9c0  Hello  (March 13, 2024)\n");
    }

    #[test]
    fn detail_renders_paragraphs() {
        let text = render(|out| post_detail(out, &post()));
        assert_eq!(
            text,
            "Hello\n=====\nPosted March 13, 2024\nImage: http://x/img.png\n\nOne\n\nTwo\n"
        );
    }

    #[test]
    fn error_slot_is_printed_verbatim() {
        let mut state = PostsState::default();
        state.error = Some("Post not found".to_string());
        assert_eq!(render(|out| error(out, &state)), "error: Post not found\n");
    }
}
