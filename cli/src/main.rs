//! Terminal front end for the blog API.
//!
//! Each subcommand is one view: it dispatches operations on a `PostsStore`
//! and renders whatever ends up in the state.

mod render;
mod transport;

use std::io::{self, Write};
use std::process::ExitCode;

use blog_core::{PostClient, PostForm, PostsStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "blog", version, about = "List, read, and edit blog posts")]
struct Cli {
    /// API root, including the `/api` prefix
    #[arg(long, env = "BLOG_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all posts, newest first
    List,
    /// Show one post
    Show { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image_url: String,
    },
    /// Edit a post; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a post permanently
    Delete { id: String },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let mut store = PostsStore::new(PostClient::new(&cli.api_url), UreqTransport::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&mut store, cli.command, &mut out) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(
    store: &mut PostsStore<UreqTransport>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    match command {
        Command::List => {
            if store.fetch_posts().is_err() {
                return failed(store, out);
            }
            render::post_list(out, store.state())?;
        }
        Command::Show { id } => {
            if store.fetch_post(&id).is_err() {
                return failed(store, out);
            }
            render::current_post(out, store.state())?;
        }
        Command::Create {
            title,
            content,
            image_url,
        } => {
            let form = PostForm {
                title,
                content,
                image_url,
            };
            let input = match form.validate() {
                Ok(input) => input,
                Err(errors) => {
                    render::form_errors(out, &errors)?;
                    return Ok(ExitCode::from(2));
                }
            };
            if store.create_post(&input).is_err() {
                return failed(store, out);
            }
            writeln!(out, "Post created successfully")?;
            render::current_post(out, store.state())?;
            store.reset_post_state();
        }
        Command::Edit {
            id,
            title,
            content,
            image_url,
        } => {
            if store.fetch_post(&id).is_err() {
                return failed(store, out);
            }
            let Some(current) = store.state().post.as_ref() else {
                return failed(store, out);
            };
            let mut form = PostForm::from_post(current);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(content) = content {
                form.content = content;
            }
            if let Some(image_url) = image_url {
                form.image_url = image_url;
            }
            let input = match form.validate() {
                Ok(input) => input,
                Err(errors) => {
                    render::form_errors(out, &errors)?;
                    return Ok(ExitCode::from(2));
                }
            };
            if store.update_post(&id, &input.into()).is_err() {
                return failed(store, out);
            }
            writeln!(out, "Post updated successfully")?;
            render::current_post(out, store.state())?;
            store.reset_post_state();
        }
        Command::Delete { id } => {
            if store.delete_post(&id).is_err() {
                return failed(store, out);
            }
            writeln!(out, "Post {id} deleted")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn failed(store: &PostsStore<UreqTransport>, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    render::error(out, store.state())?;
    Ok(ExitCode::FAILURE)
}
