use std::collections::BTreeMap;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed_client::{Comment, FeedClient, FeedClientError, NewPost, Post, PostUpdate, Report};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "feed-cli", version, about = "Command line client for feed-server")]
struct Cli {
    /// Server address; `http://` is added when the scheme is missing.
    #[arg(long, global = true, env = "FEED_SERVER")]
    server: Option<String>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all posts.
    List,
    /// Show one post with its engagement.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// `YYYY-MM-DD` or RFC 3339; defaults to now on the server.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        likes: Option<u64>,
    },
    /// Edit title, content, date and optionally the like count.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        /// Current content is kept when omitted.
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        likes: Option<u64>,
    },
    /// Delete a post.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Like a post.
    Like {
        #[arg(long)]
        id: i64,
    },
    /// React to a post: Laugh, Surprise, Anger or Cry.
    React {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        emoji: String,
    },
    /// Comment on a post.
    Comment {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        author: String,
        #[arg(long)]
        text: String,
    },
    /// List a post's comments.
    Comments {
        #[arg(long)]
        id: i64,
    },
    /// Report a post.
    Report {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        author: String,
        #[arg(long)]
        text: String,
    },
    /// List a post's reports.
    Reports {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()));
    let client = FeedClient::new(server).context("failed to build HTTP client")?;
    let json = cli.json;

    match cli.command {
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            if json {
                print_json(&posts)?;
            } else {
                print_list(&posts);
            }
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            if json {
                print_json(&post)?;
            } else {
                print_post("Post", &post);
            }
        }
        Command::Create {
            title,
            content,
            date,
            likes,
        } => {
            let new_post = NewPost {
                title,
                content,
                date,
                like_count: likes,
                reactions: None,
            };
            let post = client
                .create_post(&new_post)
                .await
                .map_err(map_client_error)?;
            if json {
                print_json(&post)?;
            } else {
                print_post("Post created", &post);
            }
        }
        Command::Update {
            id,
            title,
            content,
            date,
            likes,
        } => {
            let content = match content {
                Some(content) => content,
                None => client.get_post(id).await.map_err(map_client_error)?.content,
            };
            let update = PostUpdate {
                title,
                content,
                date,
                like_count: likes,
            };
            client
                .update_post(id, &update)
                .await
                .map_err(map_client_error)?;
            println!("Post updated: id={id}");
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Post deleted: id={id}");
        }
        Command::Like { id } => {
            let likes = client.like_post(id).await.map_err(map_client_error)?;
            if json {
                print_json(&serde_json::json!({ "id": id, "likeCount": likes }))?;
            } else {
                println!("Post liked: id={id}, likes={likes}");
            }
        }
        Command::React { id, emoji } => {
            let reactions = client
                .react(id, &emoji)
                .await
                .map_err(map_client_error)?;
            if json {
                print_json(&reactions)?;
            } else {
                println!("Reaction added: id={id}");
                println!("reactions: {}", format_reactions(&reactions));
            }
        }
        Command::Comment { id, author, text } => {
            client
                .add_comment(id, &author, &text)
                .await
                .map_err(map_client_error)?;
            println!("Comment added: id={id}");
        }
        Command::Comments { id } => {
            let comments = client.list_comments(id).await.map_err(map_client_error)?;
            if json {
                print_json(&comments)?;
            } else {
                print_comments(&comments);
            }
        }
        Command::Report { id, author, text } => {
            client
                .add_report(id, &author, &text)
                .await
                .map_err(map_client_error)?;
            println!("Report filed: id={id}");
        }
        Command::Reports { id } => {
            let reports = client.list_reports(id).await.map_err(map_client_error)?;
            if json {
                print_json(&reports)?;
            } else {
                print_reports(&reports);
            }
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: FeedClientError) -> anyhow::Error {
    let message = match err {
        FeedClientError::NotFound => "post not found".to_string(),
        FeedClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        FeedClientError::Http(err) => format!("HTTP error: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

fn format_reactions(reactions: &BTreeMap<String, u64>) -> String {
    reactions
        .iter()
        .map(|(emoji, count)| format!("{emoji}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("date: {}", post.date);
    println!("likes: {}", post.like_count);
    println!("reactions: {}", format_reactions(&post.reactions));
    println!("comments: {}", post.comments.len());
    println!("reports: {}", post.reports.len());
}

fn print_list(posts: &[Post]) {
    println!("Posts: {}", posts.len());

    for post in posts {
        println!(
            "- [{}] {} (likes={}, comments={})",
            post.id,
            post.title,
            post.like_count,
            post.comments.len()
        );
    }
}

fn print_comments(comments: &[Comment]) {
    println!("Comments: {}", comments.len());
    for comment in comments {
        println!("- {}: {}", comment.author, comment.text);
    }
}

fn print_reports(reports: &[Report]) {
    println!("Reports: {}", reports.len());
    for report in reports {
        println!("- {}: {}", report.author, report.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn format_reactions_lists_every_category() {
        let reactions = [("Cry".to_string(), 2), ("Laugh".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(format_reactions(&reactions), "Cry=2, Laugh=1");
    }

    #[test]
    fn react_command_parses() {
        let cli = Cli::try_parse_from(["feed-cli", "react", "--id", "3", "--emoji", "Risos"])
            .expect("arguments must parse");
        match cli.command {
            Command::React { id, emoji } => {
                assert_eq!(id, 3);
                assert_eq!(emoji, "Risos");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "feed-cli",
            "list",
            "--server",
            "localhost:9999",
            "--json",
        ])
        .expect("arguments must parse");
        assert_eq!(cli.server.as_deref(), Some("localhost:9999"));
        assert!(cli.json);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn map_client_error_describes_not_found() {
        let err = map_client_error(FeedClientError::NotFound);
        assert_eq!(err.to_string(), "post not found");
    }
}
