//! Minitube CLI: command-line client for the Minitube API.
//!
//! Configure with MINITUBE_API_URL (default http://localhost:3000). Log in once with
//! `minitube login`, or set MINITUBE_TOKEN to use a bearer token directly.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use minitube_api_client::{ResourceId, Role, UploadCoordinator, UploadRequest, VideoStatus};
use minitube_cli::progress::run_with_progress;
use minitube_cli::session::SessionStore;
use minitube_cli::table::{render_channel, render_video_table};
use minitube_cli::{check_file, connect, init_tracing, open_file, parse_status};
use minitube_core::{ClientConfig, ErrorMetadata};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minitube", about = "Minitube API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video file straight to storage
    Upload {
        /// Path to the video file
        file: PathBuf,
        /// Video title (1-200 characters)
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Override the media type inferred from the extension
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Check whether a file would be accepted for upload, without uploading
    Check {
        file: PathBuf,
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Browse and manage videos
    Videos {
        #[command(subcommand)]
        sub: VideoCommands,
    },
    /// Read and write comments
    Comments {
        #[command(subcommand)]
        sub: CommentCommands,
    },
    /// Like a video (again to remove the like)
    Like { video_id: String },
    /// Dislike a video (again to remove the dislike)
    Dislike { video_id: String },
    /// Show likes and dislikes on a video
    Likes { video_id: String },
    /// Manage playlists
    Playlists {
        #[command(subcommand)]
        sub: PlaylistCommands,
    },
    /// Channel pages and subscriptions
    Channel {
        #[command(subcommand)]
        sub: ChannelCommands,
    },
    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Admin console (requires an ADMIN session)
    Admin {
        #[command(subcommand)]
        sub: AdminCommands,
    },
}

#[derive(Subcommand)]
enum VideoCommands {
    List {
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    Get { id: String },
    /// Count a view
    View { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum CommentCommands {
    List { video_id: String },
    Add { video_id: String, content: String },
    Delete { comment_id: String },
}

#[derive(Subcommand)]
enum PlaylistCommands {
    /// Playlists owned by a user
    List { username: String },
    Get { id: String },
    Create { name: String },
    Rename { id: String, name: String },
    Delete { id: String },
    Add { id: String, video_id: String },
    Remove { id: String, video_id: String },
    /// Add the video if absent, remove it if present
    Toggle { id: String, video_id: String },
}

#[derive(Subcommand)]
enum ChannelCommands {
    Show {
        username: String,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    Subscription { username: String },
    Subscribe { username: String },
    Unsubscribe { username: String },
}

#[derive(Subcommand)]
enum AdminCommands {
    Users {
        #[command(subcommand)]
        sub: AdminUserCommands,
    },
    Videos {
        #[command(subcommand)]
        sub: AdminVideoCommands,
    },
    DeleteComment { comment_id: String },
}

#[derive(Subcommand)]
enum AdminUserCommands {
    List,
    Create {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "USER")]
        role: Role,
    },
    /// Change a user's role (USER or ADMIN)
    Role { id: String, role: Role },
    Delete { id: String },
}

#[derive(Subcommand)]
enum AdminVideoCommands {
    List,
    Get { id: String },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<VideoStatus>,
    },
    Delete { id: String },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn print_done(message: impl Into<String>) -> Result<()> {
    print_json(&serde_json::json!({ "success": true, "message": message.into() }))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::from_env().context("Invalid MINITUBE_* configuration")?;
    init_tracing(config.log_format);

    let cli = Cli::parse();

    // Local commands never resolve a credential
    match cli.command {
        Commands::Check { file, content_type } => {
            print_json(&check_file(&file, content_type).await?)
        }
        Commands::Logout => {
            let store = SessionStore::from_config(&config)?;
            let removed = store.clear()?;
            print_json(&serde_json::json!({ "success": true, "loggedOut": removed }))
        }
        command => run(&config, command).await,
    }
}

async fn run(config: &ClientConfig, command: Commands) -> Result<()> {
    let (store, client) = connect(config)?;

    match command {
        Commands::Upload {
            file,
            title,
            description,
            content_type,
        } => {
            let file = open_file(&file, content_type).await?;
            let mut request = UploadRequest::new(title, file);
            if let Some(description) = description {
                request = request.with_description(description);
            }

            let coordinator = UploadCoordinator::from_config(config, client)
                .context("Invalid MINITUBE_FFPROBE_PATH")?;
            let outcome = run_with_progress(coordinator.session(), request).await;

            match outcome.into_result() {
                Ok(receipt) => print_json(&receipt)?,
                Err(err) => {
                    let hint = err.suggested_action().unwrap_or_default();
                    return Err(anyhow::Error::new(err.clone()).context(format!(
                        "Upload failed [{}]: {} {}",
                        err.error_code(),
                        err.client_message(),
                        hint
                    )));
                }
            }
        }
        Commands::Videos { sub } => match sub {
            VideoCommands::List { format } => {
                let videos = client.list_videos().await?;
                match format {
                    OutputFormat::Json => print_json(&videos)?,
                    OutputFormat::Table => print!("{}", render_video_table(&videos, Utc::now())),
                }
            }
            VideoCommands::Get { id } => {
                print_json(&client.get_video(&ResourceId::parse(&id)).await?)?;
            }
            VideoCommands::View { id } => {
                client.increase_view(&ResourceId::parse(&id)).await;
                print_done(format!("View counted for video {}", id))?;
            }
            VideoCommands::Delete { id } => {
                client.delete_video(&ResourceId::parse(&id)).await?;
                print_done(format!("Video {} deleted", id))?;
            }
        },
        Commands::Comments { sub } => match sub {
            CommentCommands::List { video_id } => {
                print_json(&client.list_comments(&ResourceId::parse(&video_id)).await?)?;
            }
            CommentCommands::Add { video_id, content } => {
                client
                    .add_comment(&ResourceId::parse(&video_id), &content)
                    .await?;
                print_done("Comment added")?;
            }
            CommentCommands::Delete { comment_id } => {
                client
                    .delete_comment(&ResourceId::parse(&comment_id))
                    .await?;
                print_done(format!("Comment {} deleted", comment_id))?;
            }
        },
        Commands::Like { video_id } => {
            client.toggle_like(&ResourceId::parse(&video_id), true).await?;
            print_done("Like toggled")?;
        }
        Commands::Dislike { video_id } => {
            client
                .toggle_like(&ResourceId::parse(&video_id), false)
                .await?;
            print_done("Dislike toggled")?;
        }
        Commands::Likes { video_id } => {
            let likes = client.get_likes(&ResourceId::parse(&video_id)).await?;
            let liked = likes.iter().filter(|l| l.is_like).count();
            print_json(&serde_json::json!({
                "likes": liked,
                "dislikes": likes.len() - liked,
                "reactions": likes,
            }))?;
        }
        Commands::Playlists { sub } => match sub {
            PlaylistCommands::List { username } => {
                print_json(&client.user_playlists(&username).await?)?;
            }
            PlaylistCommands::Get { id } => {
                print_json(&client.get_playlist(&ResourceId::parse(&id)).await?)?;
            }
            PlaylistCommands::Create { name } => {
                client.create_playlist(&name).await?;
                print_done(format!("Playlist {} created", name.trim()))?;
            }
            PlaylistCommands::Rename { id, name } => {
                client
                    .rename_playlist(&ResourceId::parse(&id), &name)
                    .await?;
                print_done(format!("Playlist {} renamed", id))?;
            }
            PlaylistCommands::Delete { id } => {
                client.delete_playlist(&ResourceId::parse(&id)).await?;
                print_done(format!("Playlist {} deleted", id))?;
            }
            PlaylistCommands::Add { id, video_id } => {
                client
                    .add_to_playlist(&ResourceId::parse(&id), &ResourceId::parse(&video_id))
                    .await?;
                print_done(format!("Video {} added to playlist {}", video_id, id))?;
            }
            PlaylistCommands::Remove { id, video_id } => {
                client
                    .remove_from_playlist(&ResourceId::parse(&id), &ResourceId::parse(&video_id))
                    .await?;
                print_done(format!("Video {} removed from playlist {}", video_id, id))?;
            }
            PlaylistCommands::Toggle { id, video_id } => {
                let playlist = client.get_playlist(&ResourceId::parse(&id)).await?;
                let change = client
                    .toggle_video(&playlist, &ResourceId::parse(&video_id))
                    .await?;
                print_json(&serde_json::json!({ "playlist": id, "videoId": video_id, "change": change }))?;
            }
        },
        Commands::Channel { sub } => match sub {
            ChannelCommands::Show { username, format } => {
                let channel = client.get_channel(&username).await?;
                match format {
                    OutputFormat::Json => print_json(&channel)?,
                    OutputFormat::Table => {
                        print!("{}", render_channel(&username, &channel, Utc::now()))
                    }
                }
            }
            ChannelCommands::Subscription { username } => {
                print_json(&client.subscription_status(&username).await?)?;
            }
            ChannelCommands::Subscribe { username } => {
                client.subscribe(&username).await?;
                print_done(format!("Subscribed to {}", username))?;
            }
            ChannelCommands::Unsubscribe { username } => {
                client.unsubscribe(&username).await?;
                print_done(format!("Unsubscribed from {}", username))?;
            }
        },
        Commands::Register { username, password } => {
            client.register(&username, &password).await?;
            print_done(format!("Account {} created; log in to continue", username.trim()))?;
        }
        Commands::Login { username, password } => {
            let session = client.login(&username, &password).await?;
            store.save(&session)?;
            print_json(&serde_json::json!({
                "username": session.username,
                "role": session.role,
                "sessionFile": store.path(),
            }))?;
        }
        Commands::Check { .. } | Commands::Logout => {
            anyhow::bail!("This command does not use the API")
        }
        Commands::Admin { sub } => match sub {
            AdminCommands::Users { sub } => match sub {
                AdminUserCommands::List => print_json(&client.admin_list_users().await?)?,
                AdminUserCommands::Create {
                    username,
                    password,
                    role,
                } => {
                    print_json(&client.admin_create_user(&username, &password, role).await?)?;
                }
                AdminUserCommands::Role { id, role } => {
                    print_json(&client.admin_update_role(&ResourceId::parse(&id), role).await?)?;
                }
                AdminUserCommands::Delete { id } => {
                    print_json(&client.admin_delete_user(&ResourceId::parse(&id)).await?)?;
                }
            },
            AdminCommands::Videos { sub } => match sub {
                AdminVideoCommands::List => print_json(&client.admin_list_videos().await?)?,
                AdminVideoCommands::Get { id } => {
                    print_json(&client.admin_get_video(&ResourceId::parse(&id)).await?)?;
                }
                AdminVideoCommands::Update { id, title, status } => {
                    let response = client
                        .admin_update_video(&ResourceId::parse(&id), title.as_deref(), status)
                        .await?;
                    print_json(&response)?;
                }
                AdminVideoCommands::Delete { id } => {
                    print_json(&client.admin_delete_video(&ResourceId::parse(&id)).await?)?;
                }
            },
            AdminCommands::DeleteComment { comment_id } => {
                print_json(
                    &client
                        .admin_delete_comment(&ResourceId::parse(&comment_id))
                        .await?,
                )?;
            }
        },
    }

    Ok(())
}
