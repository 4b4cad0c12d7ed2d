use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod config;
mod error;
mod git_ops;
mod issue;
mod publish;
mod resize;
mod ui;

use publish::PublishRequest;

#[derive(clap::Parser)]
#[command(
    name = "image-publish",
    about = "Resize newsletter images, commit them to the image repository, and print the markdown link"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Copy and resize an image into the issue directory, commit, and print its link
    Publish {
        /// Path to the source image
        file: PathBuf,

        #[arg(short, long, help = "Caption used as the markdown alt text")]
        caption: Option<String>,

        #[arg(
            short,
            long,
            help = "Maximum width in pixels; a trailing 'px' is accepted [default: configured max_width, 600]"
        )]
        width: Option<String>,

        #[arg(
            short,
            long,
            help = "Issue identifier; resolved from the draft document when omitted"
        )]
        issue: Option<String>,

        #[arg(short = 'r', long, help = "Path to the local image repository")]
        repo: PathBuf,

        #[arg(long, help = "Commit locally without pushing to the remote")]
        no_push: bool,

        #[arg(long, help = "Never prompt; a missing caption becomes empty")]
        non_interactive: bool,
    },

    /// Push the image repository's current branch to its remote
    Push {
        #[arg(short = 'r', long, help = "Path to the local image repository")]
        repo: PathBuf,

        #[arg(long, help = "Remote to push to")]
        remote: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Commands::Publish {
            file,
            caption,
            width,
            issue,
            repo,
            no_push,
            non_interactive,
        } => {
            if non_interactive {
                config.behavior.non_interactive = true;
            }

            let request = PublishRequest {
                source: file,
                caption,
                max_width: width.unwrap_or_else(|| config.max_width.clone()),
                issue,
                image_repo: repo,
                push: config.commit.push && !no_push,
            };

            ui::display_status(&format!("Publishing {}", request.source.display()));

            match publish::publish(&request, &config) {
                Ok(_) => {
                    if request.push {
                        ui::display_success("Images committed and pushed");
                    } else {
                        ui::display_success("Images committed locally (push skipped)");
                    }
                }
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }

        Commands::Push { repo, remote } => {
            let remote = remote.unwrap_or_else(|| config.commit.remote.clone());

            ui::display_status(&format!("Pushing to remote '{}'", remote));

            match publish::push(&repo, &remote) {
                Ok(_) => ui::display_success(&format!("Pushed to '{}'", remote)),
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
