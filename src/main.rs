use std::env;

use anyhow::Result;
use clap::Parser;

use pr_autotag::event::{EventContext, Gate};
use pr_autotag::git::TagSource;
use pr_autotag::publish::{GithubRefStore, PublishOutcome};
use pr_autotag::{catalog, config, policy, publish, resolver, ui, AutotagError};

#[derive(clap::Parser)]
#[command(
    name = "pr-autotag",
    about = "Compute and publish the next semver tag from pull request labels"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path to the git repository")]
    repo: String,

    #[arg(long, help = "Resolve the next tag without publishing it")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("pr-autotag {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let event_name = env::var("GITHUB_EVENT_NAME").unwrap_or_default();
    if event_name != "pull_request" {
        ui::display_skip("pr-autotag only runs on pull_request events");
        return Ok(());
    }

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    config.apply_env_overrides();

    let event = EventContext::from_env()?;

    let prerelease_active = config.tag_prerelease
        || event.labels.iter().any(|l| *l == config.prerelease_label);

    if let Gate::Skip(reason) = event.should_proceed(prerelease_active) {
        ui::display_skip(&reason);
        return Ok(());
    }

    let source = TagSource::open(&args.repo)?;
    ui::display_status("Fetching tags from origin...");
    match source.fetch_tags("origin") {
        Ok(()) => ui::display_success("Fetched tags from origin"),
        Err(e) => ui::display_status(&format!(
            "Warning: could not fetch tags: {}. Using local tags.",
            e
        )),
    }
    let tags = source.list_tags()?;

    let policy = policy::derive_policy(&event.labels, &config, &event);
    let base = catalog::latest_release(&tags, &policy.prefix);
    let resolved = resolver::next_tag(&tags, &policy)?;
    ui::display_resolved_tag(&base, &resolved);

    if args.dry_run {
        ui::display_status(&format!("Dry run: would publish {}", resolved));
        return Ok(());
    }

    // Both preconditions are checked before any publication call goes out
    let token = config
        .token
        .clone()
        .ok_or_else(|| AutotagError::config("No API token set (github-token input)"))?;
    let commit_sha = event.target_sha()?;

    let store = GithubRefStore::new(&token, &event.owner, &event.repo)?;
    ui::display_status(&format!("Creating tag {} for {}", resolved, commit_sha));

    match publish::publish(&store, &resolved, &commit_sha, &event.pr_title)? {
        PublishOutcome::Created => {
            ui::display_success(&format!("Published tag {}", resolved));
        }
        PublishOutcome::Moved => {
            ui::display_success(&format!(
                "Tag {} already existed; moved it to {}",
                resolved, commit_sha
            ));
        }
    }

    Ok(())
}
