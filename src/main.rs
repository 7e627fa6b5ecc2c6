//! equiptrain admin console
//!
//! Drives the dashboard's list stores, referral tools and SEO resolver
//! against a running backend.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use equiptrain::api::{HttpResourceClient, ListFilters};
use equiptrain::config::Config;
use equiptrain::models::{
    Course, EntityId, GalleryItem, Orderable, Partner, ReferralEvent, ReferralSource,
};
use equiptrain::referral::{daily_series, rollup, DailyCount, ReferralCounts, ReferralSummary};
use equiptrain::seo::{HeadModel, SeoResolution};
use equiptrain::store::{CommitOutcome, ListStore, ToggleOutcome};
use equiptrain::{telemetry, AppContext};

#[derive(Parser)]
#[command(name = "equiptrain", version, about = "Admin console for the training institute backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a resource in display order
    List {
        resource: Resource,
        /// Only active (true) or inactive (false) entries
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Move the entry at position FROM to position TO (1-based) and commit
    Move {
        resource: Resource,
        from: usize,
        to: usize,
    },
    /// Toggle the active flag of an entry
    Toggle { resource: Resource, id: EntityId },
    /// Build a partner referral link
    RefLink {
        #[arg(long)]
        source: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        post: Option<String>,
    },
    /// Print the head tags a public route resolves to
    Seo {
        path: String,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Summarise exported referral events (JSON array)
    ReferralReport {
        file: PathBuf,
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Resource {
    Courses,
    Gallery,
    Partners,
}

/// One printable line per entity.
trait ConsoleRow: Orderable {
    fn label(&self) -> String;
}

impl ConsoleRow for Course {
    fn label(&self) -> String {
        match self.duration_weeks {
            Some(weeks) => format!("{} ({} weeks)", self.title, weeks),
            None => self.title.clone(),
        }
    }
}

impl ConsoleRow for GalleryItem {
    fn label(&self) -> String {
        format!("{} <{}>", self.title, self.image_url)
    }
}

impl ConsoleRow for Partner {
    fn label(&self) -> String {
        format!("{} [{}]", self.name, self.referral_code)
    }
}

#[derive(Serialize)]
struct ReferralReport<'a> {
    summary: &'a ReferralSummary,
    conversion_rate: f64,
    top_partners: Vec<(&'a str, ReferralCounts)>,
    daily: Vec<DailyCount>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    telemetry::init(&config)?;
    tracing::debug!("API base URL: {}", config.api_base_url);

    let ctx = AppContext::new(config)?;

    match cli.command {
        Command::List {
            resource,
            active,
            search,
        } => {
            let filters = ListFilters {
                is_active: active,
                search,
                ..ListFilters::default()
            };
            match resource {
                Resource::Courses => list::<Course>(&ctx, filters).await?,
                Resource::Gallery => list::<GalleryItem>(&ctx, filters).await?,
                Resource::Partners => list::<Partner>(&ctx, filters).await?,
            }
        }
        Command::Move { resource, from, to } => match resource {
            Resource::Courses => move_entry::<Course>(&ctx, from, to).await?,
            Resource::Gallery => move_entry::<GalleryItem>(&ctx, from, to).await?,
            Resource::Partners => move_entry::<Partner>(&ctx, from, to).await?,
        },
        Command::Toggle { resource, id } => match resource {
            Resource::Courses => toggle::<Course>(&ctx, id).await?,
            Resource::Gallery => toggle::<GalleryItem>(&ctx, id).await?,
            Resource::Partners => toggle::<Partner>(&ctx, id).await?,
        },
        Command::RefLink { source, code, post } => {
            let Some(source) = ReferralSource::parse(&source) else {
                let known: Vec<&str> = ReferralSource::ALL.iter().map(|s| s.as_str()).collect();
                return Err(format!(
                    "Unknown source '{}', expected one of: {}",
                    source,
                    known.join(", ")
                )
                .into());
            };
            let mut draft = ctx.referral_draft();
            draft
                .set_source(Some(source))
                .set_partner_code(code)
                .set_post_id(post);
            if !draft.is_activatable() {
                return Err("A partner code is required".into());
            }
            println!("{}", draft.link());
        }
        Command::Seo { path, lang } => {
            let resolver = ctx.seo();
            let language = lang.unwrap_or_else(|| resolver.language().to_string());
            let mut head = HeadModel::new();
            match resolver.resolve_in(&path, &language, &mut head) {
                SeoResolution::Skipped => println!("No metadata for {}", path),
                SeoResolution::Applied { slug, fallback, .. } => {
                    if fallback {
                        tracing::warn!("No dataset entry for '{}', using defaults", slug);
                    }
                    if let Some(lang) = head.language() {
                        println!("<!-- lang=\"{}\" slug=\"{}\" -->", lang, slug);
                    }
                    print!("{}", head.render());
                }
            }
        }
        Command::ReferralReport { file, top } => {
            let json = std::fs::read_to_string(&file)?;
            let events: Vec<ReferralEvent> = serde_json::from_str(&json)?;
            let summary = rollup(&events);
            let report = ReferralReport {
                summary: &summary,
                conversion_rate: summary.totals.conversion_rate(),
                top_partners: summary.top_partners(top),
                daily: daily_series(&events),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

async fn loaded<T: ConsoleRow>(
    ctx: &AppContext,
    filters: ListFilters,
) -> Result<ListStore<T, HttpResourceClient<T>>, Box<dyn std::error::Error>> {
    let store = ctx.store::<T>().with_filters(filters);
    store.load().await?;
    Ok(store)
}

fn print_rows<T: ConsoleRow>(items: &[T]) {
    for item in items {
        let status = if item.is_active() { "active" } else { "inactive" };
        println!(
            "{:>3}. #{:<5} {:<9} {}",
            item.display_order(),
            item.id(),
            status,
            item.label()
        );
    }
}

async fn list<T: ConsoleRow>(
    ctx: &AppContext,
    filters: ListFilters,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = loaded::<T>(ctx, filters).await?;
    print_rows(&store.items());
    if let Some(page) = store.pagination() {
        println!("page {}/{} ({} total)", page.page, page.total_pages, page.total);
    }
    Ok(())
}

async fn move_entry<T: ConsoleRow>(
    ctx: &AppContext,
    from: usize,
    to: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
        return Err("Positions start at 1".into());
    };

    let store = loaded::<T>(ctx, ListFilters::default()).await?;
    store.move_entity(from, to)?;

    match store.commit_order().await {
        CommitOutcome::Committed => println!("Order saved"),
        CommitOutcome::NothingPending => println!("Order unchanged"),
        CommitOutcome::RolledBack(err) => {
            println!("Order not saved ({}); reloaded from server", err)
        }
    }
    print_rows(&store.items());
    Ok(())
}

async fn toggle<T: ConsoleRow>(
    ctx: &AppContext,
    id: EntityId,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = loaded::<T>(ctx, ListFilters::default()).await?;
    match store.toggle_status(id).await {
        ToggleOutcome::Applied(active) => {
            println!("#{} is now {}", id, if active { "active" } else { "inactive" })
        }
        ToggleOutcome::Reverted(err) => println!("Status unchanged: {}", err.message()),
        ToggleOutcome::Ignored => println!("A status change for #{} is already in progress", id),
        ToggleOutcome::Missing => {
            return Err(format!("No {} entry with id {}", T::RESOURCE, id).into())
        }
    }
    Ok(())
}
