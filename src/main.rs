use clap::{Parser, Subcommand};
use tracing::{info, warn};

use club_map::config::Config;
use club_map::constants::ALL_FILTER;
use club_map::directory::Directory;
use club_map::loader;
use club_map::logging;
use club_map::map::CommandBuffer;
use club_map::province::ProvinceFilter;
use club_map::server::{self, Catalog};
use club_map::view::{ClubRow, DetailView, SearchView};

#[derive(Parser)]
#[command(name = "club_map")]
#[command(about = "Map-based directory of student clubs")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Data file or URL, overriding the config
    #[arg(long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive map viewer
    Serve {
        /// Listen address, e.g. 0.0.0.0:3000
        #[arg(long)]
        bind: Option<String>,
    },
    /// Search clubs by name, school, city or tag
    Search {
        query: String,
    },
    /// List provinces in display order with club counts
    Provinces,
    /// List the clubs of a province ("all", "其他" or a province name)
    List {
        #[arg(long, default_value = ALL_FILTER)]
        province: String,
    },
    /// Show one club
    Show {
        id: String,
    },
}

fn print_rows(rows: &[ClubRow]) {
    for row in rows {
        println!("  [{}] {} ({})", row.club_id, row.name, row.affiliation);
    }
}

fn print_detail(view: &DetailView) {
    println!("{}", view.name);
    if view.province.is_empty() {
        println!("{} - {}", view.school, view.city);
    } else {
        println!("{} - {}, {}", view.school, view.city, view.province);
    }
    if let Some(text) = &view.short_description {
        println!("简介: {}", text);
    }
    if let Some(text) = &view.long_description {
        println!("{}", text);
    }
    if !view.tags.is_empty() {
        println!("标签: {}", view.tags.join(", "));
    }
    for link in &view.links {
        println!("{}: {}", link.kind, link.url);
    }
    match view.locate {
        Some(at) => println!("位置: {:.4}, {:.4}", at.lat, at.lng),
        None => println!("位置: -"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data.source = data;
    }

    let mut directory = Directory::new(CommandBuffer::new(), config.map.clone());
    let source = loader::source_for(&config.data.source);
    if let Err(e) = directory.load(source.as_ref()).await {
        // The viewer still starts and alerts once; terminal commands just report it
        warn!("Continuing with an empty collection: {}", e);
        if !matches!(cli.command, Commands::Serve { .. }) {
            eprintln!("❌ {}", e);
        }
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            info!("Starting viewer with {} clubs", directory.clubs().len());
            server::serve(Catalog::from_directory(&mut directory), &config.server).await?;
        }
        Commands::Search { query } => match directory.search(&query) {
            SearchView::Cleared => println!("⚠️  Query too short, use at least 2 characters"),
            SearchView::NoMatches => println!("{}", club_map::constants::NO_SEARCH_MATCH),
            SearchView::Results(rows) => {
                println!("🔎 {} matches for {:?}:", rows.len(), query.trim());
                print_rows(&rows);
            }
        },
        Commands::Provinces => {
            for entry in directory.province_list().entries {
                let filter = ProvinceFilter::from_value(&entry.value);
                let count = directory.province_clubs(&filter).rows().len();
                println!("{} ({})", entry.label, count);
            }
        }
        Commands::List { province } => {
            let view = directory.select_province(&province);
            match view.title() {
                Some(title) => {
                    println!("{}", title);
                    print_rows(view.rows());
                }
                None => println!("{}", view.empty_message().unwrap_or_default()),
            }
        }
        Commands::Show { id } => match directory.show_detail(&id) {
            Some(view) => print_detail(&view),
            None => anyhow::bail!("No club with id {}", id),
        },
    }

    Ok(())
}
