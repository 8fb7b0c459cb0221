use clap::{Parser, Subcommand};
use layer_guide::config::{self, SiteConfig};
use layer_guide::content::ContentStore;
use layer_guide::diagram::NodeId;
use layer_guide::search::{ContentSearch, DEFAULT_SCENARIO_FIELDS};
use layer_guide::stepper::ScenarioStepper;
use layer_guide::{generate, output};
use std::path::Path;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "layer-guide")]
#[command(about = "Static learning site for the DAO / DTO / Entity layering pattern")]
#[command(long_about = "\
Static learning site for the DAO / DTO / Entity layering pattern

Builds a layer diagram, stepped request walkthroughs, a searchable glossary
and a reference download page as plain HTML.

Content structure (every file optional; missing files use the built-in copy):

  content/
  ├── config.toml       # Site config (title, colors, search fields, ...)
  ├── glossary.toml     # [[entries]] term, term_en, definition, example
  ├── scenarios.toml    # [[scenarios]] id, title, description, [[scenarios.steps]]
  ├── download.toml     # [artifact], [[resources]], tips (markdown)
  └── assets/           # Copied to the output root (e.g. dao-dto-reference.pdf)

Run 'layer-guide gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load content and write the full site
    Build,
    /// Validate content and print the inventory without building
    Check,
    /// Search the glossary (or scenarios) the way the site does
    Search {
        /// Case-insensitive substring; blank matches everything
        query: String,
        /// Search scenarios instead of glossary terms
        #[arg(long)]
        scenarios: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one step of a scenario walkthrough
    Scenario {
        /// Scenario id, e.g. user-registration
        id: String,
        /// Step to show (1-based)
        #[arg(long, default_value_t = 1)]
        step: usize,
    },
    /// Print the info panel of a diagram node
    Concept {
        /// Node id: controller, dto, service, entity, dao, database
        id: NodeId,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (store, site_config) = load(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&store, &site_config, &cli.source, &cli.output)?;
            output::print_generate_output(&report, &site_config);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (store, site_config) = load(&cli.source)?;
            output::print_check_output(&store, &site_config, &cli.source);
            println!("==> Content is valid");
        }
        Command::Search {
            query,
            scenarios,
            json,
        } => {
            let (store, site_config) = load(&cli.source)?;
            if scenarios {
                let mut search = ContentSearch::new(&store.scenarios, &DEFAULT_SCENARIO_FIELDS);
                search.set_query(query);
                if json {
                    println!("{}", output::format_search_json(&search)?);
                } else {
                    output::print_lines(&output::format_scenario_search(&search));
                }
            } else {
                let mut search = ContentSearch::new(&store.glossary, &site_config.search.fields);
                search.set_query(query);
                if json {
                    println!("{}", output::format_search_json(&search)?);
                } else {
                    output::print_lines(&output::format_glossary_search(&search));
                }
            }
        }
        Command::Scenario { id, step } => {
            let (store, _) = load(&cli.source)?;
            let scenario = store.scenario(&id).ok_or_else(|| {
                let ids: Vec<&str> = store.scenarios.iter().map(|s| s.id.as_str()).collect();
                format!("unknown scenario '{}' (expected one of: {})", id, ids.join(", "))
            })?;
            let stepper = step
                .checked_sub(1)
                .and_then(|index| ScenarioStepper::at(scenario, index))
                .ok_or_else(|| {
                    format!(
                        "scenario '{}' has {} steps; --step must be 1..={}",
                        id,
                        scenario.steps.len(),
                        scenario.steps.len()
                    )
                })?;
            output::print_lines(&output::format_scenario_step(&stepper));
        }
        Command::Concept { id } => {
            output::print_lines(&output::format_concept(id.node()));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load site config and content from the source directory.
fn load(source: &Path) -> Result<(ContentStore, SiteConfig), Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let store = ContentStore::load(source)?;
    Ok((store, site_config))
}
