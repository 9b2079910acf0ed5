use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use namveda::{
    build_astrology_prompt, build_name_prompt, build_sibling_prompt, compute_birth_chart,
    generate_names, AstrologyFilters, AstrologySystem, BirthDate, Config, GeminiClient,
    NameFilters, Prompt, SiblingFilters, SuggestionSource,
};

#[derive(Parser)]
#[command(name = "namveda", version, about = "Baby name suggestions and birth chart facts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the birth chart for a date (YYYY-MM-DD)
    Chart {
        date: String,
        /// Print JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent to the AI endpoint
    Prompt {
        #[command(subcommand)]
        flow: PromptFlow,
    },
    /// Generate name suggestions with the configured AI endpoint
    Suggest(NameArgs),
}

#[derive(Subcommand)]
enum PromptFlow {
    Names(NameArgs),
    Astrology {
        #[arg(long)]
        gender: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "vedic")]
        system: String,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        place: Option<String>,
    },
    Sibling {
        #[arg(long)]
        gender: String,
        /// Existing sibling name (repeatable)
        #[arg(long = "name", required = true)]
        names: Vec<String>,
        /// Matching preference (repeatable)
        #[arg(long = "prefer")]
        preferences: Vec<String>,
    },
}

#[derive(Args)]
struct NameArgs {
    #[arg(long)]
    gender: String,
    #[arg(long = "inspiration")]
    inspirations: Vec<String>,
    #[arg(long = "religion")]
    religions: Vec<String>,
    #[arg(long = "style")]
    styles: Vec<String>,
    #[arg(long)]
    min_length: Option<u32>,
    #[arg(long)]
    max_length: Option<u32>,
    #[arg(long)]
    starts_with: Option<String>,
    #[arg(long)]
    ends_with: Option<String>,
    #[arg(long)]
    meaning: Option<String>,
}

impl From<NameArgs> for NameFilters {
    fn from(args: NameArgs) -> Self {
        NameFilters {
            inspirations: args.inspirations,
            gender: args.gender,
            religions: args.religions,
            styles: args.styles,
            min_length: args.min_length,
            max_length: args.max_length,
            starting_letter: args.starts_with,
            ending_letter: args.ends_with,
            desired_meaning: args.meaning,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    namveda::logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Chart { date, json } => run_chart(&date, json)?,
        Command::Prompt { flow } => run_prompt(flow)?,
        Command::Suggest(args) => run_suggest(args.into()).await?,
    }

    Ok(())
}

fn run_chart(date: &str, json: bool) -> Result<()> {
    let birth = BirthDate::parse(date)?;
    let chart = compute_birth_chart(birth.date);

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("🔭 Birth Chart for {}", birth.date);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Life path number: {} ({})", chart.life_path_number, chart.life_path_meaning);
    println!("✓ Zodiac sign:      {}", chart.zodiac_sign);
    println!("✓ Chinese zodiac:   {}", chart.chinese_zodiac_animal);
    println!("✓ Nakshatra:        {} (approx.)", chart.nakshatra);

    Ok(())
}

fn print_prompt(prompt: &Prompt) {
    println!("{}", prompt.text);
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", prompt.system_instruction);
}

fn run_prompt(flow: PromptFlow) -> Result<()> {
    match flow {
        PromptFlow::Names(args) => {
            let prompt = build_name_prompt(&args.into())?;
            print_prompt(&prompt);
        }
        PromptFlow::Astrology {
            gender,
            date,
            system,
            time,
            place,
        } => {
            let filters = AstrologyFilters {
                gender,
                astrology_system: system.parse::<AstrologySystem>()?,
                birth_date: date,
                birth_time: time,
                birth_place: place,
            };
            let (prompt, _) = build_astrology_prompt(&filters)?;
            print_prompt(&prompt);
        }
        PromptFlow::Sibling {
            gender,
            names,
            preferences,
        } => {
            let filters = SiblingFilters {
                existing_names: names,
                new_baby_gender: gender,
                matching_preferences: preferences,
            };
            print_prompt(&build_sibling_prompt(&filters)?);
        }
    }

    Ok(())
}

async fn run_suggest(filters: NameFilters) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = GeminiClient::new(config.ai.api_url, config.ai.api_key)?;

    println!("🤖 Generating names...\n");
    let result = generate_names(&client, &filters).await?;

    if result.source == SuggestionSource::Fallback {
        eprintln!("⚠️  AI endpoint unavailable, showing fallback names\n");
    }

    for suggestion in &result.names {
        println!("✓ {} ({}) - {}", suggestion.name, suggestion.pronunciation, suggestion.meaning);
        println!("    origin: {}, gender: {}", suggestion.origin, suggestion.gender);
    }
    println!("\n{} names", result.names.len());

    Ok(())
}
