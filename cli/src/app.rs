use castmind_core::api::{assemble_context, AppContext, CliError, ContextOutcome, Question};

use crate::commands::{AskArgs, InitArgs};

const CHUNK_PREVIEW_CHARS: usize = 160;

const CONFIG_TEMPLATE: &str = r#"# castmind configuration.
# Every key is optional; unset keys fall back to built-in defaults.

project_id = "castmind"

[logging]
enabled = true
console = true
file = false
level = "info"
# directory = "/var/log/castmind"

[budget]
daily_budget = 10.0
cost_per_search = 0.0
cost_per_fetch = 0.05

[retrieval]
total_limit = 12
min_similarity = 0.3
variant_timeout_ms = 4000

[sufficiency]
sufficient_threshold = 0.7
partial_threshold = 0.4

[dispatch]
enabled = true
max_tools_per_request = 2
fetch_timeout_ms = 6000

[assembly]
max_relevant_chunks = 4

[analyzer.provider]
kind = "heuristic"
# kind = "model"
# base_url = "http://127.0.0.1:8800"
# api_key = ""
# timeout_ms = 2500

[search.provider]
kind = "service"
base_url = "http://127.0.0.1:8900"
api_key = ""
timeout_ms = 5000

[fetchers]
timeout_ms = 5000

# [fetchers.endpoints.sports]
# base_url = "http://127.0.0.1:9000/sports"
# api_key = ""
# cost_per_call = 0.05

[profile]
# host = "Joe"
# guest = "Khabib Nurmagomedov"
# topics = ["mma", "wrestling"]
"#;

pub async fn run_ask(ask: AskArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let services = ctx.build_services().await?;
    let question = Question::new(ask.question, ask.episode);
    let outcome = assemble_context(ctx.cfg(), &services, &question).await?;

    if ask.json {
        println!("{}", serde_json::to_string_pretty(&outcome).map_err(anyhow::Error::new)?);
    } else {
        print_outcome(&outcome);
    }

    let daily = services.ledger.daily();
    eprintln!(
        "spend today: ${:.2} of ${:.2} (remaining ${:.2}){}",
        daily.cumulative_cost,
        daily.daily_budget,
        daily.remaining_budget,
        if daily.cost_saving_mode {
            " [cost-saving]"
        } else {
            ""
        }
    );
    for (category, cost) in services.ledger.summary_by_category() {
        eprintln!("  {category}: ${cost:.2}");
    }

    Ok(0)
}

fn print_outcome(outcome: &ContextOutcome) {
    println!(
        "analysis: intent={} temporal={} confidence={:.2}",
        outcome.analysis.intent.as_str(),
        outcome.analysis.temporal.as_str(),
        outcome.analysis.confidence,
    );
    if !outcome.analysis.entities.is_empty() {
        println!("entities: {}", outcome.analysis.entities.join(", "));
    }
    println!(
        "route: {} ({})",
        outcome.decision.priority.as_str(),
        outcome.decision.reasoning,
    );
    println!(
        "local sufficiency: {:.2} ({})",
        outcome.verdict.confidence_score,
        outcome.verdict.recommendation.as_str(),
    );

    println!("\ncontext chunks ({}):", outcome.context.chunks.len());
    for (i, chunk) in outcome.context.chunks.iter().enumerate() {
        println!(
            "  {}. [{}/{} {:.2}] {}",
            i + 1,
            chunk.source_type.as_str(),
            chunk.origin_strategy.as_str(),
            chunk.ranking_score(),
            preview(&chunk.content),
        );
    }

    if !outcome.context.external.is_empty() {
        println!("\nexternal data ({}):", outcome.context.external.len());
        for result in &outcome.context.external {
            if result.success {
                let body = result
                    .payload
                    .as_ref()
                    .and_then(|p| serde_json::to_string(p).ok())
                    .unwrap_or_else(|| "{}".to_string());
                println!("  - {} ok: {}", result.category.as_str(), preview(&body));
            } else {
                println!(
                    "  - {} failed: {}",
                    result.category.as_str(),
                    result.error.as_deref().unwrap_or("unknown error"),
                );
            }
        }
    }

    if outcome.context.starved {
        println!("\nno usable context was found for this question");
    }
}

fn preview(text: &str) -> String {
    let mut out = String::new();
    for (idx, ch) in text.chars().enumerate() {
        if idx >= CHUNK_PREVIEW_CHARS {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    out
}

pub fn run_init(init: InitArgs) -> Result<i32, CliError> {
    let path = std::path::Path::new("config.toml");
    if path.exists() && !init.force {
        return Err(CliError::Command(
            "config.toml already exists (use --force to overwrite)".to_string(),
        ));
    }
    std::fs::write(path, CONFIG_TEMPLATE)?;
    println!("wrote {}", path.display());
    Ok(0)
}
