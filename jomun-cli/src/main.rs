//! jomun CLI - query a running jomun-service from the terminal

mod client;

use clap::{Parser, Subcommand};
use client::ServiceClient;
use colored::Colorize;

#[derive(Parser)]
#[command(name = "jomun")]
#[command(about = "Korean safety-law article lookup", long_about = None)]
struct Cli {
    /// Service URL (e.g. http://localhost:5000)
    #[arg(long, global = true, env = "JOMUN_SERVICE_URL", default_value = "http://127.0.0.1:5000")]
    service_url: String,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked keyword search over loaded articles
    Search {
        keyword: String,

        /// Literal substring match instead of ranked token search
        #[arg(short, long)]
        exact: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Free-text answer with source citations and disclaimer
    Answer {
        q: String,
    },

    /// Scan a statute's article tree for a keyword or recurring obligations
    Scan {
        /// Exact law name; omit to scan every loaded document
        #[arg(short, long)]
        law: Option<String>,

        #[arg(short, long, default_value = "")]
        keyword: String,

        /// substring or frequency
        #[arg(short, long, default_value = "substring")]
        mode: String,
    },

    /// Rebuild the service snapshot from its sources
    Reload,

    /// Service health and snapshot counts
    Status,
}

fn main() {
    let cli = Cli::parse();
    let client = ServiceClient::new(&cli.service_url);

    let result = match &cli.command {
        Commands::Search {
            keyword,
            exact,
            page,
            page_size,
        } => {
            let mut params = vec![
                ("keyword", keyword.clone()),
                ("exact", exact.to_string()),
                ("page", page.to_string()),
            ];
            if let Some(size) = page_size {
                params.push(("page_size", size.to_string()));
            }
            client.get("/search", &params).map(|v| show_search(&v, cli.json))
        }
        Commands::Answer { q } => client
            .get("/answer", &[("q", q.clone())])
            .map(|v| show_answer(&v, cli.json)),
        Commands::Scan { law, keyword, mode } => {
            let mut params = vec![("keyword", keyword.clone()), ("mode", mode.clone())];
            if let Some(law) = law {
                params.push(("law", law.clone()));
            }
            client.get("/scan", &params).map(|v| show_scan(&v, cli.json))
        }
        Commands::Reload => client.post("/reload").map(|v| show_json(&v)),
        Commands::Status => client.get("/healthz", &[]).map(|v| show_json(&v)),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn show_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn show_search(value: &serde_json::Value, json: bool) {
    if json {
        return show_json(value);
    }
    let total = value["total"].as_u64().unwrap_or(0);
    println!("{} {}", "hits:".bold(), total);
    for item in value["items"].as_array().into_iter().flatten() {
        println!(
            "{} {} {}",
            item["law_name"].as_str().unwrap_or("").green(),
            item["article_no"].as_str().unwrap_or("").cyan().bold(),
            item["title"].as_str().unwrap_or(""),
        );
        if let Some(text) = item["text"].as_str() {
            for line in text.lines() {
                println!("  {}", line);
            }
        }
    }
}

fn show_answer(value: &serde_json::Value, json: bool) {
    if json {
        return show_json(value);
    }
    println!("{}", value["content"].as_str().unwrap_or(""));
    if let Some(disclaimer) = value["disclaimer"].as_str() {
        println!("\n{}", disclaimer.dimmed());
    }
}

fn show_scan(value: &serde_json::Value, json: bool) {
    if json {
        return show_json(value);
    }
    let total = value["total"].as_u64().unwrap_or(0);
    println!("{} {}", "matches:".bold(), total);
    for item in value["items"].as_array().into_iter().flatten() {
        let path = &item["path"];
        let citation = [
            path["article"].as_str(),
            path["paragraph"].as_str(),
            path["item"].as_str(),
            path["sub_item"].as_str(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
        println!(
            "{} {} [{}]",
            item["law_name"].as_str().unwrap_or("").green(),
            citation.cyan().bold(),
            item["unit_type"].as_str().unwrap_or(""),
        );
        if let Some(text) = item["text"].as_str() {
            for line in text.lines() {
                println!("  {}", line);
            }
        }
    }
}
