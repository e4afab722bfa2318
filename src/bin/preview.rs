//! Preview binary - shows how a message would be analyzed and prompted,
//! without calling any external service.
//!
//! Usage:
//!   cargo run --bin preview -- "Translate break a leg to French"
//!   echo "hello there" | cargo run --bin preview
//!   cargo run --bin preview -- --language Spanish "What is SDG 10?"

use anyhow::{Context, Result};
use language_support_assistant::{
    classifier::{classify, parse_translation_request},
    i18n::Language,
    linguistics::analyze,
    prompts::compose,
};
use std::io::Read;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut target = Language::ENGLISH;
    if let Some(pos) = args.iter().position(|a| a == "--language") {
        let value = args
            .get(pos + 1)
            .cloned()
            .context("--language needs a language name or code")?;
        target = Language::from_name_or_code(&value)
            .with_context(|| format!("Unsupported language: {}", value))?;
        args.drain(pos..=pos + 1);
    }

    let message = if args.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read message from stdin")?;
        input.trim().to_string()
    } else {
        args.join(" ")
    };

    if message.is_empty() {
        anyhow::bail!("No message given (pass it as arguments or on stdin)");
    }

    let profile = analyze(&message);
    let intent = classify(&message.to_lowercase());

    println!("\n{}", "=".repeat(60));
    println!("MESSAGE: {}", message);
    println!("{}", "=".repeat(60));
    println!("Intent:             {}", intent);
    println!("Formality:          {}", profile.formality);
    println!("Idioms:             {}", profile.has_idioms);
    println!("Cultural refs:      {}", profile.has_cultural_references);
    println!("Sentiment:          {}", profile.sentiment);
    println!("Grammar complexity: {}", profile.grammar_complexity);
    println!(
        "Contextual translation: {}",
        profile.needs_contextual_translation()
    );

    match parse_translation_request(&message) {
        Some(request) => println!(
            "Translation request: \"{}\" -> {}",
            request.text,
            request
                .target
                .map(|l| l.name())
                .unwrap_or("(output language)")
        ),
        None => println!("Translation request: none"),
    }

    println!("\n{}", "-".repeat(60));
    println!("PROMPT ({}):", target.name());
    println!("{}", "-".repeat(60));
    println!("{}", compose(&message, intent, &profile, target.name()));
    println!("{}\n", "=".repeat(60));

    Ok(())
}
