use crate::prelude::{println, *};
use colored::Colorize;
use numfacts_core::classify::{
    build_output, classify, parse_number, ClassificationOutput, Property,
};
use prettytable::row;

use crate::facts::{self, FactsConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ClassifyOptions {
    /// Number to classify
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Skip the Numbers API call and classify offline
    #[arg(long)]
    pub no_fact: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Module entry point
pub async fn run(options: ClassifyOptions, global: crate::Global) -> Result<()> {
    let number = parse_number(&options.number).map_err(|e| eyre!("{}", e))?;

    let classification = classify(number);

    let fun_fact = if options.no_fact {
        None
    } else {
        let config = FactsConfig::from_env().with_overrides(global.numbers_api_base_url.clone());
        if global.verbose {
            println!("Fetching fun fact from {}...", config.base_url);
        }
        let client = facts::create_client(&config)?;
        let fact = facts::fetch_fun_fact(&client, &config, number)
            .await
            .map_err(|e| eyre!("{}", e))?;
        Some(fact)
    };

    let output = build_output(classification, fun_fact);

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output);
    }

    Ok(())
}

/// Convert the classification output to a pretty-printed JSON string
fn format_classification_json(output: &ClassificationOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render the property tags as a comma-separated list
fn format_properties(properties: &[Property]) -> String {
    properties
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().bold().to_string()
    } else {
        "no".bright_black().to_string()
    }
}

fn output_json(output: &ClassificationOutput) -> Result<()> {
    let json = format_classification_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ClassificationOutput) {
    let mut table = new_table();

    table.add_row(row![
        "Number".green(),
        output.number.to_string().bright_white().bold()
    ]);
    table.add_row(row!["Prime".green(), yes_no(output.is_prime)]);
    table.add_row(row!["Perfect".green(), yes_no(output.is_perfect)]);
    table.add_row(row![
        "Properties".green(),
        format_properties(&output.properties).cyan()
    ]);
    table.add_row(row!["Digit sum".green(), output.digit_sum]);

    table.printstd();

    if let Some(fact) = &output.fun_fact {
        println!();
        println!("{} {}", "Fun fact:".yellow().bold(), fact);
    }
}
