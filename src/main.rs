use std::io::{self, BufRead};
use std::path::Path;

use anyhow::Context;
use log::{error, info};

use airline_satisfaction::error::util::safe_read_to_string;
use airline_satisfaction::{PredictorConfig, SurveyContext, SurveyResponse};

/// Process one submission, logging instead of failing on bad input
fn handle(context: &SurveyContext, source: &str, text: &str) -> bool {
    let outcome = SurveyResponse::from_json(text).and_then(|response| context.process(&response));
    match outcome {
        Ok(report) => {
            println!("{report}\n");
            true
        }
        Err(err) => {
            error!("Submission {source} rejected: {err}");
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PredictorConfig::from_env().context("Invalid configuration")?;
    info!("{config}");

    let context = SurveyContext::load(config).context("Failed to load model and reference data")?;

    let files: Vec<String> = std::env::args().skip(1).collect();
    let (mut accepted, mut rejected) = (0usize, 0usize);

    if files.is_empty() {
        info!("Reading one JSON survey response per line from stdin");
        for (idx, line) in io::stdin().lock().lines().enumerate() {
            let line = line.context("Failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            if handle(&context, &format!("on line {}", idx + 1), &line) {
                accepted += 1;
            } else {
                rejected += 1;
            }
        }
    } else {
        for file in &files {
            let text = match safe_read_to_string(Path::new(file), "reading survey response") {
                Ok(text) => text,
                Err(err) => {
                    error!("{err}");
                    rejected += 1;
                    continue;
                }
            };
            if handle(&context, file, &text) {
                accepted += 1;
            } else {
                rejected += 1;
            }
        }
    }

    info!("Processed {accepted} submission(s), rejected {rejected}");
    Ok(())
}
