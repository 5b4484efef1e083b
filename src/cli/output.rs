//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{ChatterboxArgs, OutputFormat};
use crate::error::Result;
use crate::responder::ModelStats;

/// Result structure for a single answer.
#[derive(Debug, Serialize)]
pub struct AnswerResult {
    pub question: String,
    pub answer: String,
}

/// Result structure for resource installation.
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub resource_path: String,
    pub clitics: usize,
}

/// Corpus and model statistics.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub corpus: String,
    #[serde(flatten)]
    pub model: ModelStats,
    pub training_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ChatterboxArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &ChatterboxArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            let width = obj.keys().map(String::len).max().unwrap_or(0);
            for (key, val) in &obj {
                println!("{key:<width$}  {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(&value)),
    }
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &ChatterboxArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.3}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("hello there")), "hello there");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(0.5)), "0.500");
        assert_eq!(format_value(&json!(false)), "false");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!([1, 2])), "[1, 2]");
        assert_eq!(format_value(&json!(["a", "b"])), "[a, b]");
    }

    #[test]
    fn test_stats_result_is_flat() {
        let result = StatsResult {
            corpus: "faq.csv".to_string(),
            model: ModelStats {
                examples: 4,
                answers: 2,
                single_example_answers: 0,
                vocabulary_size: 6,
                ngram_range: (1, 2),
                min_df: 1,
            },
            training_ms: 3,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["answers"], 2);
        assert_eq!(value["ngram_range"], json!([1, 2]));
    }
}
