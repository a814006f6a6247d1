use mdq_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(envelope),
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) {
    println!("{:<14}{}", "provider", envelope.meta.provider);
    println!("{:<14}{}", "request_id", envelope.meta.request_id);
    println!("{:<14}{}", "latency_ms", envelope.meta.latency_ms);
    for warning in &envelope.meta.warnings {
        println!("{:<14}{}", "warning", warning);
    }
    for error in &envelope.errors {
        println!("{:<14}{} ({})", "error", error.message, error.code);
    }
    println!();
    render_value("", &envelope.data);
}

fn render_value(path: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let nested_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                render_value(&nested_path, nested);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                render_value(&format!("{path}[{index}]"), nested);
            }
        }
        scalar => println!("{path:<28}{scalar}"),
    }
}
