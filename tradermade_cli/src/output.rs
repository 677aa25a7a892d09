use serde_json::Value;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

pub fn render(doc: &Value, format: &OutputFormat) -> String {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(doc),
        OutputFormat::Compact => serde_json::to_string(doc),
    };
    match rendered {
        Ok(json) => json,
        Err(e) => format!("Failed to serialize to JSON: {}", e),
    }
}

pub fn print_document(doc: &Value, format: &OutputFormat) {
    println!("{}", render(doc, format));
}
