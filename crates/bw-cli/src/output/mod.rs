use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{RenderOptions, Table};

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let value = serde_json::to_value(value)?;
            Ok(render_value_table(&value))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn emit<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn options() -> RenderOptions {
    let prefs = ui::prefs();
    RenderOptions {
        max_width: prefs.term_width,
        color: prefs.color,
    }
}

fn render_value_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_rows(items),
        Value::Object(map) => {
            let mut table = Table::new(["key", "value"]);
            for (key, value) in map {
                table.row([key.clone(), cell(value)]);
            }
            table.render(options())
        }
        scalar => cell(scalar),
    }
}

/// An array of objects becomes one row per object, with the column set being
/// the union of keys in first-seen order.
fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let mut table = Table::new(["value"]);
        for item in items {
            table.row([cell(item)]);
        }
        return table.render(options());
    }

    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut table = Table::new(columns.iter().cloned());
    for item in items {
        if let Some(map) = item.as_object() {
            table.row(
                columns
                    .iter()
                    .map(|column| map.get(column).map_or_else(|| "-".to_string(), cell)),
            );
        }
    }
    table.render(options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        nested => serde_json::to_string(nested).unwrap_or_else(|_| String::from("<json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        client: &'static str,
        total: f64,
    }

    #[test]
    fn json_output_round_trips() {
        let rows = vec![Row {
            client: "acme-co",
            total: 70.3,
        }];
        let out = render(&rows, OutputFormat::Json).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse");
        assert_eq!(parsed[0]["client"], "acme-co");
    }

    #[test]
    fn raw_output_is_single_line() {
        let rows = vec![Row {
            client: "acme-co",
            total: 70.3,
        }];
        let out = render(&rows, OutputFormat::Raw).expect("render");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_output_keeps_declaration_order() {
        let rows = vec![Row {
            client: "acme-co",
            total: 70.3,
        }];
        let out = render(&rows, OutputFormat::Table).expect("render");
        let header = out.lines().next().expect("header");
        let client_pos = header.find("client").expect("client column");
        let total_pos = header.find("total").expect("total column");
        assert!(client_pos < total_pos);
    }

    #[test]
    fn object_renders_as_key_value_pairs() {
        let row = Row {
            client: "acme-co",
            total: 70.3,
        };
        let out = render(&row, OutputFormat::Table).expect("render");
        assert!(out.lines().next().is_some_and(|l| l.starts_with("key")));
        assert!(out.contains("acme-co"));
    }
}
