//! Normalize command implementation.

use serde::Serialize;
use tjsonb_canonical::{format_timestamp, JsonValue};
use tjsonb_core::{Datum, TimestampedDocument};

use crate::commands::{CliError, Context};

/// One `--json` output line; the timestamp follows `--timestamp-style`.
#[derive(Serialize)]
struct JsonLine<'a> {
    timestamp: String,
    document: &'a JsonValue,
}

pub fn run(ctx: &Context, input: Option<String>, json: bool) -> Result<(), CliError> {
    for doc in ctx.read_documents(input)? {
        if json {
            println!("{}", json_line(ctx, &doc)?);
            continue;
        }
        match ctx.call("tjsonb_out", vec![Datum::Document(doc)])? {
            Datum::Text(text) => println!("{}", text),
            other => {
                return Err(CliError::UnexpectedResult {
                    function: "tjsonb_out",
                    kind: other.kind(),
                })
            }
        }
    }
    Ok(())
}

fn json_line(ctx: &Context, doc: &TimestampedDocument) -> Result<String, CliError> {
    let line = JsonLine {
        timestamp: format_timestamp(doc.timestamp(), ctx.codec.options().timestamp_style),
        document: doc.document(),
    };
    Ok(serde_json::to_string(&line)?)
}
