//! Average command implementation.

use crate::commands::{CliError, Context};
use tjsonb_core::{average_field, Datum};

pub fn run(ctx: &Context, input: Option<String>, field: Option<String>) -> Result<(), CliError> {
    let docs = ctx.read_documents(input)?;

    // The registered aggregate reads root values only; keyed averages go
    // straight to the library.
    let result = match field {
        Some(key) => average_field(&docs, &key).map_or(Datum::Null, Datum::Float),
        None => ctx.call("tjsonb_aggregate_speed", vec![Datum::Documents(docs)])?,
    };
    println!("{}", result.render(&ctx.codec));
    Ok(())
}
