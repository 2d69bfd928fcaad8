//! Overlaps command implementation.

use crate::commands::{CliError, Context};
use tjsonb_core::Datum;

pub fn run(ctx: &Context, first: &str, second: &str) -> Result<(), CliError> {
    let args = vec![
        Datum::Document(ctx.parse(first)?),
        Datum::Document(ctx.parse(second)?),
    ];
    let result = ctx.call("tjsonb_overlaps", args)?;
    println!("{}", result.render(&ctx.codec));
    Ok(())
}
