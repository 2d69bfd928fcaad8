//! Range command implementation.

use crate::commands::{CliError, Context};
use tjsonb_core::Datum;

pub fn run(ctx: &Context, start: &str, end: &str) -> Result<(), CliError> {
    let args = vec![
        Datum::Document(ctx.parse(start)?),
        Datum::Document(ctx.parse(end)?),
    ];
    let result = ctx.call("tjsonb_range", args)?;
    println!("{}", result.render(&ctx.codec));
    Ok(())
}
