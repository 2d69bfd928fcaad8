//! Functions command implementation.

use crate::commands::{CliError, Context};

pub fn run(ctx: &Context) -> Result<(), CliError> {
    for def in ctx.registry.functions() {
        println!("{}", def.signature());
    }
    Ok(())
}
