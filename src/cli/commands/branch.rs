//! branch command - Resolve a branch and strip its remote prefix

use anyhow::{anyhow, Result};

use crate::cli::Context;
use crate::resolve::Resolver;
use crate::ui::output;

/// Resolve `arg` as a ref and print the branch descriptor.
pub fn branch(ctx: &Context, arg: &str, json: bool) -> Result<()> {
    let (git, config) = super::open_repository(ctx)?;
    let json = json || config.json();
    let resolver = Resolver::with_options(&git, config.resolver_options());

    let descriptor = resolver
        .resolve_branch(arg)
        .map_err(|e| anyhow!("cannot resolve branch '{arg}': {e}"))?;

    if descriptor.short_ref.is_none() && descriptor.full_ref.is_remote_tracking() {
        output::warn(
            format!("{} is not under a configured remote", descriptor.full_ref),
            ctx.verbosity(),
        );
    }

    let text = if json {
        output::to_json(&descriptor)?
    } else {
        output::format_branch(&descriptor)
    };
    output::print(text, ctx.verbosity());
    Ok(())
}
