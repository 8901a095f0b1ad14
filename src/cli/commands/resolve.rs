//! resolve command - Resolve commits, trees, and paths

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::resolve::{LinkTarget, ResolveError, Resolver};
use crate::ui::output;

/// One argument's result in multi-argument JSON output.
#[derive(Serialize)]
struct Entry<'a> {
    arg: &'a str,
    #[serde(flatten)]
    target: LinkTarget,
}

/// Resolve each argument and print its descriptor.
///
/// Every argument is attempted; failures are reported as they occur and
/// the command fails if any argument did not resolve.
pub fn resolve(ctx: &Context, args: &[String], any: bool, json: bool) -> Result<()> {
    let (git, config) = super::open_repository(ctx)?;
    let json = json || config.json();
    let resolver = Resolver::with_options(&git, config.resolver_options());
    let verbosity = ctx.verbosity();

    let resolve_one = |arg: &str| -> Result<LinkTarget, ResolveError> {
        if any {
            resolver.resolve_any(arg)
        } else {
            resolver.classify(arg).map(LinkTarget::Object)
        }
    };

    // A single argument reports its own error through main
    if let [arg] = args {
        let target = resolve_one(arg.as_str()).map_err(|e| anyhow!("cannot resolve '{arg}': {e}"))?;
        if json {
            output::print(output::to_json(&target)?, verbosity);
        } else {
            output::print(output::format_target(&target), verbosity);
        }
        return Ok(());
    }

    let mut entries = Vec::new();
    let mut failed = 0;
    for arg in args {
        match resolve_one(arg.as_str()) {
            Ok(target) => {
                if !json {
                    output::print(format!("{arg}\n{}\n", output::format_target(&target)), verbosity);
                }
                entries.push(Entry { arg, target });
            }
            Err(err) => {
                output::error(format!("cannot resolve '{arg}': {err}"));
                failed += 1;
            }
        }
    }

    if json {
        output::print(output::to_json(&entries)?, verbosity);
    }

    if failed > 0 {
        return Err(anyhow!(
            "{failed} of {} arguments could not be resolved",
            args.len()
        ));
    }
    Ok(())
}
