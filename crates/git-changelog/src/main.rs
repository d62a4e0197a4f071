//! git-changelog: render changelogs from git history for documentation pages
//!
//! This binary acts as a minimal documentation host: it finds the
//! `git_changelog` directives in one document, runs them, and prints the
//! rendered fragments to stdout.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use git_changelog::config::Config;
use git_changelog::directive;
use git_changelog::host::{DirectiveInvocation, TracingReporter};
use git_changelog::render::render;
use git_changelog::{DIRECTIVE_NAME, DirectiveRegistry};
use tracing::{debug, info};

fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the rendered changelog
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate().context("Invalid configuration")?;
    let env = config.environment()?;
    let document = env.current_document();
    let source = fs::read_to_string(&document)
        .with_context(|| format!("Failed to read {}", document.display()))?;

    let mut registry = DirectiveRegistry::new();
    git_changelog::setup(&mut registry);

    let blocks = directive::scan(&source, DIRECTIVE_NAME);
    if blocks.is_empty() {
        info!(
            document = %document.display(),
            "No {DIRECTIVE_NAME} directive found"
        );
        return Ok(());
    }

    let mut reporter = TracingReporter::new(document.display().to_string());
    let mut output = String::new();
    for block in blocks {
        debug!(lineno = block.lineno, options = ?block.options, "Running directive");
        let mut invocation = DirectiveInvocation::new(block.lineno, &env);
        invocation.options = block.options;

        let nodes = registry
            .invoke(&block.name, &invocation, &mut reporter)
            .with_context(|| format!("{}:{}", document.display(), block.lineno))?;
        output.push_str(&render(&nodes, config.format)?);
    }

    print!("{output}");
    Ok(())
}
