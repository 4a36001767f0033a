//! Command-line interface for inspecting layout files.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::context::PageContext;
use crate::error::Result;
use crate::interpreter::LayoutInterpreter;
use crate::outline::NodeOutline;

/// Chameleon Layout - validate and inspect XML page layouts.
#[derive(Parser)]
#[command(name = "chameleon-layout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a layout file builds without errors.
    Check {
        /// Path to the layout XML file
        file: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Print the node tree of a layout file.
    Tree {
        /// Path to the layout XML file
        file: String,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Render a layout file to HTML.
    Render {
        /// Path to the layout XML file
        file: String,

        #[command(flatten)]
        context: ContextArgs,
    },
}

/// Page context supplied on the command line.
#[derive(Args, Debug, Default)]
pub struct ContextArgs {
    /// Page context value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub values: Vec<(String, String)>,

    /// User group (repeatable)
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// User permission (repeatable)
    #[arg(long = "permission", value_name = "PERMISSION")]
    pub permissions: Vec<String>,
}

impl ContextArgs {
    /// Build the page context these arguments describe.
    #[must_use]
    pub fn to_page_context(&self) -> PageContext {
        let mut context = PageContext::new();
        for (key, value) in &self.values {
            context = context.with_value(key, value);
        }
        for group in &self.groups {
            context = context.with_group(group);
        }
        for permission in &self.permissions {
            context = context.with_permission(permission);
        }
        context
    }
}

/// Parse a `KEY=VALUE` argument.
fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, context } => check_command(&file, &context),
        Commands::Tree {
            file,
            json,
            context,
        } => tree_command(&file, json, &context),
        Commands::Render { file, context } => render_command(&file, &context),
    }
}

fn load_outline(file: &str, context: &ContextArgs) -> Result<NodeOutline> {
    let mut interpreter = LayoutInterpreter::new(file)?;
    interpreter.set_page_context(Arc::new(context.to_page_context()));

    let root = interpreter.get_root_component()?;
    Ok(NodeOutline::of(root.as_ref()))
}

/// Execute the check command.
fn check_command(file: &str, context: &ContextArgs) -> Result<()> {
    let outline = load_outline(file, context)?;

    println!(
        "{} {} ({} nodes)",
        style("✓").green().bold(),
        file,
        outline.node_count()
    );

    Ok(())
}

/// Execute the tree command.
fn tree_command(file: &str, json: bool, context: &ContextArgs) -> Result<()> {
    let outline = load_outline(file, context)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        print!("{outline}");
    }

    Ok(())
}

/// Execute the render command.
fn render_command(file: &str, context: &ContextArgs) -> Result<()> {
    let mut interpreter = LayoutInterpreter::new(file)?;
    interpreter.set_page_context(Arc::new(context.to_page_context()));

    let root = interpreter.get_root_component()?;
    print!("{}", root.render()?);

    Ok(())
}
