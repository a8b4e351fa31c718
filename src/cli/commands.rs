//! Command dispatch and handlers

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::application::{CompileStats, CompiledKeys, KeyCompiler};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{build_glossary, build_names, NameDeriver, Node};
use crate::infrastructure::{load_assets, InfraError, KeysDocument};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Build {
            assets,
            output,
            validate,
        } => build(assets, output, *validate),
        Commands::Tree { code, assets } => tree(code, assets),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(level = "debug")]
fn build(assets_dir: &Path, output_path: &Path, validate: bool) -> CliResult<()> {
    let (compiled, glossary, order_names, code_names) = compile_assets(assets_dir)?;
    report_stats(&compiled.stats);

    output::success(&format!("glossary: {} terms", glossary.len()));
    output::success(&format!(
        "taxon names: {} orders, {} total",
        order_names.len(),
        code_names.len()
    ));

    if validate {
        output::success("validation complete, no output written");
        return Ok(());
    }

    let document = KeysDocument::new(compiled, glossary, order_names, code_names);
    document.write(output_path)?;
    output::success(&format!("wrote {}", output_path.display()));
    Ok(())
}

#[instrument(level = "debug")]
fn tree(code: &str, assets_dir: &Path) -> CliResult<()> {
    let (compiled, ..) = compile_assets(assets_dir)?;

    let nodes: Vec<&Node> = compiled
        .navigation
        .iter()
        .filter(|n| n.code == code)
        .collect();
    if nodes.is_empty() && !compiled.outcomes.contains_key(code) {
        return Err(CliError::UnknownCode(code.to_string()));
    }

    match compiled.outcomes.get(code).and_then(|o| o.name.as_deref()) {
        Some(name) => output::header(&format!("{} ({})", code, name)),
        None => output::header(code),
    }
    for tree in clause_trees(&nodes) {
        println!("{}", tree);
    }
    if let Some(children) = compiled.indices.children_by_parent.get(code) {
        output::action("child codes", &children.join(", "));
    }
    Ok(())
}

type CompiledAssets = (
    CompiledKeys,
    std::collections::BTreeMap<String, crate::domain::GlossaryEntry>,
    std::collections::BTreeMap<String, String>,
    std::collections::BTreeMap<String, String>,
);

fn compile_assets(assets_dir: &Path) -> CliResult<CompiledAssets> {
    let assets = load_assets(assets_dir)?;
    let compiled = KeyCompiler::new()
        .compile(assets.criteria)
        .map_err(InfraError::from)?;

    let glossary = build_glossary(&assets.features);
    let (order_names, mut code_names) = build_names(&assets.codes);
    NameDeriver::new().populate(
        &mut code_names,
        &order_names,
        &compiled.outcomes,
        &compiled.navigation,
    );

    Ok((compiled, glossary, order_names, code_names))
}

fn report_stats(stats: &CompileStats) {
    output::success(&format!("navigation criteria: {}", stats.navigation_count));
    output::success(&format!("outcomes: {}", stats.outcome_count));
    let distribution = stats
        .depth_distribution
        .iter()
        .map(|(depth, count)| format!("{}: {}", depth, count))
        .join(", ");
    output::action("depth distribution", &distribution);
    if stats.merged_fragments > 0 {
        output::action("continuation fragments merged", &stats.merged_fragments);
    }
    if stats.split_subclauses > 0 {
        output::action("flattened sub-clauses split", &stats.split_subclauses);
    }
    if stats.end_resolved > 0 {
        output::action("END markers resolved", &stats.end_resolved);
    }
    if stats.infer_resolved > 0 {
        output::action("INFER markers resolved", &stats.infer_resolved);
    }
    if stats.synthetic_ids > 0 {
        output::warning(&format!("{} clauses without recognizable prefix", stats.synthetic_ids));
    }
    if stats.duplicate_ids > 0 {
        output::warning(&format!("resolved {} duplicate clause ids", stats.duplicate_ids));
    }
}

/// Render one code's clause nodes as trees over the intra-code parent
/// links. Nodes whose parent lies outside the navigation set (outcome
/// headers of 3+ letter codes) render as roots.
fn clause_trees(nodes: &[&Node]) -> Vec<Tree<String>> {
    let sequences: HashSet<u32> = nodes.iter().map(|n| n.sequence).collect();
    let mut children: HashMap<u32, Vec<&Node>> = HashMap::new();
    let mut roots = Vec::new();
    for &node in nodes {
        match node.parent {
            Some(p) if sequences.contains(&p) => children.entry(p).or_default().push(node),
            _ => roots.push(node),
        }
    }
    roots.iter().map(|root| subtree(root, &children)).collect()
}

fn subtree(node: &Node, children: &HashMap<u32, Vec<&Node>>) -> Tree<String> {
    let leaves: Vec<Tree<String>> = children
        .get(&node.sequence)
        .map(|c| c.iter().map(|child| subtree(child, children)).collect())
        .unwrap_or_default();
    Tree::new(clause_label(node)).with_leaves(leaves)
}

fn clause_label(node: &Node) -> String {
    const MAX_TEXT: usize = 60;
    let text: String = node.text.chars().take(MAX_TEXT).collect();
    let ellipsis = if node.text.chars().count() > MAX_TEXT {
        "..."
    } else {
        ""
    };
    format!("{} [{}] {}{}", node.id, node.logic, text, ellipsis)
}
