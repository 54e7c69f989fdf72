//! Flowdoc document tools.
//!
//! Provides the `flowdoc` binary for inspecting and mutating graph
//! documents persisted in a SQLite database, through the same
//! `ModelAdapter` entry points the diagram canvas uses.
//!
//! Undo and redo are deliberately absent here: history is process-local
//! and never persisted, so it cannot span CLI invocations.

use std::process;

use clap::{Parser, Subcommand};

use flowdoc_adapter::{ModelAdapter, DEFAULT_NAMESPACE};
use flowdoc_core::{Edge, GraphDocument, Metadata, Node, Position, Viewport};
use flowdoc_storage::{DocumentStore, SqliteStore};

/// Flowdoc document tools.
#[derive(Parser)]
#[command(name = "flowdoc", about = "Graph document storage tools")]
struct Cli {
    /// Path to the document database file.
    #[arg(short, long, default_value = "flowdoc.db")]
    db: String,

    /// Namespace key addressing one document within the database.
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List all namespaces in the database.
    List,

    /// Print the document as JSON.
    Show,

    /// Add a node to the document.
    AddNode {
        /// Node identifier, unique within the document.
        id: String,

        /// Canvas x coordinate.
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,

        /// Canvas y coordinate.
        #[arg(short, long, default_value_t = 0.0)]
        y: f64,

        /// Visual template type.
        #[arg(short = 't', long = "type")]
        node_type: Option<String>,

        /// Opaque JSON payload.
        #[arg(long)]
        data: Option<String>,
    },

    /// Remove a node by id. Connected edges are left in place.
    RemoveNode {
        /// Node identifier.
        id: String,
    },

    /// Add an edge between two nodes.
    AddEdge {
        /// Edge identifier, unique within the document.
        id: String,

        /// Source node identifier.
        source: String,

        /// Target node identifier.
        target: String,
    },

    /// Remove an edge by id.
    RemoveEdge {
        /// Edge identifier.
        id: String,
    },

    /// Set the canvas viewport.
    Viewport {
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,

        #[arg(short, long, default_value_t = 0.0)]
        y: f64,

        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,
    },

    /// Replace the document with empty content.
    Reset,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    process::exit(run(cli));
}

/// Executes the parsed command.
///
/// Returns exit code: 0 = success, 1 = bad input, 2 = storage open failure.
fn run(cli: Cli) -> i32 {
    let store = match SqliteStore::new(&cli.db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to open database '{}': {}", cli.db, e);
            return 2;
        }
    };

    if let Commands::List = cli.command {
        return match store.list_namespaces() {
            Ok(namespaces) => {
                for ns in namespaces {
                    println!("{}", ns);
                }
                0
            }
            Err(e) => {
                eprintln!("Error: failed to list namespaces: {}", e);
                2
            }
        };
    }

    let mut adapter = ModelAdapter::with_namespace(store, cli.namespace);

    match cli.command {
        Commands::List => unreachable!("handled above"),

        Commands::Show => {
            println!("{}", adapter.to_json());
            0
        }

        Commands::AddNode {
            id,
            x,
            y,
            node_type,
            data,
        } => {
            let payload = match data {
                Some(raw) => match serde_json::from_str(&raw) {
                    Ok(value) => value,
                    Err(e) => {
                        eprintln!("Error: --data is not valid JSON: {}", e);
                        return 1;
                    }
                },
                None => serde_json::Value::Null,
            };
            if adapter.get_nodes().iter().any(|n| n.id.0 == id) {
                eprintln!("Error: node '{}' already exists", id);
                return 1;
            }

            let mut node = Node::new(id.as_str(), Position::new(x, y));
            node.node_type = node_type;
            node.data = payload;
            adapter.update_nodes_with(move |mut nodes| {
                nodes.push(node);
                nodes
            });
            0
        }

        Commands::RemoveNode { id } => {
            if !adapter.get_nodes().iter().any(|n| n.id.0 == id) {
                eprintln!("Error: node '{}' not found", id);
                return 1;
            }
            adapter.update_nodes_with(move |nodes| {
                nodes.into_iter().filter(|n| n.id.0 != id).collect()
            });
            0
        }

        Commands::AddEdge { id, source, target } => {
            if adapter.get_edges().iter().any(|e| e.id.0 == id) {
                eprintln!("Error: edge '{}' already exists", id);
                return 1;
            }
            let edge = Edge::new(id.as_str(), source.as_str(), target.as_str());
            adapter.update_edges_with(move |mut edges| {
                edges.push(edge);
                edges
            });
            0
        }

        Commands::RemoveEdge { id } => {
            if !adapter.get_edges().iter().any(|e| e.id.0 == id) {
                eprintln!("Error: edge '{}' not found", id);
                return 1;
            }
            adapter.update_edges_with(move |edges| {
                edges.into_iter().filter(|e| e.id.0 != id).collect()
            });
            0
        }

        Commands::Viewport { x, y, scale } => {
            adapter.update_metadata(Metadata {
                viewport: Viewport { x, y, scale },
            });
            0
        }

        Commands::Reset => {
            adapter.reset(GraphDocument::empty());
            0
        }
    }
}
