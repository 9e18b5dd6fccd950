use clap::Parser;
use std::fs;

use iota_lib::{
    config::Config,
    context::{reports::Report, Context},
    io::files::KnowledgeBase,
    structures::formula::parse,
};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static ALLOCATOR: Jemalloc = Jemalloc;

/// Decides whether a description logic knowledge base is satisfiable
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The knowledge base file to parse
    kb_file: Option<std::path::PathBuf>,

    /// A concept to check, in addition to any file contents
    #[arg(short, long)]
    concept: Vec<String>,

    /// Wall-clock limit for the search
    #[arg(short, long, value_name = "SECONDS", value_parser = |seconds: &str| seconds.parse().map(std::time::Duration::from_secs))]
    time_limit: Option<std::time::Duration>,

    /// Display live counters during the search and formula metrics before it
    #[arg(short, long, default_value_t = false)]
    stats: bool,

    /// Suppress the model print-out after the search
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() {
    #[cfg(feature = "log")]
    match log4rs::init_file("config/log4rs.yaml", Default::default()) {
        Ok(()) => log::trace!("log config loaded"),
        Err(e) => log::error!("{e:?}"),
    }

    let args = Args::parse();

    let mut the_kb = match &args.kb_file {
        Some(path) => match fs::read_to_string(path) {
            Ok(contents) => match KnowledgeBase::parse(&contents) {
                Ok(kb) => kb,
                Err(e) => {
                    println!("c {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                println!("c error reading file {e:?}");
                std::process::exit(1);
            }
        },
        None => KnowledgeBase::new(),
    };
    the_kb.concept.extend(args.concept.iter().cloned());

    let mut the_config = Config {
        show_model: !args.quiet,
        show_stats: args.stats,
        ..Config::default()
    };
    if let Some(limit) = args.time_limit {
        the_config.time_limit = limit;
    }

    if the_config.show_stats {
        println!("c 𝜄");
        for text in &the_kb.concept {
            if let Ok(fml) = parse::parse(text) {
                println!(
                    "c concept {fml}: {} binary connectives, {} descriptions, modal degree {}",
                    fml.binary_count(),
                    fml.descr_global_local_count(),
                    fml.modal_degree(),
                );
            }
        }
        println!("c TIME LIMIT: {:.2?}", the_config.time_limit);
    }

    let show_model = the_config.show_model;
    let mut the_context = match Context::from_kb(&the_kb, the_config) {
        Ok(context) => context,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };
    log::trace!("search initialised");

    let result = the_context.solve();

    if show_model {
        print!("{}", the_context.interpretation());
    }

    let (timed_out, _, closed_branches, rules_applied) = the_context.verdict();
    println!("c {rules_applied} rules applied, {closed_branches} branches closed");
    if timed_out {
        println!("c TIME LIMIT EXCEEDED");
    }

    match result {
        Report::Satisfiable => {
            println!("s SATISFIABLE");
            std::process::exit(10);
        }
        Report::Unsatisfiable => {
            println!("s UNSATISFIABLE");
            std::process::exit(0);
        }
        Report::Unknown => {
            println!("s UNKNOWN");
            std::process::exit(20);
        }
    }
}
