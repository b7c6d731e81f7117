use anyhow::{bail, Context, Result};
use dsi_progress_logger::prelude::*;
use mailgraph_algo::algo::diameter::par_diameter;
use mailgraph_algo::prelude::*;

const USAGE: &str = "Usage: mailgraph-algo <stats|radius|eulerian|diameter|export> <dataset> [args...]
    stats <dataset> [TOP_N]
    radius <dataset> <START> <MAX_DISTANCE>
    eulerian <dataset>
    diameter <dataset> [NUM_THREADS]
    export <dataset> <OUTPUT>";

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let (Some(operation), Some(dataset)) = (args.first(), args.get(1)) else {
        bail!("{USAGE}");
    };
    let rest = &args[2..];

    let mut main_pl = progress_logger![display_memory = true];
    let corpus = MailDir::new(MailDirConfig::new(dataset))?;
    let (graph, _) = corpus.build_graph(&mut main_pl)?;
    main_pl.info(format_args!(
        "Graph has {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    ));

    match operation.as_str() {
        "stats" => {
            let top_n = match rest.first() {
                Some(n) => n.parse::<usize>().context("TOP_N should be an integer")?,
                None => 20,
            };
            print!("{}", graph.stats(top_n));
        }
        "radius" => {
            let [start, max_distance] = rest else {
                bail!("{USAGE}");
            };
            let max_distance = max_distance
                .parse::<u64>()
                .context("MAX_DISTANCE should be a nonnegative integer")?;
            let within = graph.shortest_paths_within(start, max_distance)?;
            println!("{} vertices within distance {max_distance} from {start}:", within.len());
            for (id, distance) in within {
                println!("{id:<40} {distance}");
            }
        }
        "eulerian" => {
            let result = graph.eulerian(&mut main_pl);
            if result.is_eulerian() {
                println!("The graph is Eulerian");
            } else {
                println!("The graph is not Eulerian:");
                for violation in &result.violations {
                    println!("- {}", violation.display(graph.names()));
                }
            }
        }
        "diameter" => {
            let threads = match rest.first() {
                Some(n) => Threads::NumThreads(
                    n.parse::<usize>()
                        .context("NUM_THREADS should be an integer")?,
                ),
                None => Threads::Default,
            };
            let result = par_diameter(&*graph, threads.build()?, &mut main_pl);
            println!("Diameter: {}", result.diameter);
            for hop in result.path.windows(2) {
                let weight = graph.weight(hop[0], hop[1]).unwrap_or_default();
                println!("{} -> {} ({weight})", graph.name(hop[0]), graph.name(hop[1]));
            }
        }
        "export" => {
            let [output] = rest else {
                bail!("{USAGE}");
            };
            adjacency_list::store(&graph, output)
                .with_context(|| format!("Cannot write {output}"))?;
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}
