use clap::Parser;
use std::io::Read;
use std::process;
use std::time::Duration;
use turex::{catalog, Machine, Playback};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The catalog pattern whose machine to run
    #[clap(short, long, default_value = turex::DEFAULT_PATTERN)]
    pattern: String,

    /// The input string to load onto the tape (read from stdin when piped)
    #[clap(short, long)]
    input: Option<String>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Animate the run with a delay between steps
    #[clap(short, long)]
    watch: bool,

    /// Inter-step delay in milliseconds for --watch (clamped to 50-1000)
    #[clap(long, default_value_t = 500)]
    delay: u64,

    /// Stop after this many steps instead of running unbounded
    #[clap(long)]
    limit: Option<usize>,

    /// Fall back to the default machine when the pattern is unknown
    #[clap(long)]
    lenient: bool,

    /// Print the full run history as JSON
    #[clap(long)]
    json: bool,

    /// List the available patterns and exit
    #[clap(short, long)]
    list: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for name in catalog::pattern_names() {
            println!("{}", name);
        }
        return;
    }

    let definition = if cli.lenient {
        catalog::lookup_or_default(&cli.pattern)
    } else {
        match catalog::lookup(&cli.pattern) {
            Ok(definition) => definition,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("Use --list to see the available patterns.");
                process::exit(1);
            }
        }
    };

    let input = match cli.input {
        Some(input) => input,
        None if !atty::is(atty::Stream::Stdin) => read_stdin(),
        None => String::new(),
    };

    let machine = Machine::new(definition, &input);

    let machine = if cli.watch {
        let playback = Playback::spawn(
            machine,
            Duration::from_millis(cli.delay),
            |machine: &Machine| print_step(machine),
        );
        playback.join()
    } else if cli.debug {
        let mut machine = machine;
        print_step(&machine);
        while within_limit(&machine, cli.limit) && machine.step() {
            print_step(&machine);
        }
        machine
    } else {
        let mut machine = machine;
        match cli.limit {
            Some(limit) => {
                if !machine.run_bounded(limit) {
                    eprintln!("Step limit reached after {} steps.", machine.step_count());
                }
            }
            None => machine.run_to_halt(),
        }
        machine
    };

    if cli.json {
        match serde_json::to_string_pretty(machine.history()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize history: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Pattern: {}", machine.definition().name);
    println!("Tape:    {}", machine.render_tape());
    println!("State:   {}", machine.state());
    println!("Steps:   {}", machine.step_count());
    println!("Status:  {:?}", machine.status());
}

fn within_limit(machine: &Machine, limit: Option<usize>) -> bool {
    limit.is_none_or(|limit| machine.step_count() < limit)
}

fn print_step(machine: &Machine) {
    println!(
        "Step: {:>4}  State: {:<12}  Tape: {}",
        machine.step_count(),
        machine.state(),
        machine.render_tape()
    );
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        eprintln!("Failed to read input from stdin: {}", e);
        process::exit(1);
    }
    buffer.trim_end_matches(['\r', '\n']).to_string()
}
