//! Command line front end: an interactive battle on stdin/stdout, plus the
//! pack listing and opener.

use pokedex_arena::display::{
    display_battle_status, display_move_list, display_opened_draw, display_pack_list,
    display_round, display_roster,
};
use pokedex_arena::{AiKind, BattleRunner, EntropySource, PackCatalog, Roster, Side};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage:
  pokedex-arena battle <player> <opponent> [--seed N] [--ai random|greedy] [--roster FILE]
  pokedex-arena roster [--roster FILE]
  pokedex-arena packs [--packs FILE]
  pokedex-arena open <pack-id> [--count N] [--seed N] [--packs FILE]";

#[derive(Debug)]
enum Command {
    Battle {
        player: String,
        opponent: String,
        seed: Option<u64>,
        ai: AiKind,
        roster: Option<PathBuf>,
    },
    Roster {
        roster: Option<PathBuf>,
    },
    Packs {
        packs: Option<PathBuf>,
    },
    Open {
        pack_id: String,
        count: usize,
        seed: Option<u64>,
        packs: Option<PathBuf>,
    },
}

#[derive(Debug, Default)]
struct Flags {
    seed: Option<u64>,
    ai: Option<AiKind>,
    count: Option<usize>,
    roster: Option<PathBuf>,
    packs: Option<PathBuf>,
}

/// Splits `args` into positionals and `--flag value` pairs.
fn split_flags(args: &[String]) -> Result<(Vec<String>, Flags), String> {
    let mut positionals = Vec::new();
    let mut flags = Flags::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            positionals.push(arg.clone());
            continue;
        }
        let value = iter
            .next()
            .ok_or_else(|| format!("{} needs a value", arg))?;
        match arg.as_str() {
            "--seed" => {
                flags.seed = Some(value.parse().map_err(|_| format!("bad seed: {}", value))?)
            }
            "--ai" => flags.ai = Some(value.parse()?),
            "--count" => {
                flags.count = Some(value.parse().map_err(|_| format!("bad count: {}", value))?)
            }
            "--roster" => flags.roster = Some(PathBuf::from(value)),
            "--packs" => flags.packs = Some(PathBuf::from(value)),
            other => return Err(format!("unknown flag: {}", other)),
        }
    }
    Ok((positionals, flags))
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let (subcommand, rest) = args.split_first().ok_or("missing command")?;
    let (positionals, flags) = split_flags(rest)?;

    match (subcommand.as_str(), positionals.as_slice()) {
        ("battle", [player, opponent]) => Ok(Command::Battle {
            player: player.clone(),
            opponent: opponent.clone(),
            seed: flags.seed,
            ai: flags.ai.unwrap_or_default(),
            roster: flags.roster,
        }),
        ("roster", []) => Ok(Command::Roster {
            roster: flags.roster,
        }),
        ("packs", []) => Ok(Command::Packs {
            packs: flags.packs,
        }),
        ("open", [pack_id]) => Ok(Command::Open {
            pack_id: pack_id.clone(),
            count: flags.count.unwrap_or(1),
            seed: flags.seed,
            packs: flags.packs,
        }),
        (other, _) => Err(format!("unrecognised command or arguments: {}", other)),
    }
}

fn run_battle(
    player: &str,
    opponent: &str,
    seed: Option<u64>,
    ai: AiKind,
    roster: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let roster = Roster::load_or_builtin(roster.as_deref())?;
    let player = roster.find(player)?.clone();
    let opponent = roster.find(opponent)?.clone();

    let mut runner = BattleRunner::new(player, opponent)
        .with_rng(EntropySource::from_optional_seed(seed))
        .with_behavior(ai.build());

    println!("{}\n", display_battle_status(runner.state()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !runner.is_battle_ended() {
        let own = runner.state().combatant(Side::Player);
        println!("Your moves:");
        print!("{}", display_move_list(own));
        print!(
            "Choose a move (1-{}), 'status' or 'quit': ",
            own.move_pool.len()
        );
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        match input {
            "quit" | "q" => {
                println!("You left the battle.");
                return Ok(());
            }
            "status" | "s" => {
                println!("\n{}\n", display_battle_status(runner.state()));
                continue;
            }
            _ => {}
        }

        let move_index = match input.parse::<usize>() {
            Ok(number) if number >= 1 => number - 1,
            _ => {
                println!("Please enter a move number.");
                continue;
            }
        };

        match runner.play_move(move_index) {
            Ok(round) => {
                println!("\n{}", display_round(&round));
                if round.opponent_stalled() {
                    break;
                }
                if !round.finished {
                    println!("{}\n", display_battle_status(runner.state()));
                }
            }
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

fn run_open(
    pack_id: &str,
    count: usize,
    seed: Option<u64>,
    packs: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let catalog = PackCatalog::load_or_builtin(packs.as_deref())?;
    let mut rng = EntropySource::from_optional_seed(seed);
    for draw in catalog.open_packs(pack_id, count, &mut rng)? {
        println!("{}", display_opened_draw(&draw));
    }
    Ok(())
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Battle {
            player,
            opponent,
            seed,
            ai,
            roster,
        } => run_battle(&player, &opponent, seed, ai, roster),
        Command::Roster { roster } => {
            print!("{}", display_roster(&Roster::load_or_builtin(roster.as_deref())?));
            Ok(())
        }
        Command::Packs { packs } => {
            print!("{}", display_pack_list(&PackCatalog::load_or_builtin(packs.as_deref())?));
            Ok(())
        }
        Command::Open {
            pack_id,
            count,
            seed,
            packs,
        } => run_open(&pack_id, count, seed, packs),
    }
}

fn main() -> ExitCode {
    pokedex_arena::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?command, "parsed command line");

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
