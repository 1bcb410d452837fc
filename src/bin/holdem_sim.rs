use holdem_engine::agents::{AgentTable, RandomAgent};
use holdem_engine::config::TableConfig;
use holdem_engine::snapshot::ViewOptions;
use holdem_engine::table::Table;
use log::{info, warn};
use std::error::Error;
use std::fs;

const HELP: &str = "\
Play seeded no-limit hold'em hands between random agents

USAGE:
  holdem-sim [CONFIG.json]

ENVIRONMENT:
  HOLDEM_HANDS             Number of hands to play  [default: 5]
  RUST_LOG                 Log filter, e.g. holdem_engine=debug
";

/// Per-seat agent seed; wraps so any configured seed is accepted.
fn agent_seed(table_seed: u64, seat: usize) -> u64 {
    table_seed.wrapping_add(seat as u64)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_target(false).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("-h" | "--help") => {
            print!("{HELP}");
            return Ok(());
        }
        Some(path) => TableConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => TableConfig::default(),
    };
    let hands: usize = std::env::var("HOLDEM_HANDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);

    let mut table = Table::new(config.clone())?;
    let mut agents = AgentTable::for_seats(config.seats);
    for seat in 0..config.seats {
        agents.set_agent(seat, Some(Box::new(RandomAgent::seeded(agent_seed(config.seed, seat)))));
    }
    info!("playing {hands} hands at {} seats, seed {}", config.seats, config.seed);

    for _ in 0..hands {
        let funded = table.seats().iter().flatten().filter(|s| s.stack() > 0).count();
        if funded < 2 {
            warn!("fewer than two funded seats left, stopping");
            break;
        }
        let winners = agents.play_hand(&mut table)?;
        println!("== Hand {} (winners {:?}) ==", table.hand_number(), winners);
        for line in table.view(&ViewOptions::omniscient()).lines() {
            println!("{line}");
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_seeds_wrap_near_the_top_of_the_range() {
        assert_eq!(agent_seed(7, 2), 9);
        assert_eq!(agent_seed(u64::MAX, 0), u64::MAX);
        assert_eq!(agent_seed(u64::MAX, 3), 2);
    }
}
