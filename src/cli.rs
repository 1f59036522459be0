use std::fmt::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use rust_decimal::Decimal;

use sportsbook::api::*;
use sportsbook::catalog::{Catalog, Pick};
use sportsbook::history::BetLog;
use sportsbook::leaderboard::Leaderboard;
use sportsbook::Sportsbook;

/// One line typed into the session.
#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Commands,
}
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List games and the ids of their selections
    Games { sport: Option<String> },
    /// Put a selection on the slip, or take it off if it is already there
    Pick { id: String },
    /// Set the stake on one selection
    Stake {
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Split one total stake evenly over every selection
    ParlayStake {
        #[arg(allow_negative_numbers = true)]
        total: Decimal,
    },
    Remove { id: String },
    Clear,
    /// Show the slip with its payouts
    Slip {
        #[arg(long)]
        json: bool,
    },
    /// Hide the slip; nothing on it is lost
    Close,
    Place {
        #[arg(short, long)]
        mode: Option<BetMode>,
    },
    History {
        #[arg(short, long, default_value_t = HistoryFilter::All)]
        filter: HistoryFilter,
        #[arg(long)]
        json: bool,
    },
    /// Record the result of an active bet
    Settle { id: String, outcome: Outcome },
    Leaderboard,
    #[command(alias = "exit")]
    Quit,
}

pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Session {
    book: Sportsbook,
    catalog: Catalog,
    leaderboard: Leaderboard,
    default_mode: BetMode,
}

impl Session {
    pub fn new(
        book: Sportsbook,
        catalog: Catalog,
        leaderboard: Leaderboard,
        default_mode: BetMode,
    ) -> Self {
        Self {
            book,
            catalog,
            leaderboard,
            default_mode,
        }
    }
    /// Parse errors and `help` come back as output rather than failures.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Flow::Continue(String::new()));
        }
        match Line::try_parse_from(words) {
            Ok(line) => self.execute(line.command),
            Err(e) => Ok(Flow::Continue(e.to_string())),
        }
    }
    pub fn execute(&mut self, command: Commands) -> Result<Flow> {
        debug!("Executing {:?}", command);
        let mut out = String::new();
        match command {
            Commands::Games { sport } => self.render_games(&mut out, sport.as_deref())?,
            Commands::Pick { id } => {
                let candidate = self
                    .catalog
                    .candidate(&id)
                    .with_context(|| format!("cannot pick {}", id))?;
                let selection = candidate.selection.clone();
                if self.book.select(candidate) {
                    writeln!(out, "Added {} ({})", id, selection)?;
                } else {
                    writeln!(out, "Removed {} ({})", id, selection)?;
                }
            }
            Commands::Stake { id, amount } => {
                let id = SelectionId::new(id);
                if !self.book.slip().contains(&id) {
                    writeln!(out, "{} is not on the slip", id)?;
                } else {
                    self.book.update_amount(&id, amount);
                    writeln!(out, "Stake on {} is now {}", id, format_money(amount))?;
                }
            }
            Commands::ParlayStake { total } => {
                self.book.set_parlay_stake(total);
                writeln!(
                    out,
                    "Split {} over {} selections",
                    format_money(total),
                    self.book.slip().len()
                )?;
            }
            Commands::Remove { id } => self.book.remove(&SelectionId::new(id)),
            Commands::Clear => self.book.clear_slip(),
            Commands::Slip { json } => {
                self.book.open_slip();
                let quote = self.book.quote().context("cannot quote the slip")?;
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&quote)?)?;
                } else {
                    render_quote(&mut out, &quote)?;
                }
            }
            Commands::Close => self.book.close_slip(),
            Commands::Place { mode } => {
                let mode = mode.unwrap_or(self.default_mode);
                let ids = self
                    .book
                    .place(mode)
                    .with_context(|| format!("cannot place {} bet", mode))?;
                for id in ids {
                    if let Some(bet) = self.book.history().get(&id) {
                        render_bet(&mut out, bet)?;
                    }
                }
            }
            Commands::History { filter, json } => {
                let bets = self.book.filter_history(filter);
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&bets)?)?;
                } else if bets.is_empty() {
                    writeln!(out, "No {} bets", filter)?;
                } else {
                    for bet in bets {
                        render_bet(&mut out, bet)?;
                    }
                }
            }
            Commands::Settle { id, outcome } => {
                let bet = self
                    .book
                    .record_settlement(&BetId::new(id), outcome)
                    .context("cannot settle bet")?;
                render_bet(&mut out, bet)?;
            }
            Commands::Leaderboard => {
                let summary = self.book.summary()?;
                let mut board = self.leaderboard.clone();
                board.insert("You", summary.net_profit);
                for standing in board.standings() {
                    writeln!(
                        out,
                        "#{:<3} {:<16} {}",
                        standing.rank, standing.name, standing.score
                    )?;
                }
                writeln!(
                    out,
                    "You: {} bets, {} won, {} lost, net {}",
                    summary.bets,
                    summary.won,
                    summary.lost,
                    format_money(summary.net_profit)
                )?;
            }
            Commands::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue(out))
    }

    fn render_games(&self, out: &mut String, sport: Option<&str>) -> Result<()> {
        for (key, entry) in self.catalog.sports() {
            if sport.map_or(false, |wanted| wanted != key) {
                continue;
            }
            writeln!(out, "{} {} ({})", entry.icon, entry.name, key)?;
            for game in &entry.games {
                writeln!(out, "  {}  {}", game.label(), game.time)?;
                for pick in Pick::ALL {
                    let candidate = game.candidate(pick);
                    let marker = if self.book.slip().contains(&candidate.id) {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(
                        out,
                        "   {} {:<9} {:<10} {:<22} {}",
                        marker,
                        candidate.id.as_str(),
                        candidate.market.to_string(),
                        candidate.selection,
                        candidate.odds
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn render_quote(out: &mut String, quote: &SlipQuote) -> Result<()> {
    if quote.legs.is_empty() {
        writeln!(out, "Your bet slip is empty")?;
        return Ok(());
    }
    for leg in &quote.legs {
        write!(
            out,
            "{:<9} {} ({}) {} stake {}",
            leg.id.as_str(),
            leg.selection,
            leg.game,
            leg.odds,
            format_money(leg.amount)
        )?;
        match leg.to_win {
            Some(to_win) => writeln!(out, ", to win {}", format_money(to_win))?,
            None => writeln!(out)?,
        }
    }
    if let Some(parlay) = &quote.parlay {
        writeln!(
            out,
            "Parlay ({} legs): odds {}, stake {}, potential payout {}",
            parlay.legs,
            parlay.odds,
            format_money(parlay.total_stake),
            format_money(parlay.payout)
        )?;
    }
    if !quote.has_valid_bets {
        writeln!(out, "Enter a stake to place a bet")?;
    }
    Ok(())
}

fn render_bet(out: &mut String, bet: &PlacedBet) -> Result<()> {
    write!(
        out,
        "{} [{}] {} {}: {} @ {} stake {}, to win {}",
        bet.id,
        bet.status,
        bet.placed_at.format("%Y-%m-%d %H:%M"),
        bet.bet_type,
        bet.selection,
        bet.odds,
        format_money(bet.amount),
        format_money(bet.potential_win)
    )?;
    match bet.result {
        Some(result) => writeln!(out, ", result {}", format_money(result))?,
        None => writeln!(out)?,
    }
    for leg in &bet.legs {
        writeln!(out, "    {} ({}) {}", leg.selection, leg.game, leg.odds)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use rust_decimal_macros::dec;
    use sportsbook::catalog::sample_history;
    use sportsbook::history::MemoryBetLog;

    fn parse(line: &str) -> Commands {
        Line::try_parse_from(line.split_whitespace()).unwrap().command
    }

    fn session() -> Session {
        Session::new(
            Sportsbook::new(Box::new(MemoryBetLog::with_bets(
                sample_history().unwrap(),
            ))),
            Catalog::builtin().unwrap(),
            Leaderboard::demo(),
            BetMode::Straight,
        )
    }

    fn output(session: &mut Session, line: &str) -> String {
        match session.handle_line(line).unwrap() {
            Flow::Continue(out) => out,
            Flow::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse("stake g1-ml1 12.50"),
            Commands::Stake {
                id: "g1-ml1".into(),
                amount: dec!(12.50)
            }
        );
        assert_eq!(
            parse("stake g1-ml1 -5"),
            Commands::Stake {
                id: "g1-ml1".into(),
                amount: dec!(-5)
            }
        );
        assert_eq!(
            parse("place --mode parlay"),
            Commands::Place {
                mode: Some(BetMode::Parlay)
            }
        );
        assert_eq!(
            parse("history -f won"),
            Commands::History {
                filter: HistoryFilter::Won,
                json: false
            }
        );
        assert_eq!(
            parse("settle bet1 won"),
            Commands::Settle {
                id: "bet1".into(),
                outcome: Outcome::Won
            }
        );
        assert_eq!(parse("exit"), Commands::Quit);
        assert!(Line::try_parse_from(["stake", "g1-ml1", "lots"]).is_err());
    }

    #[test]
    fn straight_bet_session() {
        let mut session = session();
        assert!(output(&mut session, "pick g1-ml1").starts_with("Added g1-ml1"));
        output(&mut session, "stake g1-ml1 50");
        let slip = output(&mut session, "slip");
        assert!(slip.contains("to win $38.46"));

        let placed = output(&mut session, "place");
        assert!(placed.contains("[active]"));
        assert!(placed.contains("to win $38.46"));
        assert!(session.book.slip().is_empty());
        assert_eq!(session.book.history().len(), 4);
    }

    #[test]
    fn pick_twice_deselects() {
        let mut session = session();
        output(&mut session, "pick g3-over");
        assert!(output(&mut session, "pick g3-over").starts_with("Removed g3-over"));
        assert!(output(&mut session, "slip").contains("empty"));
    }

    #[test]
    fn parlay_session() {
        let mut session = session();
        output(&mut session, "pick g2-ml1");
        output(&mut session, "pick g2-over");
        output(&mut session, "parlay-stake 20");
        let slip = output(&mut session, "slip");
        assert!(slip.contains("Parlay (2 legs): odds +388"));

        let placed = output(&mut session, "place -m parlay");
        assert!(placed.contains("2 leg parlay @ +388"));
        assert_eq!(session.book.filter_history(HistoryFilter::Active).len(), 2);
    }

    #[test]
    fn failures_leave_the_session_running() {
        let mut session = session();
        assert!(session.handle_line("pick g42-ml1").is_err());
        output(&mut session, "pick g1-ml1");
        let err = session.handle_line("place").err().unwrap();
        assert!(format!("{:#}", err).contains("no bet on the slip"));
        assert!(session.handle_line("settle bet2 lost").is_err());
        assert!(output(&mut session, "frobnicate").contains("error"));
        assert!(output(&mut session, "stake g9-ml1 5").contains("not on the slip"));
    }

    #[test]
    fn oversized_stake_is_reported_not_fatal() {
        let mut session = session();
        output(&mut session, "pick g2-ml1");
        output(&mut session, "stake g2-ml1 79228162514264337593543950335");
        let err = session.handle_line("slip").err().unwrap();
        assert!(format!("{:#}", err).contains("too large"));
        assert!(session.handle_line("place").is_err());
        assert_eq!(session.book.history().len(), 3);

        output(&mut session, "stake g2-ml1 10");
        assert!(output(&mut session, "slip").contains("to win $15.00"));
    }

    #[test]
    fn settle_and_rank() {
        let mut session = session();
        let settled = output(&mut session, "settle bet1 won");
        assert!(settled.contains("result $88.46"));
        let history = output(&mut session, "history --filter settled");
        assert_eq!(history.lines().count(), 3);
        let board = output(&mut session, "leaderboard");
        // 38.46 + 22.73 - 20
        assert!(board.contains("net $41.19"));
    }

    #[test]
    fn quit_ends_the_session() {
        let mut session = session();
        assert!(matches!(session.handle_line("quit").unwrap(), Flow::Quit));
        assert!(output(&mut session, "   ").is_empty());
    }
}
