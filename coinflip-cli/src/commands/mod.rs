use anyhow::Result;
use coinflip_core::UserId;
use coinflip_game::{CoinSide, FlipGame, GameError};
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

const CUSTOM_STAKE: &str = "Custom amount";

/// Interactive session: the terminal stands in for the chat transport.
pub fn play(game: &FlipGame, user: UserId) -> Result<()> {
    let balance = game.ensure_account(user);

    println!("Welcome to Heads or Tails!");
    println!();
    println!("Pick a side, wager your points and flip the coin.");
    println!("A win pays double your stake; a loss forfeits it.");
    println!("Run out of points and the house stakes you again.");
    println!();
    println!("Your balance: {} points", balance);
    println!();

    let theme = ColorfulTheme::default();

    loop {
        let balance = match game.start_flip(user) {
            Ok(balance) => balance,
            Err(GameError::InsufficientFunds { .. }) => {
                println!(
                    "You are out of points! The house staked you {} fresh ones.",
                    game.config().starting_balance
                );
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let side = match Select::with_theme(&theme)
            .with_prompt("Choose a side")
            .items(&["Heads", "Tails"])
            .default(0)
            .interact()?
        {
            0 => CoinSide::Heads,
            _ => CoinSide::Tails,
        };

        let menu = game.choose_side(user, side)?;
        let mut labels: Vec<String> = menu.iter().map(|amount| amount.to_string()).collect();
        labels.push(CUSTOM_STAKE.to_string());

        let picked = Select::with_theme(&theme)
            .with_prompt(format!("Your stake (balance: {})", balance))
            .items(&labels)
            .default(0)
            .interact()?;

        let amount = if picked < menu.len() {
            menu[picked]
        } else {
            Input::<i64>::with_theme(&theme)
                .with_prompt("Stake")
                .interact_text()?
        };

        match game.place_bet(user, side, amount) {
            Ok(outcome) => {
                println!();
                println!("The coin lands on... {}!", outcome.outcome);
                if outcome.won {
                    println!("You won {} points!", outcome.amount);
                } else {
                    println!("You lost {} points.", outcome.amount);
                }
                println!("Your balance: {} points", outcome.new_balance);
                println!();
            }
            Err(e @ GameError::InvalidBet { .. }) => {
                println!("{}", e);
                println!();
            }
            Err(e) => return Err(e.into()),
        }

        if !Confirm::with_theme(&theme)
            .with_prompt("Flip again?")
            .default(true)
            .interact()?
        {
            println!("Thanks for playing!");
            return Ok(());
        }
    }
}

pub fn show_balance(game: &FlipGame, user: UserId) -> Result<()> {
    let balance = game.ensure_account(user);
    println!("Balance for user {}: {} points", user, balance);
    Ok(())
}

/// Unattended play with a fixed strategy, reporting the tally at the end.
pub fn simulate(
    game: &FlipGame,
    user: UserId,
    flips: usize,
    stake: Option<i64>,
    side: &str,
    json: bool,
) -> Result<()> {
    let side: CoinSide = side.parse()?;
    game.ensure_account(user);

    let mut wins = 0usize;
    let mut losses = 0usize;
    let mut resets = 0usize;

    for flip in 0..flips {
        let balance = match game.start_flip(user) {
            Ok(balance) => balance,
            Err(GameError::InsufficientFunds { .. }) => {
                resets += 1;
                game.config().starting_balance
            }
            Err(e) => return Err(e.into()),
        };

        let menu = game.choose_side(user, side)?;
        let amount = stake
            .filter(|&wanted| wanted > 0 && wanted <= balance)
            .unwrap_or_else(|| *menu.last().unwrap_or(&balance));

        let outcome = game.place_bet(user, side, amount)?;
        tracing::debug!(
            "flip {}: staked {} on {}, landed {}, balance {}",
            flip,
            amount,
            side,
            outcome.outcome,
            outcome.new_balance
        );
        if outcome.won {
            wins += 1;
        } else {
            losses += 1;
        }
    }

    let final_balance = game.balance(user)?;
    let win_rate = if flips > 0 {
        wins as f64 / flips as f64
    } else {
        0.0
    };

    if json {
        let report = serde_json::json!({
            "user": user.0,
            "side": side.to_string(),
            "flips": flips,
            "wins": wins,
            "losses": losses,
            "win_rate": win_rate,
            "resets": resets,
            "final_balance": final_balance,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Flips".to_string(), flips.to_string()]);
    table.add_row(vec!["Side".to_string(), side.to_string()]);
    table.add_row(vec!["Wins".to_string(), wins.to_string()]);
    table.add_row(vec!["Losses".to_string(), losses.to_string()]);
    table.add_row(vec!["Win rate".to_string(), format!("{:.1}%", win_rate * 100.0)]);
    table.add_row(vec!["Resets".to_string(), resets.to_string()]);
    table.add_row(vec!["Final balance".to_string(), final_balance.to_string()]);

    println!("{}", table);
    Ok(())
}
