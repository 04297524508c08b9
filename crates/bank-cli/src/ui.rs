//! Session UI - operator command loop on stdin

use std::io::{self, Write};

use bank_runtime::{CommandError, OperatorCommand, SessionHandle};
use bank_time::TimerState;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{render_chart, render_table};

/// Operator command loop
pub struct SessionUI {
    handle: SessionHandle,
}

impl SessionUI {
    pub fn new(handle: SessionHandle) -> Self {
        Self { handle }
    }

    /// Read commands until `/quit` or end of input
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();

        prompt()?;
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                prompt()?;
                continue;
            }

            let command = match OperatorCommand::parse(line) {
                Ok(command) => command,
                Err(e) => {
                    report(&e);
                    prompt()?;
                    continue;
                }
            };

            if command == OperatorCommand::Quit {
                break;
            }
            if let Err(e) = self.execute(command).await {
                report(&e);
            }
            prompt()?;
        }

        Ok(())
    }

    async fn execute(&self, command: OperatorCommand) -> Result<(), CommandError> {
        match command {
            OperatorCommand::AddGroup(name) => {
                let group = self.handle.add_group(name).await?;
                println!("✅ Added {}", group.name);
            }
            OperatorCommand::Deposit { group, amount } => {
                let group = self.handle.deposit(group, amount).await?;
                println!("💰 {} now holds {}", group.name, group.wealth);
            }
            OperatorCommand::Withdraw { group, amount } => {
                let group = self.handle.withdraw(group, amount).await?;
                println!("💸 {} now holds {}", group.name, group.wealth);
            }
            OperatorCommand::StartTimer { duration, rate } => {
                let tick = self.handle.start_timer(duration, rate).await?;
                let status = self.handle.status().await?;
                match tick.display() {
                    None => println!("⏳ Countdown already running, rate {}", status.rate),
                    Some(display) => {
                        println!("▶️  Countdown running from {} at {}", display.text(), status.rate)
                    }
                }
            }
            OperatorCommand::StopTimer => {
                self.handle.stop_timer().await?;
                println!("⏸️  Countdown paused");
            }
            OperatorCommand::EndTimer => {
                self.handle.end_timer().await?;
                println!("⏹️  Countdown ended");
            }
            OperatorCommand::Save => {
                self.handle.save().await?;
                println!("💾 Ledger saved");
            }
            OperatorCommand::Show => {
                let snapshot = self.handle.snapshot().await?;
                print!("{}", render_table(&snapshot));
                print!("{}", render_chart("Wealth", &snapshot.wealth_chart()));
                print!("{}", render_chart("Ans. Questions", &snapshot.answered_chart()));
            }
            OperatorCommand::Timer => {
                let status = self.handle.status().await?;
                let state = match status.timer_state {
                    TimerState::Idle => "idle",
                    TimerState::Running => "running",
                    TimerState::Stopped => "paused",
                };
                println!("📊 Countdown Status:");
                println!("   State: {state}");
                println!(
                    "   Remaining: {} of {}",
                    status.display.text(),
                    bank_core::format_mm_ss(status.display.total)
                );
                println!("   Rate: {}", status.rate);
                println!("   Inflations so far: {}", status.expiries);
                println!("   Groups: {}", status.groups);
            }
            OperatorCommand::Help => self.show_help(),
            OperatorCommand::Quit => {}
        }
        Ok(())
    }

    pub fn show_help(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║  Available Commands:                                       ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║  /add <name>              - Add a group                    ║");
        println!("║  /deposit <name> <amount> - Reward a correct answer        ║");
        println!("║  /withdraw <name> <amount>- Take money from a group        ║");
        println!("║  /start [MM:SS] [rate]    - Start the inflation countdown  ║");
        println!("║  /stop                    - Pause the countdown            ║");
        println!("║  /end                     - End the countdown              ║");
        println!("║  /save                    - Save the ledger                ║");
        println!("║  /show                    - Show table and charts          ║");
        println!("║  /timer                   - Show countdown status          ║");
        println!("║  /help                    - Show this help                 ║");
        println!("║  /quit                    - Exit                           ║");
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn report(e: &CommandError) {
    println!("✗ {e}");
}
