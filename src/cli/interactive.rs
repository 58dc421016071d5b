//! The live converter screen.
//!
//! Reads one command per line, redraws the whole screen after every input or
//! rate event, and keeps the rate poller informed of the selected pair.

use super::ui;
use crate::core::config::AppConfig;
use crate::core::poller::{self, PollEvent};
use crate::core::widget::{ConverterWidget, NotificationLevel};
use crate::core::{CurrencyRateProvider, RateKey};
use anyhow::Result;
use comfy_table::Cell;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Maximum dropdown entries drawn per side.
const VISIBLE_OPTIONS: usize = 8;

const HELP: &str = "Commands: amount <n> | from <search> | to <search> | \
select from|to <CODE> | swap | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Amount(String),
    SearchFrom(String),
    SearchTo(String),
    SelectFrom(String),
    SelectTo(String),
    Swap,
    Help,
    Quit,
    Unknown(String),
}

impl FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let input = match command.to_lowercase().as_str() {
            "amount" | "a" => Input::Amount(arg.to_string()),
            "from" | "f" => Input::SearchFrom(arg.to_string()),
            "to" | "t" => Input::SearchTo(arg.to_string()),
            "select" | "s" => match arg.split_once(char::is_whitespace) {
                Some((side, code)) if side.eq_ignore_ascii_case("from") => {
                    Input::SelectFrom(code.trim().to_string())
                }
                Some((side, code)) if side.eq_ignore_ascii_case("to") => {
                    Input::SelectTo(code.trim().to_string())
                }
                _ => Input::Unknown(line.to_string()),
            },
            "swap" => Input::Swap,
            "help" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            // A bare number is taken as the amount.
            _ if arg.is_empty() && line.parse::<f64>().is_ok() => Input::Amount(line.to_string()),
            _ => Input::Unknown(line.to_string()),
        };
        Ok(input)
    }
}

/// Applies one input to the widget. Returns false when the session should end.
pub fn handle_input(widget: &mut ConverterWidget, input: Input) -> bool {
    debug!(?input, "Handling input");
    match input {
        Input::Amount(amount) => widget.set_amount(&amount),
        Input::SearchFrom(search) => {
            widget.search_from(&search);
        }
        Input::SearchTo(search) => {
            widget.search_to(&search);
        }
        Input::SelectFrom(code) => {
            if let Err(e) = widget.select_from(&code) {
                widget.notify(NotificationLevel::Error, &e.to_string());
            }
        }
        Input::SelectTo(code) => {
            if let Err(e) = widget.select_to(&code) {
                widget.notify(NotificationLevel::Error, &e.to_string());
            }
        }
        Input::Swap => {
            widget.swap();
        }
        Input::Help => widget.notify(NotificationLevel::Info, HELP),
        Input::Quit => return false,
        Input::Unknown(line) => {
            widget.notify(NotificationLevel::Error, &format!("Unknown command: {line}"));
        }
    }
    true
}

/// Where frames are drawn.
pub trait Screen: Write {
    fn clear(&mut self) -> io::Result<()>;
}

/// A capture target: frames are appended without clearing, so a whole
/// session can be inspected afterwards.

impl Screen for console::Term {
    fn clear(&mut self) -> io::Result<()> {
        self.clear_screen()
    }
}

impl Screen for Vec<u8> {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renders the full screen for the current widget state.
pub fn render(widget: &mut ConverterWidget) -> String {
    let mut output = format!(
        "{}\n{}\n\n",
        ui::style_text("Currency Converter", ui::StyleType::Title),
        ui::style_text("Real-time exchange rates", ui::StyleType::Subtle)
    );

    output.push_str(&format!(
        "{} {}\n\n",
        ui::style_text("Amount:", ui::StyleType::Label),
        widget.amount()
    ));

    let from_options = widget.from().options();
    let to_options = widget.to().options();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("From  [search: {}]", widget.from().search())),
        ui::header_cell(&format!("To  [search: {}]", widget.to().search())),
    ]);
    let rows = from_options.len().max(to_options.len()).min(VISIBLE_OPTIONS);
    for i in 0..rows {
        table.add_row(vec![
            ui::option_cell(from_options.get(i).copied(), widget.from().selected()),
            ui::option_cell(to_options.get(i).copied(), widget.to().selected()),
        ]);
    }
    let hidden_from = from_options.len().saturating_sub(VISIBLE_OPTIONS);
    let hidden_to = to_options.len().saturating_sub(VISIBLE_OPTIONS);
    if hidden_from > 0 || hidden_to > 0 {
        table.add_row(vec![more_cell(hidden_from), more_cell(hidden_to)]);
    }
    if from_options.is_empty() && to_options.is_empty() {
        table.add_row(vec![Cell::new("No match"), Cell::new("No match")]);
    }
    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n\n{}\n  {}\n",
        ui::style_text("Result", ui::StyleType::Label),
        ui::style_text(&widget.result_line(), ui::StyleType::Result)
    ));
    if let (Some(updated_at), Some(rate)) = (widget.updated_at(), widget.rate()) {
        output.push_str(&ui::style_text(
            &format!(
                "  1 {} = {rate} {} (updated {})\n",
                widget.key().from,
                widget.key().to,
                updated_at.format("%H:%M:%S")
            ),
            ui::StyleType::Subtle,
        ));
    }

    let notifications = widget.drain_notifications();
    if !notifications.is_empty() {
        output.push('\n');
        for notification in &notifications {
            output.push_str(&ui::notification_line(notification));
            output.push('\n');
        }
    }

    output.push_str(&format!(
        "\n{}\n{}\n",
        ui::separator(),
        ui::style_text(HELP, ui::StyleType::Subtle)
    ));
    output
}

fn more_cell(hidden: usize) -> Cell {
    if hidden > 0 {
        Cell::new(format!("  ... {hidden} more"))
    } else {
        Cell::new("")
    }
}

fn redraw<S: Screen>(screen: &mut S, widget: &mut ConverterWidget) -> Result<()> {
    screen.clear()?;
    write!(screen, "{}", render(widget))?;
    write!(screen, "> ")?;
    screen.flush()?;
    Ok(())
}

/// Publishes the pair to the poller. Only an actual change wakes it up.
fn publish_key(keys: &watch::Sender<RateKey>, key: RateKey) -> bool {
    keys.send_if_modified(|current| {
        if *current == key {
            return false;
        }
        *current = key;
        true
    })
}

/// Runs a converter session until `quit` or end of input.
///
/// Returns the final widget state together with the screen.
pub async fn run_session<R, S>(
    mut widget: ConverterWidget,
    provider: Arc<dyn CurrencyRateProvider>,
    refresh_interval: Duration,
    input: R,
    mut screen: S,
) -> Result<(ConverterWidget, S)>
where
    R: AsyncBufRead + Unpin,
    S: Screen,
{
    let (key_tx, key_rx) = watch::channel(widget.key());
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let poller = poller::spawn(provider, refresh_interval, key_rx, event_tx);
    let mut lines = input.lines();

    redraw(&mut screen, &mut widget)?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let Ok(input) = line.parse::<Input>();
                if !handle_input(&mut widget, input) {
                    break;
                }
                publish_key(&key_tx, widget.key());
            }
            Some(event) = event_rx.recv() => match event {
                PollEvent::Fetching(key) => widget.begin_refresh(key),
                PollEvent::Fetched(update) => {
                    widget.apply(update);
                }
            },
        }
        redraw(&mut screen, &mut widget)?;
    }

    poller.abort();
    writeln!(screen)?;
    Ok((widget, screen))
}

pub async fn run(config: &AppConfig, provider: Arc<dyn CurrencyRateProvider>) -> Result<()> {
    let widget = ConverterWidget::new(
        &config.defaults.amount,
        config.default_from()?,
        config.default_to()?,
    );
    let input = BufReader::new(tokio::io::stdin());
    run_session(
        widget,
        provider,
        config.refresh_interval(),
        input,
        console::Term::stdout(),
    )
    .await?;
    Ok(())
}
