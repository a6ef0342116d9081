use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, info};

use crate::{
    AppState,
    controllers::{alerts_controller, market_controller, tips_controller},
    render,
    routes::MenuChoice,
    services::coingecko::PriceSource,
};

pub const GOODBYE: &str = "Goodbye! Happy trading!\n";

/// Interactive loop: print the menu, read a choice, run one action, repeat.
///
/// Returns when the user picks Exit or the input reaches EOF.
pub async fn run<P, R, W>(state: &mut AppState<P>, input: R, mut out: W) -> io::Result<()>
where
    P: PriceSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        out.write_all(render::MENU.as_bytes()).await?;

        let Some(choice) = prompt(&mut lines, &mut out, "Select option: ").await? else {
            break;
        };

        let reply = match MenuChoice::from_input(&choice) {
            Some(MenuChoice::MarketData) => {
                let Some(coin) = prompt(&mut lines, &mut out, "Coin ID (e.g bitcoin): ").await?
                else {
                    break;
                };
                market_controller::show_market(state, &coin).await
            }
            Some(MenuChoice::SetAlert) => {
                let Some(coin) = prompt(&mut lines, &mut out, "Coin ID: ").await? else {
                    break;
                };
                let Some(price) = prompt(&mut lines, &mut out, "Target price: ").await? else {
                    break;
                };
                let Some(direction) =
                    prompt(&mut lines, &mut out, "Alert when price is (above/below): ").await?
                else {
                    break;
                };
                alerts_controller::create_alert(state, &coin, &price, &direction)
            }
            Some(MenuChoice::CheckAlerts) => alerts_controller::check_alerts(state).await,
            Some(MenuChoice::Tip) => tips_controller::get_tip(state),
            Some(MenuChoice::Exit) => {
                out.write_all(GOODBYE.as_bytes()).await?;
                out.flush().await?;
                info!("exit requested");
                return Ok(());
            }
            None => {
                debug!(choice = %choice.trim(), "unknown menu option");
                "Invalid option\n".to_string()
            }
        };

        out.write_all(reply.as_bytes()).await?;
        out.flush().await?;

        if !state.settings.menu_delay.is_zero() {
            tokio::time::sleep(state.settings.menu_delay).await;
        }
    }

    out.write_all(format!("\n{GOODBYE}").as_bytes()).await?;
    out.flush().await?;
    info!("input closed, exiting");
    Ok(())
}

async fn prompt<R, W>(lines: &mut Lines<R>, out: &mut W, text: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    lines.next_line().await
}
