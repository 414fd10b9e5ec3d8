use async_trait::async_trait;
use tracing::debug;

use super::{TurnContext, TurnExecutor, TurnOutcome};
use crate::api::Result;
use crate::events::TurnEvent;

/// Waits on the selection channel for a report inside the candidate set.
///
/// Reports outside the set are announced as `SelectionRejected` and the
/// turn keeps waiting. Only a Blocker's applied move refreshes the beam.
#[derive(Debug, Default, Clone, Copy)]
pub struct HumanExecutor;

#[async_trait]
impl TurnExecutor for HumanExecutor {
    fn name(&self) -> &'static str {
        "human"
    }

    async fn run(&self, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome> {
        ctx.discard_stale_selections();
        ctx.phase.begin_turn(&ctx.player)?;
        ctx.announce_start();

        if ctx.candidates.is_empty() {
            return ctx.skip();
        }

        ctx.highlight_candidates(true);

        let destination = loop {
            let space = ctx.next_selection().await?;
            if ctx.candidates.contains(&space) {
                break space;
            }
            debug!(
                target: "beam::turn",
                player = %ctx.player.id,
                %space,
                "Selection outside candidate set"
            );
            ctx.publish(TurnEvent::SelectionRejected {
                player: ctx.player.id,
                space,
            });
            ctx.phase.await_input()?;
        };

        ctx.phase.receive_input()?;
        ctx.phase.start_moving()?;
        let outcome = ctx.apply_move(destination);
        ctx.highlight_candidates(false);

        if ctx.player.piece.is_blocker() && outcome.is_moved() {
            ctx.board.update_beam();
        }

        ctx.phase.finish_turn()?;
        Ok(outcome)
    }
}
