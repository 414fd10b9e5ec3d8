use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{TurnContext, TurnExecutor, TurnOutcome};
use crate::api::Result;
use crate::policy::TurnPolicy;

/// Paces the turn with the configured delay, then lets a [`TurnPolicy`]
/// pick the destination. The beam is refreshed after every computer turn.
pub struct ComputerExecutor {
    policy: Arc<dyn TurnPolicy>,
}

impl ComputerExecutor {
    pub fn new(policy: Arc<dyn TurnPolicy>) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl TurnExecutor for ComputerExecutor {
    fn name(&self) -> &'static str {
        "computer"
    }

    async fn run(&self, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome> {
        ctx.phase.begin_turn(&ctx.player)?;
        ctx.announce_start();
        ctx.highlight_piece(true);

        ctx.clock.sleep(ctx.cpu_turn_delay).await;

        let choice = self
            .policy
            .choose(&ctx.player, &ctx.candidates)
            .await
            .filter(|space| {
                let legal = ctx.candidates.contains(space);
                if !legal {
                    warn!(
                        target: "beam::turn",
                        player = %ctx.player.id,
                        %space,
                        "Policy chose a space outside the candidate set"
                    );
                }
                legal
            });

        let outcome = match choice {
            Some(destination) => {
                debug!(
                    target: "beam::turn",
                    player = %ctx.player.id,
                    %destination,
                    "Computer selected destination"
                );
                ctx.phase.receive_input()?;
                ctx.phase.start_moving()?;
                ctx.apply_move(destination)
            }
            None => {
                ctx.board.update_beam();
                ctx.highlight_piece(false);
                return ctx.skip();
            }
        };

        ctx.board.update_beam();
        ctx.highlight_piece(false);
        ctx.phase.finish_turn()?;
        Ok(outcome)
    }
}
