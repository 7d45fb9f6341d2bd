//! Plays a scripted match against the in-memory surface and prints the
//! game message after every step. Run with:
//!
//! ```text
//! RUST_LOG=debug cargo run -p local-match
//! ```

use std::sync::Arc;
use std::time::Duration;

use gridmatch::prelude::*;
use gridmatch::protocol::Digit;
use gridmatch::surface::SurfaceOp;

const BOT: UserId = UserId(0);
const ALICE: UserId = UserId(1);
const BOB: UserId = UserId(2);

async fn published_message(surface: &MemorySurface) -> MessageId {
    loop {
        let found = surface.ops().await.iter().find_map(|op| match op {
            SurfaceOp::Published(id, _) => Some(*id),
            _ => None,
        });
        if let Some(id) = found {
            // Let the event route register before we start reacting.
            tokio::time::sleep(Duration::from_millis(50)).await;
            return id;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

async fn react(
    manager: &SessionManager<MemorySurface>,
    message: MessageId,
    actor: UserId,
    symbol: Symbol,
) {
    manager
        .route_event(InputEvent {
            message,
            actor,
            symbol,
        })
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
}

async fn show(surface: &MemorySurface, message: MessageId, step: &str) {
    if let Some(text) = surface.text_of(message).await {
        println!("--- {step} ---\n{text}\n");
    }
}

#[tokio::main]
async fn main() {
    gridmatch::init_tracing();

    let surface = Arc::new(MemorySurface::new());
    let mut manager = SessionManager::new(
        Arc::clone(&surface),
        SessionConfig::new(BOT).opening_turn(Role::One),
    );

    manager
        .create_session(
            PlayerHandle::new(ALICE, "<@alice>"),
            PlayerHandle::new(BOB, "<@bob>"),
        )
        .await;
    let message = published_message(&surface).await;
    show(&surface, message, "invitation").await;

    react(&manager, message, BOB, Symbol::Accept).await;
    show(&surface, message, "game on").await;

    // (column, row) presses: Alice climbs the left column bottom-up
    // while Bob answers along the bottom row.
    let script = [
        (ALICE, [Digit::One, Digit::One]),
        (BOB, [Digit::Two, Digit::One]),
        (ALICE, [Digit::One, Digit::Two]),
        (BOB, [Digit::Three, Digit::One]),
        (ALICE, [Digit::One, Digit::Three]),
    ];
    for (actor, [col, row]) in script {
        react(&manager, message, actor, Symbol::Digit(col)).await;
        react(&manager, message, actor, Symbol::Digit(row)).await;
        show(&surface, message, "after move").await;
    }

    manager.stop_all().await;
}
