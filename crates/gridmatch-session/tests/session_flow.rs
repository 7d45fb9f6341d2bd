//! Integration tests driving full sessions through the manager and an
//! in-memory chat surface.

use std::sync::Arc;
use std::time::Duration;

use gridmatch_core::Role;
use gridmatch_protocol::{
    Digit, InputEvent, MessageId, PlayerHandle, SessionId, Symbol, UserId,
};
use gridmatch_session::{SessionConfig, SessionManager, SessionStatus};
use gridmatch_surface::{MemorySurface, SurfaceOp};

const BOT: UserId = UserId(100);
const ALICE: UserId = UserId(1);
const BOB: UserId = UserId(2);
const STRANGER: UserId = UserId(3);

fn alice() -> PlayerHandle {
    PlayerHandle::new(ALICE, "<@1>")
}

fn bob() -> PlayerHandle {
    PlayerHandle::new(BOB, "<@2>")
}

fn digit(n: usize) -> Symbol {
    Symbol::Digit(Digit::from_index(n).unwrap())
}

/// A manager over a shared in-memory surface, with player one fixed to
/// open so move sequences are deterministic.
fn manager_on(
    surface: Arc<MemorySurface>,
) -> SessionManager<MemorySurface> {
    SessionManager::new(
        surface,
        SessionConfig::new(BOT).opening_turn(Role::One),
    )
}

/// Waits for the session's invitation to publish and its event route
/// to register, returning the message id everything lives on.
async fn published_message(surface: &MemorySurface) -> MessageId {
    for _ in 0..200 {
        let found = surface.ops().await.iter().find_map(|op| match op {
            SurfaceOp::Published(id, _) => Some(*id),
            _ => None,
        });
        if let Some(id) = found {
            // Route registration runs in a background task right after
            // the publish resolves; give it a beat.
            tokio::time::sleep(Duration::from_millis(50)).await;
            return id;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("invitation was never published");
}

/// Polls until the message text contains `needle`.
async fn wait_for_text(
    surface: &MemorySurface,
    message: MessageId,
    needle: &str,
) -> String {
    for _ in 0..200 {
        if let Some(text) = surface.text_of(message).await {
            if text.contains(needle) {
                return text;
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("message never contained {needle:?}");
}

/// Polls until `pred` matches some recorded operation.
async fn wait_for_op(
    surface: &MemorySurface,
    pred: impl Fn(&SurfaceOp) -> bool,
) {
    for _ in 0..200 {
        if surface.ops().await.iter().any(&pred) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected operation never recorded");
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
    // Keep the command/effect pipeline ordered from the test's view.
    tokio::time::sleep(Duration::from_millis(10)).await;
}

/// Creates a session and drives it through an accepted invitation.
async fn started_session(
    manager: &mut SessionManager<MemorySurface>,
    surface: &MemorySurface,
) -> (SessionId, MessageId) {
    let session_id = manager.create_session(alice(), bob()).await;
    let message = published_message(surface).await;
    react(manager, message, BOB, Symbol::Accept).await;
    wait_for_text(surface, message, "it's your turn!").await;
    (session_id, message)
}

/// Submits a full (column, raw-row) move.
async fn play(
    manager: &SessionManager<MemorySurface>,
    message: MessageId,
    actor: UserId,
    col: usize,
    raw_row: usize,
) {
    react(manager, message, actor, digit(col)).await;
    react(manager, message, actor, digit(raw_row)).await;
}

#[tokio::test]
async fn test_accepted_match_plays_to_a_win() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let (_, message) = started_session(&mut manager, &surface).await;

    // Alice climbs the left column bottom-up (its top cell last, so
    // the column's digit stays in play); Bob answers along the bottom.
    play(&manager, message, ALICE, 0, 0).await;
    play(&manager, message, BOB, 1, 0).await;
    play(&manager, message, ALICE, 0, 1).await;
    play(&manager, message, BOB, 2, 0).await;
    play(&manager, message, ALICE, 0, 2).await;

    let text = wait_for_text(&surface, message, "Game Over!").await;
    assert!(text.contains("<@1> won!"));

    // Reactions are cleared when the game ends; the message survives.
    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Cleared(m) if *m == message)
    })
    .await;
    assert!(surface.text_of(message).await.is_some());
}

#[tokio::test]
async fn test_invitation_message_shows_both_players() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;

    let text = surface.text_of(message).await.unwrap();
    assert!(text.contains("<@1>"));
    assert!(text.contains("<@2>"));
    assert!(text.contains("accept the challenge"));

    // Invitation affordances attach in order.
    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Attached(_, Symbol::Decline))
    })
    .await;
    let attached: Vec<Symbol> = surface
        .ops()
        .await
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::Attached(_, s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(attached, vec![Symbol::Accept, Symbol::Decline]);
}

#[tokio::test]
async fn test_declined_invitation_deletes_message() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;

    react(&manager, message, BOB, Symbol::Decline).await;

    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Deleted(m) if *m == message)
    })
    .await;
    assert_eq!(surface.text_of(message).await, None);
}

#[tokio::test]
async fn test_bystander_reaction_is_undone_at_the_source() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let (_, message) = started_session(&mut manager, &surface).await;

    react(&manager, message, STRANGER, digit(0)).await;

    wait_for_op(&surface, |op| {
        matches!(
            op,
            SurfaceOp::Detached(m, u, _)
                if *m == message && *u == STRANGER
        )
    })
    .await;
    // The game itself is untouched: still Alice's move.
    let text = surface.text_of(message).await.unwrap();
    assert!(text.contains("<@1> it's your turn!"));
}

#[tokio::test]
async fn test_occupied_cell_reprompts_the_same_player() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let (_, message) = started_session(&mut manager, &surface).await;

    play(&manager, message, ALICE, 0, 0).await;
    play(&manager, message, BOB, 0, 0).await;

    let text =
        wait_for_text(&surface, message, "not valid, try again").await;
    assert!(text.contains("<@2>"));

    // Bob picks a free cell and the turn finally passes.
    play(&manager, message, BOB, 1, 0).await;
    wait_for_text(&surface, message, "<@1> it's your turn!").await;
}

#[tokio::test]
async fn test_missing_removal_permission_advises_exactly_once() {
    let surface = Arc::new(MemorySurface::with_detach_denied());
    let mut manager = manager_on(Arc::clone(&surface));

    let (_, message) = started_session(&mut manager, &surface).await;

    // Two unauthorized presses, each asking for a removal that the
    // surface refuses.
    react(&manager, message, STRANGER, digit(0)).await;
    react(&manager, message, STRANGER, digit(1)).await;
    // A legal move afterwards proves the game is unaffected.
    play(&manager, message, ALICE, 0, 0).await;
    wait_for_text(&surface, message, "<@2> it's your turn!").await;

    let notices = surface.notices().await;
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("permission"));
}

#[tokio::test]
async fn test_stop_session_clears_a_running_game() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let (session_id, message) =
        started_session(&mut manager, &surface).await;
    assert_eq!(manager.len().await, 1);

    manager.stop_session(session_id).await.unwrap();

    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Cleared(m) if *m == message)
    })
    .await;
    // Started games keep their message on abort.
    assert!(surface.text_of(message).await.is_some());
    assert!(manager.is_empty().await);

    // The session is gone; stopping again is an error, and late events
    // are dropped without panicking.
    assert!(manager.stop_session(session_id).await.is_err());
    react(&manager, message, ALICE, digit(0)).await;
}

#[tokio::test]
async fn test_stop_pending_invitation_deletes_message() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let session_id = manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;

    manager.stop_session(session_id).await.unwrap();

    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Deleted(m) if *m == message)
    })
    .await;
}

#[tokio::test]
async fn test_session_status_tracks_lifecycle() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let session_id = manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;
    assert_eq!(
        manager.session_status(session_id).await.unwrap(),
        SessionStatus::PendingInvitation
    );

    react(&manager, message, BOB, Symbol::Accept).await;
    wait_for_text(&surface, message, "it's your turn!").await;
    assert_eq!(
        manager.session_status(session_id).await.unwrap(),
        SessionStatus::AwaitingMove
    );
}

#[tokio::test]
async fn test_idle_session_aborts_after_timeout() {
    let surface = Arc::new(MemorySurface::new());
    let config = SessionConfig::new(BOT)
        .opening_turn(Role::One)
        .idle_timeout(Duration::from_millis(50));
    let mut manager =
        SessionManager::new(Arc::clone(&surface), config);

    manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;

    // Nobody ever answers the invitation.
    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Deleted(m) if *m == message)
    })
    .await;
}

#[tokio::test]
async fn test_two_sessions_route_independently() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let carol = PlayerHandle::new(UserId(4), "<@4>");
    let dave = PlayerHandle::new(UserId(5), "<@5>");

    manager.create_session(alice(), bob()).await;
    let first = published_message(&surface).await;
    manager.create_session(carol, dave).await;

    // Wait for the second invitation and its route.
    let second = loop {
        let ids: Vec<MessageId> = surface
            .ops()
            .await
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Published(id, _) => Some(*id),
                _ => None,
            })
            .collect();
        if ids.len() == 2 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            break ids[1];
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    };

    // Declining the second game leaves the first untouched.
    react(&manager, second, UserId(5), Symbol::Decline).await;
    wait_for_op(&surface, |op| {
        matches!(op, SurfaceOp::Deleted(m) if *m == second)
    })
    .await;
    assert!(surface.text_of(first).await.is_some());

    react(&manager, first, BOB, Symbol::Accept).await;
    wait_for_text(&surface, first, "it's your turn!").await;
}

#[tokio::test]
async fn test_finished_game_is_pruned_from_registry() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    let (session_id, message) =
        started_session(&mut manager, &surface).await;
    assert_eq!(manager.len().await, 1);

    // Play to a win; nobody ever calls stop_session.
    play(&manager, message, ALICE, 0, 0).await;
    play(&manager, message, BOB, 1, 0).await;
    play(&manager, message, ALICE, 0, 1).await;
    play(&manager, message, BOB, 2, 0).await;
    play(&manager, message, ALICE, 0, 2).await;
    wait_for_text(&surface, message, "Game Over!").await;

    // The actor exits on its own and the registry follows.
    for _ in 0..200 {
        if manager.is_empty().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(manager.is_empty().await);
    assert!(manager.get(session_id).await.is_none());
    assert!(manager.session_status(session_id).await.is_err());

    // The route is gone too: a late reaction on the old message is
    // dropped without reaching any session.
    react(&manager, message, BOB, digit(1)).await;
}

#[tokio::test]
async fn test_declined_invitation_is_pruned_from_registry() {
    let surface = Arc::new(MemorySurface::new());
    let mut manager = manager_on(Arc::clone(&surface));

    manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;
    react(&manager, message, BOB, Symbol::Decline).await;

    for _ in 0..200 {
        if manager.is_empty().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(manager.is_empty().await);
}

#[tokio::test]
async fn test_status_polling_does_not_defer_idle_timeout() {
    let surface = Arc::new(MemorySurface::new());
    let config = SessionConfig::new(BOT)
        .opening_turn(Role::One)
        .idle_timeout(Duration::from_millis(60));
    let mut manager =
        SessionManager::new(Arc::clone(&surface), config);

    let session_id = manager.create_session(alice(), bob()).await;
    let message = published_message(&surface).await;

    // Poll the status faster than the idle window; the deadline must
    // still fire and abort the unanswered invitation.
    for _ in 0..40 {
        let _ = manager.session_status(session_id).await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        let deleted = surface.ops().await.iter().any(
            |op| matches!(op, SurfaceOp::Deleted(m) if *m == message),
        );
        if deleted {
            return;
        }
    }
    panic!("idle timeout never fired under status polling");
}
