use winit::keyboard::KeyCode;

use super::session::Session;

/// The four recognized controls of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKey {
    TurnCounterClockwise,
    Accelerate,
    TurnClockwise,
    Brake,
}

fn intent_key_for(code: KeyCode) -> Option<IntentKey> {
    match code {
        KeyCode::ArrowLeft => Some(IntentKey::TurnCounterClockwise),
        KeyCode::ArrowUp => Some(IntentKey::Accelerate),
        KeyCode::ArrowRight => Some(IntentKey::TurnClockwise),
        KeyCode::ArrowDown => Some(IntentKey::Brake),
        _ => None,
    }
}

/// Sets or clears the matching intent flag on the session's actor. Returns
/// whether the key was consumed, so the host only suppresses default
/// handling for recognized keys while an actor exists. Pure state setting:
/// no game logic runs here.
pub fn handle_key(session: &mut Session, code: KeyCode, pressed: bool) -> bool {
    let Some(intent_key) = intent_key_for(code) else {
        return false;
    };
    let Some(actor) = session.actor_mut() else {
        return false;
    };

    let intents = actor.intents_mut();
    match intent_key {
        IntentKey::TurnCounterClockwise => intents.turning_counter_clockwise = pressed,
        IntentKey::Accelerate => intents.accelerating = pressed,
        IntentKey::TurnClockwise => intents.turning_clockwise = pressed,
        IntentKey::Brake => intents.braking = pressed,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::super::camera::Viewport;
    use super::super::session::test_support::ready_session;
    use super::super::session::{Intents, Session};
    use super::*;

    fn intents_of(session: &mut Session) -> Intents {
        *session.actor_mut().expect("actor").intents_mut()
    }

    #[test]
    fn key_down_sets_and_key_up_clears_accelerating() {
        let mut session = ready_session();

        assert!(handle_key(&mut session, KeyCode::ArrowUp, true));
        assert!(intents_of(&mut session).accelerating);

        assert!(handle_key(&mut session, KeyCode::ArrowUp, false));
        assert!(!intents_of(&mut session).accelerating);
    }

    #[test]
    fn each_arrow_maps_to_its_own_flag() {
        let mut session = ready_session();

        handle_key(&mut session, KeyCode::ArrowLeft, true);
        handle_key(&mut session, KeyCode::ArrowRight, true);
        handle_key(&mut session, KeyCode::ArrowDown, true);

        let intents = intents_of(&mut session);
        assert!(intents.turning_counter_clockwise);
        assert!(intents.turning_clockwise);
        assert!(intents.braking);
        assert!(!intents.accelerating);
    }

    #[test]
    fn unrecognized_key_changes_nothing_and_is_not_consumed() {
        let mut session = ready_session();
        handle_key(&mut session, KeyCode::ArrowUp, true);

        assert!(!handle_key(&mut session, KeyCode::KeyQ, true));
        let intents = intents_of(&mut session);
        assert!(intents.accelerating);
        assert!(!intents.braking);
        assert!(!intents.turning_counter_clockwise);
        assert!(!intents.turning_clockwise);
    }

    #[test]
    fn input_is_inert_before_an_actor_exists() {
        use super::super::session::test_support::StubMap;

        let mut session = Session::new(
            Box::<StubMap>::default(),
            Viewport {
                width: 800,
                height: 600,
            },
        );
        assert!(!handle_key(&mut session, KeyCode::ArrowUp, true));
    }
}
