use engine::{Actor, Heading, Intents, StartPose, Vec2};

// Motion constants are per tick; at 50 ticks per second full speed covers
// 2400 world units (150 screen pixels) each second.
const TURN_STEPS_PER_TICK: i16 = 2;
const ACCELERATION_PER_TICK: f32 = 4.0;
const BRAKE_PER_TICK: f32 = 8.0;
const COAST_DRAG_PER_TICK: f32 = 1.0;
const MAX_SPEED: f32 = 48.0;

/// The player's tank: scalar speed along a wrapping integer heading.
/// Consumes the live intent flags once per `update`, which advances exactly
/// one tick's worth of motion.
pub(crate) struct Tank {
    position: Vec2,
    heading: Heading,
    speed: f32,
    intents: Intents,
}

impl Tank {
    pub(crate) fn new(start: StartPose) -> Self {
        Self {
            position: start.position,
            heading: start.heading,
            speed: 0.0,
            intents: Intents::default(),
        }
    }

    #[cfg(test)]
    fn speed(&self) -> f32 {
        self.speed
    }
}

impl Actor for Tank {
    fn update(&mut self) {
        let intents = self.intents;

        // Both turn flags held at once cancel out, as during a direction
        // reversal mid-keypress.
        let mut turn = 0i16;
        if intents.turning_counter_clockwise {
            turn -= TURN_STEPS_PER_TICK;
        }
        if intents.turning_clockwise {
            turn += TURN_STEPS_PER_TICK;
        }
        self.heading = self.heading.rotated(turn);

        if intents.accelerating {
            self.speed += ACCELERATION_PER_TICK;
        }
        if intents.braking {
            self.speed -= BRAKE_PER_TICK;
        }
        if !intents.accelerating && !intents.braking {
            self.speed -= COAST_DRAG_PER_TICK;
        }
        self.speed = self.speed.clamp(0.0, MAX_SPEED);

        let radians = self.heading.to_radians();
        self.position.x += radians.cos() * self.speed;
        self.position.y += radians.sin() * self.speed;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn heading(&self) -> Heading {
        self.heading
    }

    fn intents_mut(&mut self) -> &mut Intents {
        &mut self.intents
    }
}
