use std::time::Instant;

use super::camera::{camera_window, CameraWindow};
use super::clock::SimulationClock;
use super::rendering::RenderError;
use super::session::Session;

/// Seam between frame orchestration and the concrete renderer. `present`
/// receives the post-catch-up session state and the derived camera window
/// and performs the windowed map draw plus the HUD overlay.
pub trait FramePresenter {
    fn present(&mut self, session: &Session, window: CameraWindow) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks_applied: u64,
    pub rendered: bool,
}

/// Orchestrates one rendering frame: drains every due tick through the
/// simulation clock (each calling `Actor::update` once, oldest first), then
/// issues at most one present reflecting only the final post-catch-up state.
/// This is the only place the world is rendered.
pub struct FrameDriver {
    clock: SimulationClock,
}

impl FrameDriver {
    pub fn new(clock: SimulationClock) -> Self {
        Self { clock }
    }

    pub fn on_frame(
        &mut self,
        now: Instant,
        session: &mut Session,
        presenter: &mut dyn FramePresenter,
    ) -> Result<FrameReport, RenderError> {
        if !session.is_ticking() {
            return Ok(FrameReport::default());
        }

        let ticks_applied = self.clock.advance(now);
        if let Some(actor) = session.actor_mut() {
            for _ in 0..ticks_applied {
                actor.update();
            }
        }

        let rendered = self.render(session, presenter)?;
        Ok(FrameReport {
            ticks_applied,
            rendered,
        })
    }

    /// Renders one frame from current state without ticking. Used for the
    /// immediate frame at session start; a missing actor no-ops gracefully.
    pub fn render(
        &mut self,
        session: &Session,
        presenter: &mut dyn FramePresenter,
    ) -> Result<bool, RenderError> {
        let Some(position) = session.actor().map(|actor| actor.position()) else {
            return Ok(false);
        };
        let window = camera_window(position, session.viewport());
        presenter.present(session, window)?;
        Ok(true)
    }

    /// Re-anchors the clock after a soft pause so the suspended interval is
    /// not replayed as catch-up ticks.
    pub fn resume(&mut self, now: Instant) {
        self.clock.restart(now);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::session::test_support::{ready_session, running_session};
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[derive(Default)]
    struct RecordingPresenter {
        windows: Vec<CameraWindow>,
    }

    impl FramePresenter for RecordingPresenter {
        fn present(&mut self, _session: &Session, window: CameraWindow) -> Result<(), RenderError> {
            self.windows.push(window);
            Ok(())
        }
    }

    fn driver(base: Instant) -> FrameDriver {
        FrameDriver::new(SimulationClock::new(TICK, base))
    }

    #[test]
    fn replays_due_ticks_then_renders_once() {
        let base = Instant::now();
        let mut driver = driver(base);
        let mut session = running_session();
        let mut presenter = RecordingPresenter::default();

        let report = driver
            .on_frame(base + Duration::from_millis(250), &mut session, &mut presenter)
            .expect("frame");

        assert_eq!(report.ticks_applied, 2);
        assert!(report.rendered);
        assert_eq!(presenter.windows.len(), 1);
        // The stub actor steps +1 world unit per update.
        let position = session.actor().expect("actor").position();
        assert_eq!(position.x, 2.0);
    }

    #[test]
    fn leftover_time_carries_into_the_next_frame() {
        let base = Instant::now();
        let mut driver = driver(base);
        let mut session = running_session();
        let mut presenter = RecordingPresenter::default();

        let first = driver
            .on_frame(base + Duration::from_millis(250), &mut session, &mut presenter)
            .expect("frame");
        let second = driver
            .on_frame(base + Duration::from_millis(300), &mut session, &mut presenter)
            .expect("frame");

        assert_eq!(first.ticks_applied, 2);
        assert_eq!(second.ticks_applied, 1);
        assert_eq!(presenter.windows.len(), 2);
    }

    #[test]
    fn render_reflects_post_catch_up_state_only() {
        let base = Instant::now();
        let mut driver = driver(base);
        let mut session = running_session();
        let mut presenter = RecordingPresenter::default();

        driver
            .on_frame(base + Duration::from_millis(500), &mut session, &mut presenter)
            .expect("frame");

        // 5 ticks moved the actor to x=5; the single window is derived from
        // that final position, not any intermediate one.
        let expected = camera_window(
            session.actor().expect("actor").position(),
            session.viewport(),
        );
        assert_eq!(presenter.windows, vec![expected]);
    }

    #[test]
    fn not_running_session_neither_ticks_nor_renders() {
        let base = Instant::now();
        let mut driver = driver(base);
        let mut session = ready_session();
        let mut presenter = RecordingPresenter::default();

        let report = driver
            .on_frame(base + Duration::from_secs(1), &mut session, &mut presenter)
            .expect("frame");

        assert_eq!(report, FrameReport::default());
        assert!(presenter.windows.is_empty());
    }

    #[test]
    fn paused_session_suspends_frames_and_resume_skips_backlog() {
        let base = Instant::now();
        let mut driver = driver(base);
        let mut session = running_session();
        let mut presenter = RecordingPresenter::default();

        session.set_paused(true);
        let paused_report = driver
            .on_frame(base + Duration::from_secs(30), &mut session, &mut presenter)
            .expect("frame");
        assert_eq!(paused_report, FrameReport::default());

        let resume_at = base + Duration::from_secs(30);
        session.set_paused(false);
        driver.resume(resume_at);

        let report = driver
            .on_frame(resume_at + Duration::from_millis(100), &mut session, &mut presenter)
            .expect("frame");
        assert_eq!(report.ticks_applied, 1);
    }

    #[test]
    fn immediate_render_works_before_start() {
        let base = Instant::now();
        let mut driver = driver(base);
        let session = ready_session();
        let mut presenter = RecordingPresenter::default();

        assert!(driver.render(&session, &mut presenter).expect("render"));
        assert_eq!(presenter.windows.len(), 1);
    }
}
