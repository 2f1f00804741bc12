// Session lifecycle against a recording render host.

use globe_core::*;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

type Slot = Rc<RefCell<Option<FrameCallback>>>;

#[derive(Default)]
struct FakeHost {
    slot: Slot,
    created: Vec<RenderOptions>,
    destroyed: Rc<RefCell<u32>>,
    fail: bool,
}

struct FakeHandle {
    slot: Slot,
    destroyed: Rc<RefCell<u32>>,
}

impl RenderHandle for FakeHandle {
    fn destroy(&mut self) {
        self.slot.borrow_mut().take();
        *self.destroyed.borrow_mut() += 1;
    }
}

impl RenderHost for FakeHost {
    type Surface = ();
    type Handle = FakeHandle;
    type Error = String;

    fn create(
        &mut self,
        _surface: &(),
        options: RenderOptions,
        on_render: FrameCallback,
    ) -> Result<FakeHandle, String> {
        if self.fail {
            return Err("context lost".to_string());
        }
        self.created.push(options);
        *self.slot.borrow_mut() = Some(on_render);
        Ok(FakeHandle {
            slot: self.slot.clone(),
            destroyed: self.destroyed.clone(),
        })
    }
}

impl FakeHost {
    fn render(&self) -> Option<FrameState> {
        let mut state = FrameState::default();
        let mut slot = self.slot.borrow_mut();
        let callback = slot.as_mut()?;
        callback(&mut state);
        Some(state)
    }

    fn destroyed(&self) -> u32 {
        *self.destroyed.borrow()
    }
}

fn start(config: SessionConfig) -> (FakeHost, Session<FakeHost, TimerQueue>, Instant) {
    let t0 = Instant::now();
    let mut host = FakeHost::default();
    let session =
        Session::init(config, &mut host, Some(&()), TimerQueue::new(t0)).expect("mount");
    (host, session, t0)
}

fn config_with_markers() -> SessionConfig {
    SessionConfig {
        markers: vec![GeoPoint::new(51.5, -0.1), GeoPoint::new(-33.9, 151.2)],
        ..SessionConfig::default()
    }
}

#[test]
fn init_mounts_with_configured_options() {
    let (host, session, _) = start(config_with_markers());
    assert!(session.is_mounted());
    assert_eq!(host.created.len(), 1);

    let options = &host.created[0];
    assert_eq!(options.width, 1200);
    assert_eq!(options.height, 1200);
    assert_eq!(options.device_pixel_ratio, 2);
    assert_eq!(options.phi, 0.0);
    assert_eq!(options.theta, 0.0);
    assert_eq!(options.markers.len(), 2);
    assert_eq!(options.markers[0].location, [51.5, -0.1]);
    assert!(options.markers.iter().all(|m| m.size == 0.07));
    assert_eq!(session.phase(), FocusPhase::Idle);
}

#[test]
fn missing_surface_defers_mount() {
    let mut host = FakeHost::default();
    let mut session: Session<FakeHost, TimerQueue> =
        Session::init(SessionConfig::default(), &mut host, None, TimerQueue::default())
            .expect("deferred mount is not an error");
    assert!(!session.is_mounted());
    assert!(host.created.is_empty());

    // focus still works on an unmounted session
    session.set_focus(10.0, 10.0);
    assert_eq!(session.phase(), FocusPhase::Focused);

    session
        .reconfigure(SessionConfig::default(), &mut host, Some(&()))
        .expect("mount");
    assert!(session.is_mounted());
    assert_eq!(host.created.len(), 1);
}

#[test]
fn host_errors_propagate_unchanged() {
    let mut host = FakeHost {
        fail: true,
        ..FakeHost::default()
    };
    let result: Result<Session<FakeHost, TimerQueue>, String> = Session::init(
        SessionConfig::default(),
        &mut host,
        Some(&()),
        TimerQueue::default(),
    );
    assert_eq!(result.err().as_deref(), Some("context lost"));
}

#[test]
fn each_frame_writes_orientation_and_size() {
    let (host, session, _) = start(SessionConfig::default());
    let first = host.render().expect("callback installed");
    assert_eq!(first.width, 1200);
    assert_eq!(first.height, 1200);
    assert_eq!(first.theta, 0.0);
    assert!(first.phi > 0.0);

    let second = host.render().expect("callback installed");
    assert!(second.phi > first.phi);
    assert_eq!(session.frames(), 2);
    assert_eq!(session.animation().current_phi, second.phi);
}

#[test]
fn frame_size_follows_pixel_ratio() {
    let (host, _session, _) = start(SessionConfig {
        render_size: 300,
        device_pixel_ratio: 3,
        ..SessionConfig::default()
    });
    let state = host.render().expect("callback installed");
    assert_eq!((state.width, state.height), (900, 900));
}

#[test]
fn focus_moves_toward_target_and_freezes_idle_phase() {
    let (host, mut session, _) = start(SessionConfig::default());
    for _ in 0..10 {
        host.render();
    }
    let idle_before = session.animation().idle_phi;

    session.set_focus(0.0, 0.0);
    assert_eq!(session.phase(), FocusPhase::Focused);
    assert_eq!(session.focus_target(), Some(location_to_angles(0.0, 0.0)));

    let mut last = f64::INFINITY;
    for _ in 0..120 {
        host.render();
        let a = session.animation();
        let gap = shortest_angular_distance(normalize_angle(a.current_phi), 3.0 * FRAC_PI_2).abs();
        assert!(gap <= last + 1e-12);
        last = gap;
    }
    assert!(last < 0.01);
    assert_eq!(session.animation().idle_phi, idle_before);
}

#[test]
fn focus_decays_after_duration() {
    let (host, mut session, t0) = start(SessionConfig::default());
    session.set_focus(20.0, 40.0);
    assert!(session.pending_timer().is_some());
    assert_eq!(session.scheduler().len(), 1);

    session
        .scheduler_mut()
        .advance_to(t0 + Duration::from_millis(2499));
    assert_eq!(session.phase(), FocusPhase::Focused);

    session
        .scheduler_mut()
        .advance_to(t0 + Duration::from_millis(2500));
    assert_eq!(session.phase(), FocusPhase::Idle);
    assert_eq!(session.pending_timer(), None);
    assert!(session.scheduler().is_empty());

    // idle spin resumes from where it was frozen
    let idle = session.animation().idle_phi;
    host.render();
    assert!((session.animation().idle_phi - (idle + 0.005)).abs() < 1e-12);
}

#[test]
fn retargeting_does_not_extend_the_deadline() {
    let (_host, mut session, t0) = start(SessionConfig::default());
    session.set_focus(10.0, 10.0);
    session
        .scheduler_mut()
        .advance_to(t0 + Duration::from_millis(1000));
    session.set_focus(-20.0, 100.0);
    assert_eq!(session.scheduler().len(), 1);
    assert_eq!(session.focus_target(), Some(location_to_angles(-20.0, 100.0)));

    session
        .scheduler_mut()
        .advance_to(t0 + Duration::from_millis(2500));
    assert_eq!(session.phase(), FocusPhase::Idle);
}

#[test]
fn custom_focus_duration_is_honoured() {
    let (_host, mut session, t0) = start(SessionConfig {
        focus_duration_ms: 500,
        ..SessionConfig::default()
    });
    session.set_focus(1.0, 2.0);
    session
        .scheduler_mut()
        .advance_to(t0 + Duration::from_millis(500));
    assert_eq!(session.phase(), FocusPhase::Idle);
}

#[test]
fn clear_focus_cancels_timer() {
    let (_host, mut session, t0) = start(SessionConfig::default());
    session.set_focus(1.0, 2.0);
    session.clear_focus();
    assert_eq!(session.phase(), FocusPhase::Idle);
    assert!(session.scheduler().is_empty());
    assert_eq!(session.scheduler_mut().advance_to(t0 + Duration::from_secs(5)), 0);

    // clearing while idle is a no-op
    session.clear_focus();
    assert_eq!(session.phase(), FocusPhase::Idle);
}

#[test]
fn reconfigure_starts_over() {
    let (mut host, mut session, _) = start(SessionConfig::default());
    for _ in 0..50 {
        host.render();
    }
    session.set_focus(30.0, 30.0);
    assert!(session.animation().current_phi != 0.0);

    let dark = SessionConfig {
        theme: Theme::Dark,
        ..config_with_markers()
    };
    session
        .reconfigure(dark, &mut host, Some(&()))
        .expect("remount");

    assert_eq!(host.destroyed(), 1);
    assert_eq!(host.created.len(), 2);
    assert_eq!(host.created[1].dark, 1.0);
    assert_eq!(host.created[1].markers.len(), 2);
    assert_eq!(session.phase(), FocusPhase::Idle);
    assert!(session.scheduler().is_empty());
    assert_eq!(session.animation(), AnimationState::default());
    assert_eq!(session.frames(), 0);
    assert_eq!(session.config().theme, Theme::Dark);

    let state = host.render().expect("new callback installed");
    assert!((state.phi - 0.005 * 0.05).abs() < 1e-12);
}

#[test]
fn stale_callbacks_cannot_touch_a_rebuilt_session() {
    let (mut host, mut session, _) = start(SessionConfig::default());
    let mut stale = host.slot.borrow_mut().take().expect("callback installed");
    session
        .reconfigure(SessionConfig::default(), &mut host, Some(&()))
        .expect("remount");

    let mut state = FrameState::default();
    stale(&mut state);
    assert_eq!(state, FrameState::default());
    assert_eq!(session.frames(), 0);
}

#[test]
fn destroy_stops_frames_and_timers() {
    let (host, mut session, _) = start(SessionConfig::default());
    session.set_focus(5.0, 5.0);
    session.destroy();
    assert_eq!(host.destroyed(), 1);
    assert!(host.render().is_none());
}

#[test]
fn dropping_the_session_tears_down() {
    let (host, session, _) = start(SessionConfig::default());
    drop(session);
    assert_eq!(host.destroyed(), 1);
    assert!(host.render().is_none());
}

#[test]
fn timer_firing_after_teardown_is_inert() {
    // a scheduler that hands its callbacks out so they can be run late
    #[derive(Default)]
    struct Leaky {
        callbacks: Rc<RefCell<Vec<(TimerId, TimerCallback)>>>,
        cancelled: Rc<RefCell<Vec<TimerId>>>,
    }
    impl Scheduler for Leaky {
        fn schedule(&mut self, _delay: Duration, on_fire: TimerCallback) -> TimerId {
            let id = TimerId(self.callbacks.borrow().len() as u64 + 1);
            self.callbacks.borrow_mut().push((id, on_fire));
            id
        }
        fn cancel(&mut self, id: TimerId) {
            self.cancelled.borrow_mut().push(id);
        }
    }

    let mut host = FakeHost::default();
    let leaky = Leaky::default();
    let callbacks = leaky.callbacks.clone();
    let cancelled = leaky.cancelled.clone();
    let mut session =
        Session::init(SessionConfig::default(), &mut host, Some(&()), leaky).expect("mount");
    session.set_focus(5.0, 5.0);
    session.destroy();
    assert_eq!(*cancelled.borrow(), vec![TimerId(1)]);

    let (id, on_fire) = callbacks.borrow_mut().remove(0);
    on_fire(id);
    assert!(host.render().is_none());
}

#[test]
fn non_finite_focus_is_ignored() {
    let (host, mut session, t0) = start(SessionConfig::default());
    for (lat, long) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, f64::NAN)] {
        session.set_focus(lat, long);
        assert_eq!(session.phase(), FocusPhase::Idle);
        assert!(session.scheduler().is_empty());
    }

    for _ in 0..5 {
        host.render();
    }
    session
        .scheduler_mut()
        .advance_to(t0 + Duration::from_millis(2500));
    for _ in 0..1000 {
        let state = host.render().expect("callback installed");
        assert!(state.phi.is_finite());
        assert!(state.theta.is_finite());
        assert_eq!(state.theta, 0.0);
    }
}

#[test]
fn non_finite_focus_leaves_a_pending_focus_alone() {
    let (_host, mut session, _) = start(SessionConfig::default());
    session.set_focus(10.0, 20.0);
    session.set_focus(f64::NAN, 20.0);
    assert_eq!(session.focus_target(), Some(location_to_angles(10.0, 20.0)));
    assert_eq!(session.scheduler().len(), 1);
}
