//! Session lifecycle: mount the controller on a render host, route focus
//! requests and timer expiries into it, and tear everything down again.

use crate::angles::{clamp_theta, Orientation};
use crate::animation::AnimationState;
use crate::config::SessionConfig;
use crate::controller::OrientationController;
use crate::focus::{FocusPhase, Scheduler, TimerId};
use crate::host::{FrameCallback, FrameState, RenderHandle, RenderHost, RenderOptions};
use std::cell::RefCell;
use std::rc::Rc;

/// One live globe.
///
/// The render host and the timer callbacks only ever hold weak references to
/// the controller, so once the session is torn down nothing can touch its
/// state again. Dropping the session tears it down.
pub struct Session<H: RenderHost, S: Scheduler> {
    config: SessionConfig,
    controller: Rc<RefCell<OrientationController>>,
    scheduler: S,
    handle: Option<H::Handle>,
}

impl<H: RenderHost, S: Scheduler> Session<H, S> {
    /// Build a session and mount it on `host`.
    ///
    /// With no `surface` the mount is skipped and the session stays inert until
    /// the next [`Session::reconfigure`]; that is not an error.
    pub fn init(
        config: SessionConfig,
        host: &mut H,
        surface: Option<&H::Surface>,
        scheduler: S,
    ) -> Result<Self, H::Error> {
        let controller = OrientationController::new(config.motion());
        let mut session = Self {
            config,
            controller: Rc::new(RefCell::new(controller)),
            scheduler,
            handle: None,
        };
        session.mount(host, surface)?;
        Ok(session)
    }

    /// Focus the globe on `(lat, long)` in degrees.
    ///
    /// Out-of-range values are accepted as-is; non-finite ones are dropped.
    pub fn set_focus(&mut self, lat: f64, long: f64) {
        if !(lat.is_finite() && long.is_finite()) {
            log::warn!("[session] ignoring non-finite focus ({}, {})", lat, long);
            return;
        }
        let delay = self.config.focus_duration();
        let weak = Rc::downgrade(&self.controller);
        let scheduler = &mut self.scheduler;
        self.controller.borrow_mut().set_focus(lat, long, || {
            scheduler.schedule(
                delay,
                Box::new(move |id: TimerId| {
                    if let Some(controller) = weak.upgrade() {
                        controller.borrow_mut().expire(id);
                    }
                }),
            )
        });
    }

    /// Return to idle rotation now, cancelling the pending decay timer.
    pub fn clear_focus(&mut self) {
        let pending = self.controller.borrow_mut().release();
        if let Some(id) = pending {
            self.scheduler.cancel(id);
            log::debug!("[session] focus cleared, cancelled {:?}", id);
        }
    }

    /// Tear down and rebuild from scratch with `config`.
    ///
    /// Smoothed orientation, idle phase and focus all start over; nothing
    /// carries across.
    pub fn reconfigure(
        &mut self,
        config: SessionConfig,
        host: &mut H,
        surface: Option<&H::Surface>,
    ) -> Result<(), H::Error> {
        self.teardown();
        self.controller = Rc::new(RefCell::new(OrientationController::new(config.motion())));
        self.config = config;
        self.mount(host, surface)
    }

    pub fn destroy(mut self) {
        self.teardown();
    }

    pub fn phase(&self) -> FocusPhase {
        self.controller.borrow().phase()
    }

    pub fn focus_target(&self) -> Option<Orientation> {
        self.controller.borrow().focus().target()
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.controller.borrow().focus().pending_timer()
    }

    pub fn animation(&self) -> AnimationState {
        *self.controller.borrow().animation()
    }

    pub fn frames(&self) -> u64 {
        self.controller.borrow().frames()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn mount(&mut self, host: &mut H, surface: Option<&H::Surface>) -> Result<(), H::Error> {
        let Some(surface) = surface else {
            log::warn!("[session] render surface not ready; mount deferred");
            return Ok(());
        };
        let options = RenderOptions::from_config(&self.config);
        let marker_count = options.markers.len();
        let handle = host.create(surface, options, self.frame_callback())?;
        self.handle = Some(handle);
        log::info!(
            "[session] mounted size={} dim={} markers={} theme={:?}",
            self.config.render_size,
            self.config.render_dimension(),
            marker_count,
            self.config.theme
        );
        Ok(())
    }

    fn frame_callback(&self) -> FrameCallback {
        let weak = Rc::downgrade(&self.controller);
        let dimension = self.config.render_dimension();
        Box::new(move |state: &mut FrameState| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let orientation = controller.borrow_mut().tick();
            state.phi = orientation.phi;
            state.theta = clamp_theta(orientation.theta);
            state.width = dimension;
            state.height = dimension;
        })
    }

    fn teardown(&mut self) {
        let pending = self.controller.borrow_mut().release();
        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
        if let Some(mut handle) = self.handle.take() {
            handle.destroy();
            log::info!("[session] destroyed");
        }
    }
}

impl<H: RenderHost, S: Scheduler> Drop for Session<H, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
