//! Ordered set of runtime systems driven by one frame loop

use glimmer_core::Result;
use log::{debug, warn};

use crate::system::{FrameContext, RuntimeSystem};

/// Owns the registered systems and ticks them in registration order
#[derive(Default)]
pub struct SystemSchedule {
    systems: Vec<Box<dyn RuntimeSystem>>,
}

impl SystemSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system. It runs after everything registered before it.
    pub fn register<S: RuntimeSystem + 'static>(&mut self, system: S) {
        debug!("Registered system '{}'", system.name());
        self.systems.push(Box::new(system));
    }

    /// Update every system once. Stops at the first error.
    pub fn update_all(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        for system in &mut self.systems {
            system.update(frame)?;
        }
        Ok(())
    }

    /// Shut every system down, even after one fails. Returns the first error.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let mut first_error = None;
        for system in &mut self.systems {
            if let Err(err) = system.shutdown() {
                warn!("System '{}' failed to shut down: {}", system.name(), err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// First registered system of type `S`
    pub fn get<S: RuntimeSystem + 'static>(&self) -> Option<&S> {
        self.systems
            .iter()
            .find_map(|system| (**system).as_any().downcast_ref::<S>())
    }

    pub fn get_mut<S: RuntimeSystem + 'static>(&mut self) -> Option<&mut S> {
        self.systems
            .iter_mut()
            .find_map(|system| (**system).as_any_mut().downcast_mut::<S>())
    }

    /// Names in update order
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_core::GlimmerError;
    use glimmer_render::Camera;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        fail_update: bool,
        fail_shutdown: bool,
        updates: u32,
    }

    impl Recorder {
        fn new(label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                label,
                log: Rc::clone(log),
                fail_update: false,
                fail_shutdown: false,
                updates: 0,
            }
        }
    }

    impl RuntimeSystem for Recorder {
        fn update(&mut self, _frame: &FrameContext<'_>) -> Result<()> {
            self.log.borrow_mut().push(format!("update {}", self.label));
            self.updates += 1;
            if self.fail_update {
                return Err(GlimmerError::InvalidConfig(format!("{} failed", self.label)));
            }
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            self.log.borrow_mut().push(format!("shutdown {}", self.label));
            if self.fail_shutdown {
                return Err(GlimmerError::InvalidConfig(format!("{} stuck", self.label)));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            self.label
        }
    }

    struct Counter(u32);

    impl RuntimeSystem for Counter {
        fn update(&mut self, _frame: &FrameContext<'_>) -> Result<()> {
            self.0 += 1;
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "counter"
        }
    }

    fn frame(camera: &Camera) -> FrameContext<'_> {
        FrameContext { dt: 0.016, camera }
    }

    #[test]
    fn test_updates_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = SystemSchedule::new();
        schedule.register(Recorder::new("a", &log));
        schedule.register(Recorder::new("b", &log));
        assert_eq!(schedule.names(), vec!["a", "b"]);

        let camera = Camera::new();
        schedule.update_all(&frame(&camera)).unwrap();
        schedule.update_all(&frame(&camera)).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["update a", "update b", "update a", "update b"]
        );
    }

    #[test]
    fn test_update_stops_at_first_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = SystemSchedule::new();
        let mut failing = Recorder::new("a", &log);
        failing.fail_update = true;
        schedule.register(failing);
        schedule.register(Recorder::new("b", &log));

        assert!(schedule.update_all(&frame(&Camera::new())).is_err());
        assert_eq!(*log.borrow(), vec!["update a"]);
    }

    #[test]
    fn test_shutdown_reaches_every_system() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = SystemSchedule::new();
        let mut stuck = Recorder::new("a", &log);
        stuck.fail_shutdown = true;
        schedule.register(stuck);
        schedule.register(Recorder::new("b", &log));

        assert!(schedule.shutdown_all().is_err());
        assert_eq!(*log.borrow(), vec!["shutdown a", "shutdown b"]);
    }

    #[test]
    fn test_typed_lookup() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = SystemSchedule::new();
        assert!(schedule.is_empty());
        schedule.register(Recorder::new("a", &log));
        schedule.register(Counter(0));
        assert_eq!(schedule.len(), 2);

        schedule.update_all(&frame(&Camera::new())).unwrap();
        assert_eq!(schedule.get::<Counter>().map(|c| c.0), Some(1));
        assert_eq!(schedule.get::<Recorder>().map(|r| r.updates), Some(1));

        if let Some(counter) = schedule.get_mut::<Counter>() {
            counter.0 = 10;
        }
        assert_eq!(schedule.get::<Counter>().map(|c| c.0), Some(10));
    }
}
