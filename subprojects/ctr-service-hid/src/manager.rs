//! Reference-counted holder for a process-wide HID session.
//!
//! Mirrors libctru's `hidInit`/`hidExit` pairing: the first `init` connects, later calls only
//! bump the count, and the session is released when the last user exits.

use ctr_svc::Kernel;

use crate::HidService;

/// Owns at most one [`HidService`] and the number of users sharing it.
pub struct HidManager<K: Kernel> {
    state: Option<HidState<K>>,
}

struct HidState<K: Kernel> {
    service: HidService<K>,
    ref_count: u32,
}

impl<K: Kernel> HidManager<K> {
    /// Creates an empty manager.
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Initializes the session on first use, or takes another reference to it.
    ///
    /// `connect` only runs when no session is held. Its error is returned as-is and leaves
    /// the manager empty.
    pub fn init<E>(&mut self, connect: impl FnOnce() -> Result<HidService<K>, E>) -> Result<(), E> {
        if let Some(state) = &mut self.state {
            state.ref_count += 1;
            return Ok(());
        }

        let service = connect()?;
        self.state = Some(HidState {
            service,
            ref_count: 1,
        });

        Ok(())
    }

    /// Drops one reference, exiting the session when none remain.
    ///
    /// Returns true if the session was released by this call.
    pub fn exit(&mut self) -> bool {
        let Some(state) = &mut self.state else {
            return false;
        };

        state.ref_count = state.ref_count.saturating_sub(1);
        if state.ref_count > 0 {
            return false;
        }

        if let Some(state) = self.state.take() {
            state.service.exit();
        }
        true
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Number of outstanding `init` calls.
    #[inline]
    pub fn ref_count(&self) -> u32 {
        self.state.as_ref().map_or(0, |state| state.ref_count)
    }

    #[inline]
    pub fn service(&self) -> Option<&HidService<K>> {
        self.state.as_ref().map(|state| &state.service)
    }

    #[inline]
    pub fn service_mut(&mut self) -> Option<&mut HidService<K>> {
        self.state.as_mut().map(|state| &mut state.service)
    }
}

impl<K: Kernel> Default for HidManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use ctr_service_srv::SrvService;
    use ctr_svc::mock::{Call, MockKernel};

    use super::*;
    use crate::{HidConfig, InitError, tests::setup};

    fn connect<'k>(
        kernel: &'k MockKernel,
        config: HidConfig,
    ) -> impl FnOnce() -> Result<HidService<&'k MockKernel>, InitError> {
        move || {
            let srv = SrvService::connect(kernel).unwrap();
            let hid = HidService::init(kernel, &srv, config);
            srv.close();
            hid
        }
    }

    #[test]
    fn second_init_only_takes_a_reference() {
        let (kernel, shmem) = setup();
        let mut manager = HidManager::new();

        manager.init(connect(&kernel, shmem.config())).unwrap();
        let session = manager.service().unwrap().session();
        manager
            .init(|| -> Result<_, InitError> { panic!("connected twice") })
            .unwrap();

        assert_eq!(manager.ref_count(), 2);
        assert_eq!(manager.service().unwrap().session(), session);
    }

    #[test]
    fn session_released_by_last_exit() {
        let (kernel, shmem) = setup();
        let mut manager = HidManager::new();
        manager.init(connect(&kernel, shmem.config())).unwrap();
        manager.init(connect(&kernel, shmem.config())).unwrap();

        assert!(!manager.exit());
        assert!(manager.is_initialized());
        assert!(!kernel.calls().iter().any(|call| matches!(call, Call::UnmapMemoryBlock { .. })));

        assert!(manager.exit());
        assert!(!manager.is_initialized());
        assert!(kernel.open_handles().is_empty());
    }

    #[test]
    fn exit_without_init_does_nothing() {
        let mut manager = HidManager::<&MockKernel>::new();

        assert!(!manager.exit());
        assert_eq!(manager.ref_count(), 0);
    }

    #[test]
    fn failed_init_leaves_manager_empty() {
        let (kernel, _shmem) = setup();
        let mut manager = HidManager::new();
        let config = HidConfig {
            shared_memory_addr: 0,
            ..HidConfig::default()
        };

        let err = manager.init(connect(&kernel, config)).unwrap_err();

        assert!(matches!(err, InitError::NullAddress));
        assert!(!manager.is_initialized());
        assert!(manager.service_mut().is_none());
    }
}
