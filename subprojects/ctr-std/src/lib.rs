//! # ctr-std
#![no_std]

// The `ctr-panic-handler` crate provides the `#[panic_handler]` on the console.
extern crate ctr_panic_handler;

#[cfg(feature = "gpu")]
pub mod gpu {
    pub use ctr_gpu::*;
}

#[cfg(any(feature = "service-hid", feature = "service-srv"))]
pub mod service {
    #[cfg(feature = "service-hid")]
    pub use ctr_service_hid as hid;
    #[cfg(feature = "service-srv")]
    pub use ctr_service_srv as srv;
}

#[cfg(any(feature = "sys", feature = "svc", feature = "sf"))]
pub mod sys {
    #[cfg(any(feature = "sys", feature = "sf"))]
    pub use ctr_sf as sf;
    #[cfg(any(feature = "sys", feature = "svc"))]
    pub use ctr_svc as svc;
}
